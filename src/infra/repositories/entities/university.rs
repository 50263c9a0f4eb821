//! University database entity.

use sea_orm::entity::prelude::*;

use crate::domain::University;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "universities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub location: Option<String>,
    #[sea_orm(column_name = "type")]
    pub kind: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub accreditation_status: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub programs: Option<String>,
    pub image_url: Option<String>,
    #[sea_orm(unique)]
    pub slug: Option<String>,
    pub header_image_url: Option<String>,
    pub earth_view_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub gallery_images: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for University {
    fn from(model: Model) -> Self {
        University {
            id_university: model.id,
            name: model.name,
            location: model.location,
            kind: model.kind,
            description: model.description,
            website: model.website,
            contact_email: model.contact_email,
            phone: model.phone,
            accreditation_status: model.accreditation_status,
            programs: model.programs,
            image_url: model.image_url,
            slug: model.slug,
            header_image_url: model.header_image_url,
            earth_view_url: model.earth_view_url,
            gallery_images: model.gallery_images,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
