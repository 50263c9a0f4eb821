//! Filière database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Filiere;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "filieres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub university_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub critere_admission: Option<String>,
    pub duration_years: Option<i32>,
    pub tuition_fee: Option<f64>,
    pub admission_type: Option<String>,
    pub language: Option<String>,
    pub seats_available: Option<i32>,
    pub application_deadline: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Filiere {
    fn from(model: Model) -> Self {
        Filiere {
            id: model.id,
            name: model.name,
            university_id: model.university_id,
            critere_admission: model.critere_admission,
            duration_years: model.duration_years,
            tuition_fee: model.tuition_fee,
            admission_type: model.admission_type,
            language: model.language,
            seats_available: model.seats_available,
            application_deadline: model.application_deadline,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
