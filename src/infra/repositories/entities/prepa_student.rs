//! Preparatory-class student profile entity.

use sea_orm::entity::prelude::*;

use crate::domain::PrepaStudent;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "prepa_students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub prepa_major: Option<String>,
    pub cnc_rating: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes_trimestre: Option<String>,
    pub annee_bac: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PrepaStudent {
    fn from(model: Model) -> Self {
        PrepaStudent {
            user_id: model.user_id,
            prepa_major: model.prepa_major,
            cnc_rating: model.cnc_rating,
            notes_trimestre: model.notes_trimestre,
            annee_bac: model.annee_bac,
        }
    }
}
