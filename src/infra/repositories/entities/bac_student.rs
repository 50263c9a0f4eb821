//! Post-bac student profile entity.

use sea_orm::entity::prelude::*;

use crate::domain::BacStudent;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bac_students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub bac_major: Option<String>,
    pub bac_degree: Option<String>,
    pub grade: Option<f64>,
    pub subject_degree: Option<String>,
    pub bac_year_graduation: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BacStudent {
    fn from(model: Model) -> Self {
        BacStudent {
            user_id: model.user_id,
            bac_major: model.bac_major,
            bac_degree: model.bac_degree,
            grade: model.grade,
            subject_degree: model.subject_degree,
            bac_year_graduation: model.bac_year_graduation,
        }
    }
}
