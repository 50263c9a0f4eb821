//! Bac+2 student profile entity.

use sea_orm::entity::prelude::*;

use crate::domain::Bac2Student;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bac2_students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub avg_s1: Option<f64>,
    pub avg_s2: Option<f64>,
    pub avg_s3: Option<f64>,
    pub avg_s4: Option<f64>,
    pub diploma_type: Option<String>,
    pub bac_major: Option<String>,
    pub institution: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Bac2Student {
    fn from(model: Model) -> Self {
        Bac2Student {
            user_id: model.user_id,
            avg_s1: model.avg_s1,
            avg_s2: model.avg_s2,
            avg_s3: model.avg_s3,
            avg_s4: model.avg_s4,
            diploma_type: model.diploma_type,
            bac_major: model.bac_major,
            institution: model.institution,
        }
    }
}
