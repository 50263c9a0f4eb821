//! Preference database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Preference;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "preferences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub desired_cities: Option<String>,
    pub budget_range: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub interests: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub career_goals: Option<String>,
    pub language_preferences: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Preference {
    fn from(model: Model) -> Self {
        Preference {
            id: model.id,
            user_id: model.user_id,
            desired_cities: model.desired_cities,
            budget_range: model.budget_range,
            interests: model.interests,
            career_goals: model.career_goals,
            language_preferences: model.language_preferences,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
