//! Preference repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::preference::{self, ActiveModel, Entity as PreferenceEntity};
use crate::domain::{Preference, PreferenceRequest};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Selection criteria for listing preferences. The `*Contains` variants
/// match case-insensitively anywhere in the stored text.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceFilter {
    All,
    Budget(String),
    CityContains(String),
    InterestContains(String),
    LanguageContains(String),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Preference>>;

    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<Preference>>;

    async fn exists_by_user(&self, user_id: i64) -> AppResult<bool>;

    async fn list(&self, filter: PreferenceFilter) -> AppResult<Vec<Preference>>;

    async fn create(&self, req: PreferenceRequest) -> AppResult<Preference>;

    async fn update(&self, id: i64, req: PreferenceRequest) -> AppResult<Preference>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn delete_by_user(&self, user_id: i64) -> AppResult<()>;
}

pub struct PreferenceStore {
    db: DatabaseConnection,
}

impl PreferenceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn contains(column: preference::Column, needle: String) -> sea_orm::sea_query::SimpleExpr {
    Expr::col(column).ilike(format!("%{}%", needle))
}

#[async_trait]
impl PreferenceRepository for PreferenceStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Preference>> {
        let result = PreferenceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Preference::from))
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<Preference>> {
        let result = PreferenceEntity::find()
            .filter(preference::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Preference::from))
    }

    async fn exists_by_user(&self, user_id: i64) -> AppResult<bool> {
        let count = PreferenceEntity::find()
            .filter(preference::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(&self, filter: PreferenceFilter) -> AppResult<Vec<Preference>> {
        let query = match filter {
            PreferenceFilter::All => PreferenceEntity::find(),
            PreferenceFilter::Budget(range) => {
                PreferenceEntity::find().filter(preference::Column::BudgetRange.eq(range))
            }
            PreferenceFilter::CityContains(city) => {
                PreferenceEntity::find().filter(contains(preference::Column::DesiredCities, city))
            }
            PreferenceFilter::InterestContains(interest) => {
                PreferenceEntity::find().filter(contains(preference::Column::Interests, interest))
            }
            PreferenceFilter::LanguageContains(language) => PreferenceEntity::find()
                .filter(contains(preference::Column::LanguagePreferences, language)),
        };

        let models = query
            .order_by_asc(preference::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Preference::from).collect())
    }

    async fn create(&self, req: PreferenceRequest) -> AppResult<Preference> {
        let now = chrono::Utc::now();
        let mut active = ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply(&mut active, req);

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Preference::from(model))
    }

    async fn update(&self, id: i64, req: PreferenceRequest) -> AppResult<Preference> {
        let existing = PreferenceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Preference", id)?;

        let mut active: ActiveModel = existing.into();
        apply(&mut active, req);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Preference::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = PreferenceEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Preference", id));
        }
        Ok(())
    }

    async fn delete_by_user(&self, user_id: i64) -> AppResult<()> {
        let result = PreferenceEntity::delete_many()
            .filter(preference::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Preference not found for user id: {}",
                user_id
            )));
        }
        Ok(())
    }
}

fn apply(active: &mut ActiveModel, req: PreferenceRequest) {
    active.user_id = Set(req.user_id);
    active.desired_cities = Set(req.desired_cities);
    active.budget_range = Set(req.budget_range);
    active.interests = Set(req.interests);
    active.career_goals = Set(req.career_goals);
    active.language_preferences = Set(req.language_preferences);
}
