//! Preparatory-class student repository. Rows are keyed by user id.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::prepa_student::{self, ActiveModel, Entity as PrepaStudentEntity};
use crate::domain::{PrepaStudent, PrepaStudentRequest};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[derive(Debug, Clone, PartialEq)]
pub enum PrepaStudentFilter {
    All,
    Major(String),
    AnneeBac(String),
    CncAtLeast(f64),
    MajorAndCncAtLeast(String, f64),
    /// Inclusive rating range
    CncBetween(f64, f64),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PrepaStudentRepository: Send + Sync {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<PrepaStudent>>;

    async fn exists(&self, user_id: i64) -> AppResult<bool>;

    async fn list(&self, filter: PrepaStudentFilter) -> AppResult<Vec<PrepaStudent>>;

    async fn create(&self, req: PrepaStudentRequest) -> AppResult<PrepaStudent>;

    async fn update(&self, user_id: i64, req: PrepaStudentRequest) -> AppResult<PrepaStudent>;

    async fn delete(&self, user_id: i64) -> AppResult<()>;
}

pub struct PrepaStudentStore {
    db: DatabaseConnection,
}

impl PrepaStudentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrepaStudentRepository for PrepaStudentStore {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<PrepaStudent>> {
        let result = PrepaStudentEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(PrepaStudent::from))
    }

    async fn exists(&self, user_id: i64) -> AppResult<bool> {
        let count = PrepaStudentEntity::find()
            .filter(prepa_student::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(&self, filter: PrepaStudentFilter) -> AppResult<Vec<PrepaStudent>> {
        let query = match filter {
            PrepaStudentFilter::All => PrepaStudentEntity::find(),
            PrepaStudentFilter::Major(major) => {
                PrepaStudentEntity::find().filter(prepa_student::Column::PrepaMajor.eq(major))
            }
            PrepaStudentFilter::AnneeBac(annee) => {
                PrepaStudentEntity::find().filter(prepa_student::Column::AnneeBac.eq(annee))
            }
            PrepaStudentFilter::CncAtLeast(rating) => {
                PrepaStudentEntity::find().filter(prepa_student::Column::CncRating.gte(rating))
            }
            PrepaStudentFilter::MajorAndCncAtLeast(major, rating) => PrepaStudentEntity::find()
                .filter(prepa_student::Column::PrepaMajor.eq(major))
                .filter(prepa_student::Column::CncRating.gte(rating)),
            PrepaStudentFilter::CncBetween(min, max) => PrepaStudentEntity::find()
                .filter(prepa_student::Column::CncRating.between(min, max)),
        };

        let models = query
            .order_by_asc(prepa_student::Column::UserId)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(PrepaStudent::from).collect())
    }

    async fn create(&self, req: PrepaStudentRequest) -> AppResult<PrepaStudent> {
        let active = ActiveModel {
            user_id: Set(req.user_id),
            prepa_major: Set(req.prepa_major),
            cnc_rating: Set(req.cnc_rating),
            notes_trimestre: Set(req.notes_trimestre),
            annee_bac: Set(req.annee_bac),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(PrepaStudent::from(model))
    }

    async fn update(&self, user_id: i64, req: PrepaStudentRequest) -> AppResult<PrepaStudent> {
        let existing = PrepaStudentEntity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Prepa student", user_id)?;

        let mut active: ActiveModel = existing.into();
        active.prepa_major = Set(req.prepa_major);
        active.cnc_rating = Set(req.cnc_rating);
        active.notes_trimestre = Set(req.notes_trimestre);
        active.annee_bac = Set(req.annee_bac);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(PrepaStudent::from(model))
    }

    async fn delete(&self, user_id: i64) -> AppResult<()> {
        let result = PrepaStudentEntity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Prepa student", user_id));
        }
        Ok(())
    }
}
