//! Bac+2 student repository. Rows are keyed by user id.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::bac2_student::{self, ActiveModel, Entity as Bac2StudentEntity};
use crate::domain::{Bac2Student, Bac2StudentRequest};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stored-column filters. The overall average is derived, so filtering on it
/// happens above this layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Bac2StudentFilter {
    All,
    Diploma(String),
    Major(String),
    Institution(String),
    AvgS1AtLeast(f64),
    DiplomaAndInstitution(String, String),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Bac2StudentRepository: Send + Sync {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<Bac2Student>>;

    async fn exists(&self, user_id: i64) -> AppResult<bool>;

    async fn list(&self, filter: Bac2StudentFilter) -> AppResult<Vec<Bac2Student>>;

    async fn create(&self, req: Bac2StudentRequest) -> AppResult<Bac2Student>;

    async fn update(&self, user_id: i64, req: Bac2StudentRequest) -> AppResult<Bac2Student>;

    async fn delete(&self, user_id: i64) -> AppResult<()>;
}

pub struct Bac2StudentStore {
    db: DatabaseConnection,
}

impl Bac2StudentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Bac2StudentRepository for Bac2StudentStore {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<Bac2Student>> {
        let result = Bac2StudentEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Bac2Student::from))
    }

    async fn exists(&self, user_id: i64) -> AppResult<bool> {
        let count = Bac2StudentEntity::find()
            .filter(bac2_student::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(&self, filter: Bac2StudentFilter) -> AppResult<Vec<Bac2Student>> {
        let query = match filter {
            Bac2StudentFilter::All => Bac2StudentEntity::find(),
            Bac2StudentFilter::Diploma(diploma) => {
                Bac2StudentEntity::find().filter(bac2_student::Column::DiplomaType.eq(diploma))
            }
            Bac2StudentFilter::Major(major) => {
                Bac2StudentEntity::find().filter(bac2_student::Column::BacMajor.eq(major))
            }
            Bac2StudentFilter::Institution(institution) => Bac2StudentEntity::find()
                .filter(bac2_student::Column::Institution.eq(institution)),
            Bac2StudentFilter::AvgS1AtLeast(avg) => {
                Bac2StudentEntity::find().filter(bac2_student::Column::AvgS1.gte(avg))
            }
            Bac2StudentFilter::DiplomaAndInstitution(diploma, institution) => {
                Bac2StudentEntity::find()
                    .filter(bac2_student::Column::DiplomaType.eq(diploma))
                    .filter(bac2_student::Column::Institution.eq(institution))
            }
        };

        let models = query
            .order_by_asc(bac2_student::Column::UserId)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Bac2Student::from).collect())
    }

    async fn create(&self, req: Bac2StudentRequest) -> AppResult<Bac2Student> {
        let active = ActiveModel {
            user_id: Set(req.user_id),
            avg_s1: Set(req.avg_s1),
            avg_s2: Set(req.avg_s2),
            avg_s3: Set(req.avg_s3),
            avg_s4: Set(req.avg_s4),
            diploma_type: Set(req.diploma_type),
            bac_major: Set(req.bac_major),
            institution: Set(req.institution),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Bac2Student::from(model))
    }

    async fn update(&self, user_id: i64, req: Bac2StudentRequest) -> AppResult<Bac2Student> {
        let existing = Bac2StudentEntity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Bac+2 student", user_id)?;

        let mut active: ActiveModel = existing.into();
        active.avg_s1 = Set(req.avg_s1);
        active.avg_s2 = Set(req.avg_s2);
        active.avg_s3 = Set(req.avg_s3);
        active.avg_s4 = Set(req.avg_s4);
        active.diploma_type = Set(req.diploma_type);
        active.bac_major = Set(req.bac_major);
        active.institution = Set(req.institution);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Bac2Student::from(model))
    }

    async fn delete(&self, user_id: i64) -> AppResult<()> {
        let result = Bac2StudentEntity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Bac+2 student", user_id));
        }
        Ok(())
    }
}
