//! Post-bac student repository. Rows are keyed by user id.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::bac_student::{self, ActiveModel, Entity as BacStudentEntity};
use crate::domain::{BacStudent, BacStudentRequest};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[derive(Debug, Clone, PartialEq)]
pub enum BacStudentFilter {
    All,
    Major(String),
    Degree(String),
    GraduationYear(i32),
    GradeAtLeast(f64),
    MajorAndGradeAtLeast(String, f64),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BacStudentRepository: Send + Sync {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<BacStudent>>;

    async fn exists(&self, user_id: i64) -> AppResult<bool>;

    async fn list(&self, filter: BacStudentFilter) -> AppResult<Vec<BacStudent>>;

    async fn create(&self, req: BacStudentRequest) -> AppResult<BacStudent>;

    async fn update(&self, user_id: i64, req: BacStudentRequest) -> AppResult<BacStudent>;

    async fn delete(&self, user_id: i64) -> AppResult<()>;
}

pub struct BacStudentStore {
    db: DatabaseConnection,
}

impl BacStudentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BacStudentRepository for BacStudentStore {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<BacStudent>> {
        let result = BacStudentEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(BacStudent::from))
    }

    async fn exists(&self, user_id: i64) -> AppResult<bool> {
        let count = BacStudentEntity::find()
            .filter(bac_student::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(&self, filter: BacStudentFilter) -> AppResult<Vec<BacStudent>> {
        let query = match filter {
            BacStudentFilter::All => BacStudentEntity::find(),
            BacStudentFilter::Major(major) => {
                BacStudentEntity::find().filter(bac_student::Column::BacMajor.eq(major))
            }
            BacStudentFilter::Degree(degree) => {
                BacStudentEntity::find().filter(bac_student::Column::BacDegree.eq(degree))
            }
            BacStudentFilter::GraduationYear(year) => {
                BacStudentEntity::find().filter(bac_student::Column::BacYearGraduation.eq(year))
            }
            BacStudentFilter::GradeAtLeast(grade) => {
                BacStudentEntity::find().filter(bac_student::Column::Grade.gte(grade))
            }
            BacStudentFilter::MajorAndGradeAtLeast(major, grade) => BacStudentEntity::find()
                .filter(bac_student::Column::BacMajor.eq(major))
                .filter(bac_student::Column::Grade.gte(grade)),
        };

        let models = query
            .order_by_asc(bac_student::Column::UserId)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(BacStudent::from).collect())
    }

    async fn create(&self, req: BacStudentRequest) -> AppResult<BacStudent> {
        let active = ActiveModel {
            user_id: Set(req.user_id),
            bac_major: Set(req.bac_major),
            bac_degree: Set(req.bac_degree),
            grade: Set(req.grade),
            subject_degree: Set(req.subject_degree),
            bac_year_graduation: Set(req.bac_year_graduation),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(BacStudent::from(model))
    }

    async fn update(&self, user_id: i64, req: BacStudentRequest) -> AppResult<BacStudent> {
        let existing = BacStudentEntity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Bac student", user_id)?;

        let mut active: ActiveModel = existing.into();
        active.bac_major = Set(req.bac_major);
        active.bac_degree = Set(req.bac_degree);
        active.grade = Set(req.grade);
        active.subject_degree = Set(req.subject_degree);
        active.bac_year_graduation = Set(req.bac_year_graduation);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(BacStudent::from(model))
    }

    async fn delete(&self, user_id: i64) -> AppResult<()> {
        let result = BacStudentEntity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Bac student", user_id));
        }
        Ok(())
    }
}
