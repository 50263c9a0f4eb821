//! Filière repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::filiere::{self, ActiveModel, Entity as FiliereEntity};
use crate::domain::{Filiere, FiliereRequest};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Selection criteria for listing filières
#[derive(Debug, Clone, PartialEq)]
pub enum FiliereFilter {
    All,
    University(i64),
    AdmissionType(String),
    Language(String),
    /// Deadline on or after the given date
    DeadlineFrom(NaiveDate),
    /// At least one seat left
    Available,
    UniversityAndAdmissionType(i64, String),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FiliereRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Filiere>>;

    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<Filiere>>;

    async fn exists_in_university(&self, university_id: i64, name: &str) -> AppResult<bool>;

    async fn list(&self, filter: FiliereFilter) -> AppResult<Vec<Filiere>>;

    async fn create(&self, req: FiliereRequest) -> AppResult<Filiere>;

    async fn update(&self, id: i64, req: FiliereRequest) -> AppResult<Filiere>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<u64>;
}

pub struct FiliereStore {
    db: DatabaseConnection,
}

impl FiliereStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FiliereRepository for FiliereStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Filiere>> {
        let result = FiliereEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Filiere::from))
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<Filiere>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = FiliereEntity::find()
            .filter(filiere::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Filiere::from).collect())
    }

    async fn exists_in_university(&self, university_id: i64, name: &str) -> AppResult<bool> {
        let count = FiliereEntity::find()
            .filter(filiere::Column::UniversityId.eq(university_id))
            .filter(filiere::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(&self, filter: FiliereFilter) -> AppResult<Vec<Filiere>> {
        let query = match filter {
            FiliereFilter::All => FiliereEntity::find(),
            FiliereFilter::University(id) => {
                FiliereEntity::find().filter(filiere::Column::UniversityId.eq(id))
            }
            FiliereFilter::AdmissionType(kind) => {
                FiliereEntity::find().filter(filiere::Column::AdmissionType.eq(kind))
            }
            FiliereFilter::Language(language) => {
                FiliereEntity::find().filter(filiere::Column::Language.eq(language))
            }
            FiliereFilter::DeadlineFrom(date) => {
                FiliereEntity::find().filter(filiere::Column::ApplicationDeadline.gte(date))
            }
            FiliereFilter::Available => {
                FiliereEntity::find().filter(filiere::Column::SeatsAvailable.gt(0))
            }
            FiliereFilter::UniversityAndAdmissionType(id, kind) => FiliereEntity::find()
                .filter(filiere::Column::UniversityId.eq(id))
                .filter(filiere::Column::AdmissionType.eq(kind)),
        };

        let models = query
            .order_by_asc(filiere::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Filiere::from).collect())
    }

    async fn create(&self, req: FiliereRequest) -> AppResult<Filiere> {
        insert(&self.db, req).await
    }

    async fn update(&self, id: i64, req: FiliereRequest) -> AppResult<Filiere> {
        let existing = FiliereEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Filiere", id)?;

        let mut active: ActiveModel = existing.into();
        apply(&mut active, req);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Filiere::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = FiliereEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Filiere", id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = FiliereEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

fn apply(active: &mut ActiveModel, req: FiliereRequest) {
    active.name = Set(req.name);
    active.university_id = Set(req.university_id);
    active.critere_admission = Set(req.critere_admission);
    active.duration_years = Set(req.duration_years);
    active.tuition_fee = Set(req.tuition_fee);
    active.admission_type = Set(req.admission_type);
    active.language = Set(req.language);
    active.seats_available = Set(req.seats_available);
    active.application_deadline = Set(req.application_deadline);
}

pub(crate) async fn insert<C: ConnectionTrait>(db: &C, req: FiliereRequest) -> AppResult<Filiere> {
    let now = chrono::Utc::now();
    let mut active = ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    apply(&mut active, req);

    let model = active.insert(db).await.map_err(AppError::from)?;
    Ok(Filiere::from(model))
}
