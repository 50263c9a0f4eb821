//! University repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::university::{self, ActiveModel, Entity as UniversityEntity};
use crate::domain::{University, UniversityRequest};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Selection criteria for listing universities
#[derive(Debug, Clone, PartialEq)]
pub enum UniversityFilter {
    All,
    Location(String),
    Kind(String),
    Accreditation(String),
    /// Case-insensitive substring of the name
    NameContains(String),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UniversityRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<University>>;

    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<University>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<University>>;

    async fn exists_by_name(&self, name: &str) -> AppResult<bool>;

    async fn count(&self) -> AppResult<u64>;

    async fn list(&self, filter: UniversityFilter) -> AppResult<Vec<University>>;

    async fn create(&self, req: UniversityRequest) -> AppResult<University>;

    async fn update(&self, id: i64, req: UniversityRequest) -> AppResult<University>;

    async fn set_image_url(&self, id: i64, image_url: Option<String>) -> AppResult<University>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Remove every university; dependent rows go with them
    async fn delete_all(&self) -> AppResult<u64>;
}

pub struct UniversityStore {
    db: DatabaseConnection,
}

impl UniversityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UniversityRepository for UniversityStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<University>> {
        let result = UniversityEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(University::from))
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<University>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = UniversityEntity::find()
            .filter(university::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(University::from).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<University>> {
        let result = UniversityEntity::find()
            .filter(university::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(University::from))
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        exists_by_name(&self.db, name).await
    }

    async fn count(&self) -> AppResult<u64> {
        UniversityEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, filter: UniversityFilter) -> AppResult<Vec<University>> {
        let query = match filter {
            UniversityFilter::All => UniversityEntity::find(),
            UniversityFilter::Location(location) => {
                UniversityEntity::find().filter(university::Column::Location.eq(location))
            }
            UniversityFilter::Kind(kind) => {
                UniversityEntity::find().filter(university::Column::Kind.eq(kind))
            }
            UniversityFilter::Accreditation(status) => UniversityEntity::find()
                .filter(university::Column::AccreditationStatus.eq(status)),
            UniversityFilter::NameContains(name) => UniversityEntity::find()
                .filter(Expr::col(university::Column::Name).ilike(format!("%{}%", name))),
        };

        let models = query
            .order_by_asc(university::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(University::from).collect())
    }

    async fn create(&self, req: UniversityRequest) -> AppResult<University> {
        insert(&self.db, req).await
    }

    async fn update(&self, id: i64, req: UniversityRequest) -> AppResult<University> {
        let existing = UniversityEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("University", id)?;

        let mut active: ActiveModel = existing.into();
        apply(&mut active, req);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(University::from(model))
    }

    async fn set_image_url(&self, id: i64, image_url: Option<String>) -> AppResult<University> {
        set_image_url(&self.db, id, image_url).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UniversityEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("University", id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = UniversityEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

fn apply(active: &mut ActiveModel, req: UniversityRequest) {
    active.name = Set(req.name);
    active.location = Set(req.location);
    active.kind = Set(req.kind);
    active.description = Set(req.description);
    active.website = Set(req.website);
    active.contact_email = Set(req.contact_email);
    active.phone = Set(req.phone);
    active.accreditation_status = Set(req.accreditation_status);
    active.programs = Set(req.programs);
    active.image_url = Set(req.image_url);
    active.slug = Set(req.slug);
    active.header_image_url = Set(req.header_image_url);
    active.earth_view_url = Set(req.earth_view_url);
    active.gallery_images = Set(req.gallery_images);
}

pub(crate) async fn exists_by_name<C: ConnectionTrait>(db: &C, name: &str) -> AppResult<bool> {
    let count = UniversityEntity::find()
        .filter(university::Column::Name.eq(name))
        .count(db)
        .await
        .map_err(AppError::from)?;

    Ok(count > 0)
}

pub(crate) async fn insert<C: ConnectionTrait>(db: &C, req: UniversityRequest) -> AppResult<University> {
    let now = chrono::Utc::now();
    let mut active = ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    apply(&mut active, req);

    let model = active.insert(db).await.map_err(AppError::from)?;
    Ok(University::from(model))
}

pub(crate) async fn set_image_url<C: ConnectionTrait>(
    db: &C,
    id: i64,
    image_url: Option<String>,
) -> AppResult<University> {
    let existing = UniversityEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_not_found("University", id)?;

    let mut active: ActiveModel = existing.into();
    active.image_url = Set(image_url);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(db).await.map_err(AppError::from)?;
    Ok(University::from(model))
}
