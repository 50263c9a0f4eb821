//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, StudyLevel, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Selection criteria for listing users
#[derive(Debug, Clone, PartialEq)]
pub enum UserFilter {
    All,
    Enabled(bool),
    AgeBetween(i32, i32),
    StudyLevel(StudyLevel),
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Fetch several users at once (missing ids are skipped)
    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    async fn list(&self, filter: UserFilter) -> AppResult<Vec<User>>;

    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_by_email(&self.db, email).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        exists_by_email(&self.db, email).await
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        exists_by_username(&self.db, username).await
    }

    async fn list(&self, filter: UserFilter) -> AppResult<Vec<User>> {
        let query = match filter {
            UserFilter::All => UserEntity::find(),
            UserFilter::Enabled(enabled) => {
                UserEntity::find().filter(user::Column::Enabled.eq(enabled))
            }
            UserFilter::AgeBetween(min, max) => {
                UserEntity::find().filter(user::Column::Age.between(min, max))
            }
            UserFilter::StudyLevel(level) => {
                UserEntity::find().filter(user::Column::CurrentStudyLevel.eq(level.as_str()))
            }
        };

        let models = query
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        insert(&self.db, new_user).await
    }

    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User> {
        update(&self.db, id, changes).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("User", id));
        }
        Ok(())
    }
}

// Queries shared with the transaction-scoped repository.

pub(crate) async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<Option<User>> {
    let result = UserEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

pub(crate) async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Option<User>> {
    let result = UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

pub(crate) async fn exists_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<bool> {
    let count = UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .count(db)
        .await
        .map_err(AppError::from)?;

    Ok(count > 0)
}

pub(crate) async fn exists_by_username<C: ConnectionTrait>(db: &C, username: &str) -> AppResult<bool> {
    let count = UserEntity::find()
        .filter(user::Column::Username.eq(username))
        .count(db)
        .await
        .map_err(AppError::from)?;

    Ok(count > 0)
}

pub(crate) async fn insert<C: ConnectionTrait>(db: &C, new_user: NewUser) -> AppResult<User> {
    let now = chrono::Utc::now();
    let active_model = ActiveModel {
        email: Set(new_user.email),
        username: Set(new_user.username),
        first_name: Set(new_user.first_name),
        last_name: Set(new_user.last_name),
        password_hash: Set(new_user.password_hash),
        age: Set(new_user.age),
        current_study_level: Set(new_user.study_level.map(|l| l.as_str().to_string())),
        user_type: Set(new_user.user_type.to_string()),
        enabled: Set(new_user.enabled),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = active_model.insert(db).await.map_err(AppError::from)?;
    Ok(User::from(model))
}

pub(crate) async fn update<C: ConnectionTrait>(
    db: &C,
    id: i64,
    changes: UserChanges,
) -> AppResult<User> {
    let existing = UserEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_not_found("User", id)?;

    let mut active: ActiveModel = existing.into();

    if let Some(email) = changes.email {
        active.email = Set(email);
    }
    if let Some(first_name) = changes.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = changes.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(password_hash) = changes.password_hash {
        active.password_hash = Set(password_hash);
    }
    if let Some(age) = changes.age {
        active.age = Set(age);
    }
    if let Some(level) = changes.study_level {
        active.current_study_level = Set(level.map(|l| l.as_str().to_string()));
    }
    if let Some(enabled) = changes.enabled {
        active.enabled = Set(enabled);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(db).await.map_err(AppError::from)?;
    Ok(User::from(model))
}
