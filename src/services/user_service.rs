//! User service - Handles user-related business logic.
//!
//! Accounts created here (by an administrator) are enabled immediately;
//! self-registered accounts go through `AuthService::register` instead.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    base_username, hash_password, BasicInfoRequest, NewUser, User, UserChanges, UserRequest, UserType,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{UnitOfWork, UserFilter, UserRepository};

/// Username for the `attempt`-th try: the base first, then `base1`, `base2`...
pub fn username_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}{}", base, attempt)
    }
}

pub(crate) fn email_taken(email: &str) -> AppError {
    AppError::conflict(format!("User with email {} already exists", email))
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, req: UserRequest) -> AppResult<User>;

    async fn get_user(&self, id: i64) -> AppResult<User>;

    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    async fn get_user_by_username(&self, username: &str) -> AppResult<User>;

    async fn list_users(&self, filter: UserFilter) -> AppResult<Vec<User>>;

    /// Replace every editable field, re-hashing the password
    async fn update_user(&self, id: i64, req: UserRequest) -> AppResult<User>;

    /// Change only the fields present in the request
    async fn update_basic_info(&self, id: i64, req: BasicInfoRequest) -> AppResult<User>;

    async fn set_enabled(&self, id: i64, enabled: bool) -> AppResult<User>;

    async fn delete_user(&self, id: i64) -> AppResult<()>;

    async fn email_exists(&self, email: &str) -> AppResult<bool>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn unique_username(&self, users: &dyn UserRepository, base: &str) -> AppResult<String> {
        let mut attempt = 0;
        loop {
            let candidate = username_candidate(base, attempt);
            if !users.exists_by_username(&candidate).await? {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, req: UserRequest) -> AppResult<User> {
        let users = self.uow.users();
        if users.exists_by_email(&req.email).await? {
            return Err(email_taken(&req.email));
        }

        let password_hash = hash_password(&req.password)?;
        let username = self
            .unique_username(users.as_ref(), &base_username(&req.first_name, &req.last_name))
            .await?;

        let user = users
            .create(NewUser {
                email: req.email,
                username,
                first_name: req.first_name,
                last_name: req.last_name,
                password_hash,
                age: req.age,
                study_level: req.current_study_level,
                user_type: UserType::Student,
                enabled: true,
            })
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User", id)
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found with email: {}", email)))
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found with username: {}", username)))
    }

    async fn list_users(&self, filter: UserFilter) -> AppResult<Vec<User>> {
        self.uow.users().list(filter).await
    }

    async fn update_user(&self, id: i64, req: UserRequest) -> AppResult<User> {
        let users = self.uow.users();
        let existing = users.find_by_id(id).await?.ok_or_not_found("User", id)?;

        if existing.email != req.email && users.exists_by_email(&req.email).await? {
            return Err(email_taken(&req.email));
        }

        let password_hash = hash_password(&req.password)?;
        let changes = UserChanges {
            email: Some(req.email),
            first_name: Some(req.first_name),
            last_name: Some(req.last_name),
            password_hash: Some(password_hash),
            age: Some(req.age),
            study_level: Some(req.current_study_level),
            enabled: None,
        };

        let user = users.update(id, changes).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    async fn update_basic_info(&self, id: i64, req: BasicInfoRequest) -> AppResult<User> {
        let changes = UserChanges {
            first_name: req.first_name,
            last_name: req.last_name,
            age: req.age.map(Some),
            ..UserChanges::default()
        };
        self.uow.users().update(id, changes).await
    }

    async fn set_enabled(&self, id: i64, enabled: bool) -> AppResult<User> {
        let changes = UserChanges {
            enabled: Some(enabled),
            ..UserChanges::default()
        };
        let user = self.uow.users().update(id, changes).await?;
        tracing::info!(user_id = id, enabled, "User status changed");
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.uow.users().delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        self.uow.users().exists_by_email(email).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infra::unit_of_work::testing::TestUnitOfWork;
    use chrono::Utc;
    use mockall::predicate::eq;

    pub(crate) fn user(id: i64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            username: "amine.alaoui".to_string(),
            first_name: "Amine".to_string(),
            last_name: "Alaoui".to_string(),
            password_hash: "hashed".to_string(),
            age: Some(18),
            study_level: None,
            user_type: UserType::Student,
            enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(email: &str) -> UserRequest {
        UserRequest {
            email: email.to_string(),
            first_name: "Amine".to_string(),
            last_name: "Alaoui".to_string(),
            password: "secret123".to_string(),
            age: Some(18),
            current_study_level: None,
        }
    }

    #[test]
    fn test_username_candidates() {
        assert_eq!(username_candidate("amine.alaoui", 0), "amine.alaoui");
        assert_eq!(username_candidate("amine.alaoui", 2), "amine.alaoui2");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_conflicts() {
        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_exists_by_email()
            .with(eq("taken@example.ma"))
            .returning(|_| Ok(true));
        uow.users.expect_create().never();

        let service = UserManager::new(uow.build());
        let err = service.create_user(request("taken@example.ma")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "User with email taken@example.ma already exists");
    }

    #[tokio::test]
    async fn test_create_user_suffixes_username_on_collision() {
        let mut uow = TestUnitOfWork::default();
        uow.users.expect_exists_by_email().returning(|_| Ok(false));
        uow.users
            .expect_exists_by_username()
            .returning(|name| Ok(name == "amine.alaoui" || name == "amine.alaoui1"));
        uow.users.expect_create().returning(|new_user| {
            assert_eq!(new_user.username, "amine.alaoui2");
            assert!(new_user.enabled);
            assert_ne!(new_user.password_hash, "secret123");
            let mut created = user(5, &new_user.email);
            created.username = new_user.username;
            Ok(created)
        });

        let service = UserManager::new(uow.build());
        let created = service.create_user(request("new@example.ma")).await.unwrap();

        assert_eq!(created.username, "amine.alaoui2");
    }

    #[tokio::test]
    async fn test_update_user_rejects_email_of_another_account() {
        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(user(id, "old@example.ma"))));
        uow.users
            .expect_exists_by_email()
            .with(eq("other@example.ma"))
            .returning(|_| Ok(true));
        uow.users.expect_update().never();

        let service = UserManager::new(uow.build());
        let err = service.update_user(1, request("other@example.ma")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut uow = TestUnitOfWork::default();
        uow.users.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(uow.build());
        let err = service.get_user(42).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found with id: 42");
    }

    #[tokio::test]
    async fn test_basic_info_only_touches_present_fields() {
        let mut uow = TestUnitOfWork::default();
        uow.users.expect_update().returning(|id, changes| {
            assert_eq!(changes.first_name.as_deref(), Some("Yasmine"));
            assert!(changes.last_name.is_none());
            assert!(changes.email.is_none());
            assert_eq!(changes.age, Some(Some(19)));
            Ok(user(id, "x@example.ma"))
        });

        let service = UserManager::new(uow.build());
        let req = BasicInfoRequest {
            first_name: Some("Yasmine".into()),
            last_name: None,
            age: Some(19),
        };
        assert!(service.update_basic_info(3, req).await.is_ok());
    }
}
