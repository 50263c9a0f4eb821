//! Preference service - one orientation preference record per user.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Preference, PreferenceRequest, PreferenceResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{PreferenceFilter, UnitOfWork};

fn not_found_for_user(user_id: i64) -> AppError {
    AppError::NotFound(format!("Preference not found for user id: {}", user_id))
}

#[async_trait]
pub trait PreferenceService: Send + Sync {
    async fn create_preference(&self, req: PreferenceRequest) -> AppResult<PreferenceResponse>;

    async fn get_preference(&self, id: i64) -> AppResult<PreferenceResponse>;

    async fn get_preference_by_user(&self, user_id: i64) -> AppResult<PreferenceResponse>;

    async fn list_preferences(&self, filter: PreferenceFilter) -> AppResult<Vec<PreferenceResponse>>;

    async fn update_preference(&self, id: i64, req: PreferenceRequest) -> AppResult<PreferenceResponse>;

    async fn delete_preference(&self, id: i64) -> AppResult<()>;

    async fn delete_preference_by_user(&self, user_id: i64) -> AppResult<()>;

    async fn preference_exists_for_user(&self, user_id: i64) -> AppResult<bool>;
}

pub struct PreferenceManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PreferenceManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn with_users(&self, preferences: Vec<Preference>) -> AppResult<Vec<PreferenceResponse>> {
        if preferences.is_empty() {
            return Ok(Vec::new());
        }
        let mut ids: Vec<i64> = preferences.iter().map(|p| p.user_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let users: HashMap<i64, (String, String)> = self
            .uow
            .users()
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|u| (u.id, (u.username, u.email)))
            .collect();

        Ok(preferences
            .into_iter()
            .map(|p| match users.get(&p.user_id).cloned() {
                Some((username, email)) => PreferenceResponse::new(p, Some(username), Some(email)),
                None => PreferenceResponse::new(p, None, None),
            })
            .collect())
    }

    async fn single(&self, preference: Preference) -> AppResult<PreferenceResponse> {
        let id = preference.id;
        self.with_users(vec![preference])
            .await?
            .pop()
            .ok_or_else(|| AppError::not_found("Preference", id))
    }
}

#[async_trait]
impl<U: UnitOfWork> PreferenceService for PreferenceManager<U> {
    async fn create_preference(&self, req: PreferenceRequest) -> AppResult<PreferenceResponse> {
        let user = self
            .uow
            .users()
            .find_by_id(req.user_id)
            .await?
            .ok_or_not_found("User", req.user_id)?;

        if self.uow.preferences().exists_by_user(user.id).await? {
            return Err(AppError::conflict(format!(
                "Preference already exists for user id: {}",
                user.id
            )));
        }

        let preference = self.uow.preferences().create(req).await?;
        tracing::info!(preference_id = preference.id, user_id = user.id, "Preference created");
        Ok(PreferenceResponse::new(preference, Some(user.username), Some(user.email)))
    }

    async fn get_preference(&self, id: i64) -> AppResult<PreferenceResponse> {
        let preference = self
            .uow
            .preferences()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Preference", id)?;
        self.single(preference).await
    }

    async fn get_preference_by_user(&self, user_id: i64) -> AppResult<PreferenceResponse> {
        let preference = self
            .uow
            .preferences()
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| not_found_for_user(user_id))?;
        self.single(preference).await
    }

    async fn list_preferences(&self, filter: PreferenceFilter) -> AppResult<Vec<PreferenceResponse>> {
        let preferences = self.uow.preferences().list(filter).await?;
        self.with_users(preferences).await
    }

    async fn update_preference(&self, id: i64, req: PreferenceRequest) -> AppResult<PreferenceResponse> {
        let existing = self
            .uow
            .preferences()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Preference", id)?;

        if existing.user_id != req.user_id {
            self.uow
                .users()
                .find_by_id(req.user_id)
                .await?
                .ok_or_not_found("User", req.user_id)?;
            if self.uow.preferences().exists_by_user(req.user_id).await? {
                return Err(AppError::conflict(format!(
                    "Preference already exists for user id: {}",
                    req.user_id
                )));
            }
        }

        let preference = self.uow.preferences().update(id, req).await?;
        tracing::info!(preference_id = id, "Preference updated");
        self.single(preference).await
    }

    async fn delete_preference(&self, id: i64) -> AppResult<()> {
        self.uow.preferences().delete(id).await?;
        tracing::info!(preference_id = id, "Preference deleted");
        Ok(())
    }

    async fn delete_preference_by_user(&self, user_id: i64) -> AppResult<()> {
        if !self.uow.preferences().exists_by_user(user_id).await? {
            return Err(not_found_for_user(user_id));
        }
        self.uow.preferences().delete_by_user(user_id).await?;
        tracing::info!(user_id, "Preference deleted");
        Ok(())
    }

    async fn preference_exists_for_user(&self, user_id: i64) -> AppResult<bool> {
        self.uow.preferences().exists_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::unit_of_work::testing::TestUnitOfWork;
    use crate::services::user_service::tests::user;
    use chrono::Utc;

    fn preference(id: i64, user_id: i64) -> Preference {
        Preference {
            id,
            user_id,
            desired_cities: Some("Rabat, Casablanca".into()),
            budget_range: Some("0-20000 MAD".into()),
            interests: Some("Informatique".into()),
            career_goals: None,
            language_preferences: Some("Français".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(user_id: i64) -> PreferenceRequest {
        PreferenceRequest {
            user_id,
            desired_cities: Some("Rabat".into()),
            budget_range: None,
            interests: None,
            career_goals: None,
            language_preferences: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_user() {
        let mut uow = TestUnitOfWork::default();
        uow.users.expect_find_by_id().returning(|_| Ok(None));
        uow.preferences.expect_create().never();

        let service = PreferenceManager::new(uow.build());
        let err = service.create_preference(request(12)).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found with id: 12");
    }

    #[tokio::test]
    async fn test_second_preference_for_user_conflicts() {
        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "a@example.ma"))));
        uow.preferences.expect_exists_by_user().returning(|_| Ok(true));

        let service = PreferenceManager::new(uow.build());
        let err = service.create_preference(request(3)).await.unwrap_err();
        assert_eq!(err.to_string(), "Preference already exists for user id: 3");
    }

    #[tokio::test]
    async fn test_create_response_carries_user_identity() {
        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "a@example.ma"))));
        uow.preferences.expect_exists_by_user().returning(|_| Ok(false));
        uow.preferences
            .expect_create()
            .returning(|req| Ok(preference(1, req.user_id)));

        let service = PreferenceManager::new(uow.build());
        let created = service.create_preference(request(3)).await.unwrap();
        assert_eq!(created.user_email.as_deref(), Some("a@example.ma"));
        assert_eq!(created.username.as_deref(), Some("amine.alaoui"));
    }

    #[tokio::test]
    async fn test_get_by_user_missing() {
        let mut uow = TestUnitOfWork::default();
        uow.preferences.expect_find_by_user().returning(|_| Ok(None));

        let service = PreferenceManager::new(uow.build());
        let err = service.get_preference_by_user(5).await.unwrap_err();
        assert_eq!(err.to_string(), "Preference not found for user id: 5");
    }

    #[tokio::test]
    async fn test_list_tolerates_deleted_user() {
        let mut uow = TestUnitOfWork::default();
        uow.preferences
            .expect_list()
            .returning(|_| Ok(vec![preference(1, 3), preference(2, 4)]));
        uow.users
            .expect_find_by_ids()
            .returning(|_| Ok(vec![user(3, "a@example.ma")]));

        let service = PreferenceManager::new(uow.build());
        let list = service
            .list_preferences(PreferenceFilter::CityContains("rabat".into()))
            .await
            .unwrap();
        assert_eq!(list[0].user_email.as_deref(), Some("a@example.ma"));
        assert!(list[1].user_email.is_none());
    }
}
