//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Cache, CacheStore, Database};
use crate::services::{
    AuthService, Bac2StudentService, BacStudentService, ChatService, CritereService,
    FiliereService, PreferenceService, PrepaStudentService, ServiceContainer, UniversityService,
    UserService,
};

/// Connectivity check reported by `/health`
#[async_trait]
pub trait Probe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait]
impl Probe for Database {
    async fn ping(&self) -> AppResult<()> {
        Database::ping(self).await?;
        Ok(())
    }
}

#[async_trait]
impl Probe for Cache {
    async fn ping(&self) -> AppResult<()> {
        Cache::ping(self).await
    }
}

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub university_service: Arc<dyn UniversityService>,
    pub filiere_service: Arc<dyn FiliereService>,
    pub critere_service: Arc<dyn CritereService>,
    pub preference_service: Arc<dyn PreferenceService>,
    pub bac_student_service: Arc<dyn BacStudentService>,
    pub bac2_student_service: Arc<dyn Bac2StudentService>,
    pub prepa_student_service: Arc<dyn PrepaStudentService>,
    pub chat_service: Arc<dyn ChatService>,
    /// Rate limit counters
    pub cache: Arc<dyn CacheStore>,
    pub database_probe: Arc<dyn Probe>,
    pub cache_probe: Arc<dyn Probe>,
    /// Fallback for links when a request carries no Host header
    pub base_url: String,
    /// Served under `/uploads`
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Build the state from a service container and the live connections.
    pub fn from_container(
        services: &dyn ServiceContainer,
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: &Config,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            university_service: services.universities(),
            filiere_service: services.filieres(),
            critere_service: services.criteres(),
            preference_service: services.preferences(),
            bac_student_service: services.bac_students(),
            bac2_student_service: services.bac2_students(),
            prepa_student_service: services.prepa_students(),
            chat_service: services.chat(),
            cache: cache.clone(),
            database_probe: database,
            cache_probe: cache,
            base_url: config.base_url.clone(),
            upload_dir: PathBuf::from(&config.upload_dir),
        }
    }
}
