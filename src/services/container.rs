//! Service Container - Centralized service access with parallel execution support.
//!
//! Every manager shares one `Persistence` unit of work. Outbound concerns
//! (cache, mail queue, chat vendors, file storage) are injected as trait
//! objects so the binary and the tests can wire different backends.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, Bac2StudentService, BacStudentService, CatalogSeeder,
    ChatManager, ChatService, CritereManager, CritereService, FiliereManager, FiliereService,
    PreferenceManager, PreferenceService, PrepaStudentService, SeedService, StudentManager,
    UniversityManager, UniversityService, UserManager, UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{CacheStore, ChatProvider, FileStorage, Persistence};
use crate::jobs::MailQueue;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn universities(&self) -> Arc<dyn UniversityService>;

    fn filieres(&self) -> Arc<dyn FiliereService>;

    fn criteres(&self) -> Arc<dyn CritereService>;

    fn preferences(&self) -> Arc<dyn PreferenceService>;

    fn bac_students(&self) -> Arc<dyn BacStudentService>;

    fn bac2_students(&self) -> Arc<dyn Bac2StudentService>;

    fn prepa_students(&self) -> Arc<dyn PrepaStudentService>;

    fn chat(&self) -> Arc<dyn ChatService>;

    fn seed(&self) -> Arc<dyn SeedService>;
}

/// Outbound adapters the services depend on
#[derive(Clone)]
pub struct Adapters {
    pub cache: Arc<dyn CacheStore>,
    pub mail: Arc<dyn MailQueue>,
    pub storage: FileStorage,
    pub groq: Arc<dyn ChatProvider>,
    pub gemini: Arc<dyn ChatProvider>,
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub universities: Arc<dyn UniversityService>,
    pub filieres: Arc<dyn FiliereService>,
    pub criteres: Arc<dyn CritereService>,
    pub preferences: Arc<dyn PreferenceService>,
    pub bac_students: Arc<dyn BacStudentService>,
    pub bac2_students: Arc<dyn Bac2StudentService>,
    pub prepa_students: Arc<dyn PrepaStudentService>,
    pub chat: Arc<dyn ChatService>,
    pub seed: Arc<dyn SeedService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config, adapters: Adapters) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let students = Arc::new(StudentManager::new(uow.clone()));

        Self {
            auth: Arc::new(Authenticator::new(
                uow.clone(),
                config,
                adapters.cache,
                adapters.mail,
            )),
            users: Arc::new(UserManager::new(uow.clone())),
            universities: Arc::new(UniversityManager::new(uow.clone(), adapters.storage.clone())),
            filieres: Arc::new(FiliereManager::new(uow.clone())),
            criteres: Arc::new(CritereManager::new(uow.clone())),
            preferences: Arc::new(PreferenceManager::new(uow.clone())),
            bac_students: students.clone(),
            bac2_students: students.clone(),
            prepa_students: students,
            chat: Arc::new(ChatManager::new(adapters.groq, adapters.gemini)),
            seed: Arc::new(CatalogSeeder::new(uow, adapters.storage)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    fn universities(&self) -> Arc<dyn UniversityService> {
        self.universities.clone()
    }

    fn filieres(&self) -> Arc<dyn FiliereService> {
        self.filieres.clone()
    }

    fn criteres(&self) -> Arc<dyn CritereService> {
        self.criteres.clone()
    }

    fn preferences(&self) -> Arc<dyn PreferenceService> {
        self.preferences.clone()
    }

    fn bac_students(&self) -> Arc<dyn BacStudentService> {
        self.bac_students.clone()
    }

    fn bac2_students(&self) -> Arc<dyn Bac2StudentService> {
        self.bac2_students.clone()
    }

    fn prepa_students(&self) -> Arc<dyn PrepaStudentService> {
        self.prepa_students.clone()
    }

    fn chat(&self) -> Arc<dyn ChatService> {
        self.chat.clone()
    }

    fn seed(&self) -> Arc<dyn SeedService> {
        self.seed.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// If either operation fails, the error is returned immediately.
    ///
    /// # Example
    /// ```ignore
    /// let (universities, criteres) = parallel::join2(
    ///     uow.universities().find_by_ids(university_ids),
    ///     uow.criteres().find_by_filieres(filiere_ids),
    /// ).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(
        f1: F1,
        f2: F2,
        f3: F3,
    ) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<i32> {
            Ok(2)
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[tokio::test]
    async fn test_parallel_join3_fails_fast() {
        let result = parallel::join3(
            async { Ok::<_, AppError>(1) },
            async { Err::<i32, _>(AppError::not_found("User", 4)) },
            async { Ok::<_, AppError>(3) },
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "User not found with id: 4");
    }
}
