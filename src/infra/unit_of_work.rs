//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories and runs multi-step workflows
//! (registration, email verification, catalog seeding) inside a single
//! database transaction that is committed on success and rolled back on error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    critere_repository, filiere_repository, university_repository, user_repository,
    verification_token_repository, Bac2StudentRepository, Bac2StudentStore, BacStudentRepository,
    BacStudentStore, CritereRepository, CritereStore, FiliereRepository, FiliereStore,
    PreferenceRepository, PreferenceStore, PrepaStudentRepository, PrepaStudentStore,
    UniversityRepository, UniversityStore, UserRepository, UserStore,
    VerificationTokenRepository, VerificationTokenStore,
};
use crate::domain::{
    Critere, CritereRequest, EmailVerificationToken, Filiere, FiliereRequest, NewUser,
    University, UniversityRequest, User, UserChanges,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// Tests mock the repositories it hands out instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn verification_tokens(&self) -> Arc<dyn VerificationTokenRepository>;

    fn universities(&self) -> Arc<dyn UniversityRepository>;

    fn filieres(&self) -> Arc<dyn FiliereRepository>;

    fn criteres(&self) -> Arc<dyn CritereRepository>;

    fn preferences(&self) -> Arc<dyn PreferenceRepository>;

    fn bac_students(&self) -> Arc<dyn BacStudentRepository>;

    fn bac2_students(&self) -> Arc<dyn Bac2StudentRepository>;

    fn prepa_students(&self) -> Arc<dyn PrepaStudentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error,
    /// at ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// Everything done through this context shares one database transaction,
/// which the context borrows for its whole lifetime.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn verification_tokens(&self) -> TxVerificationTokenRepository<'_> {
        TxVerificationTokenRepository { txn: self.txn }
    }

    pub fn universities(&self) -> TxUniversityRepository<'_> {
        TxUniversityRepository { txn: self.txn }
    }

    pub fn filieres(&self) -> TxFiliereRepository<'_> {
        TxFiliereRepository { txn: self.txn }
    }

    pub fn criteres(&self) -> TxCritereRepository<'_> {
        TxCritereRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    token_repo: Arc<VerificationTokenStore>,
    university_repo: Arc<UniversityStore>,
    filiere_repo: Arc<FiliereStore>,
    critere_repo: Arc<CritereStore>,
    preference_repo: Arc<PreferenceStore>,
    bac_repo: Arc<BacStudentStore>,
    bac2_repo: Arc<Bac2StudentStore>,
    prepa_repo: Arc<PrepaStudentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            token_repo: Arc::new(VerificationTokenStore::new(db.clone())),
            university_repo: Arc::new(UniversityStore::new(db.clone())),
            filiere_repo: Arc::new(FiliereStore::new(db.clone())),
            critere_repo: Arc::new(CritereStore::new(db.clone())),
            preference_repo: Arc::new(PreferenceStore::new(db.clone())),
            bac_repo: Arc::new(BacStudentStore::new(db.clone())),
            bac2_repo: Arc::new(Bac2StudentStore::new(db.clone())),
            prepa_repo: Arc::new(PrepaStudentStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn verification_tokens(&self) -> Arc<dyn VerificationTokenRepository> {
        self.token_repo.clone()
    }

    fn universities(&self) -> Arc<dyn UniversityRepository> {
        self.university_repo.clone()
    }

    fn filieres(&self) -> Arc<dyn FiliereRepository> {
        self.filiere_repo.clone()
    }

    fn criteres(&self) -> Arc<dyn CritereRepository> {
        self.critere_repo.clone()
    }

    fn preferences(&self) -> Arc<dyn PreferenceRepository> {
        self.preference_repo.clone()
    }

    fn bac_students(&self) -> Arc<dyn BacStudentRepository> {
        self.bac_repo.clone()
    }

    fn bac2_students(&self) -> Arc<dyn Bac2StudentRepository> {
        self.bac2_repo.clone()
    }

    fn prepa_students(&self) -> Arc<dyn PrepaStudentRepository> {
        self.prepa_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        user_repository::find_by_id(self.txn, id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        user_repository::find_by_email(self.txn, email).await
    }

    pub async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        user_repository::exists_by_email(self.txn, email).await
    }

    pub async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        user_repository::exists_by_username(self.txn, username).await
    }

    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        user_repository::insert(self.txn, new_user).await
    }

    pub async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User> {
        user_repository::update(self.txn, id, changes).await
    }
}

/// Transaction-aware verification token repository.
pub struct TxVerificationTokenRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxVerificationTokenRepository<'a> {
    pub async fn create(
        &self,
        user_id: i64,
        token: String,
        expiry_date: DateTime<Utc>,
    ) -> AppResult<EmailVerificationToken> {
        verification_token_repository::insert(self.txn, user_id, token, expiry_date).await
    }

    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<EmailVerificationToken>> {
        verification_token_repository::find_by_token(self.txn, token).await
    }

    pub async fn mark_verified(&self, id: i64) -> AppResult<()> {
        verification_token_repository::mark_verified(self.txn, id).await
    }
}

/// Transaction-aware university repository used by the seed loader.
pub struct TxUniversityRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUniversityRepository<'a> {
    pub async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        university_repository::exists_by_name(self.txn, name).await
    }

    pub async fn create(&self, req: UniversityRequest) -> AppResult<University> {
        university_repository::insert(self.txn, req).await
    }

    pub async fn set_image_url(&self, id: i64, image_url: Option<String>) -> AppResult<University> {
        university_repository::set_image_url(self.txn, id, image_url).await
    }
}

pub struct TxFiliereRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxFiliereRepository<'a> {
    pub async fn create(&self, req: FiliereRequest) -> AppResult<Filiere> {
        filiere_repository::insert(self.txn, req).await
    }
}

pub struct TxCritereRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCritereRepository<'a> {
    pub async fn create(&self, req: CritereRequest) -> AppResult<Critere> {
        critere_repository::insert(self.txn, req).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Unit of work over mocked repositories for service tests.

    use super::*;
    use crate::infra::repositories::{
        MockBac2StudentRepository, MockBacStudentRepository, MockCritereRepository,
        MockFiliereRepository, MockPreferenceRepository, MockPrepaStudentRepository,
        MockUniversityRepository, MockUserRepository, MockVerificationTokenRepository,
    };

    /// Repositories without expectations panic when called, so each test
    /// only wires the ones it exercises.
    #[derive(Default)]
    pub struct TestUnitOfWork {
        pub users: MockUserRepository,
        pub tokens: MockVerificationTokenRepository,
        pub universities: MockUniversityRepository,
        pub filieres: MockFiliereRepository,
        pub criteres: MockCritereRepository,
        pub preferences: MockPreferenceRepository,
        pub bac: MockBacStudentRepository,
        pub bac2: MockBac2StudentRepository,
        pub prepa: MockPrepaStudentRepository,
    }

    impl TestUnitOfWork {
        pub fn build(self) -> Arc<BuiltTestUnitOfWork> {
            Arc::new(BuiltTestUnitOfWork {
                users: Arc::new(self.users),
                tokens: Arc::new(self.tokens),
                universities: Arc::new(self.universities),
                filieres: Arc::new(self.filieres),
                criteres: Arc::new(self.criteres),
                preferences: Arc::new(self.preferences),
                bac: Arc::new(self.bac),
                bac2: Arc::new(self.bac2),
                prepa: Arc::new(self.prepa),
            })
        }
    }

    pub struct BuiltTestUnitOfWork {
        users: Arc<MockUserRepository>,
        tokens: Arc<MockVerificationTokenRepository>,
        universities: Arc<MockUniversityRepository>,
        filieres: Arc<MockFiliereRepository>,
        criteres: Arc<MockCritereRepository>,
        preferences: Arc<MockPreferenceRepository>,
        bac: Arc<MockBacStudentRepository>,
        bac2: Arc<MockBac2StudentRepository>,
        prepa: Arc<MockPrepaStudentRepository>,
    }

    #[async_trait]
    impl UnitOfWork for BuiltTestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn verification_tokens(&self) -> Arc<dyn VerificationTokenRepository> {
            self.tokens.clone()
        }

        fn universities(&self) -> Arc<dyn UniversityRepository> {
            self.universities.clone()
        }

        fn filieres(&self) -> Arc<dyn FiliereRepository> {
            self.filieres.clone()
        }

        fn criteres(&self) -> Arc<dyn CritereRepository> {
            self.criteres.clone()
        }

        fn preferences(&self) -> Arc<dyn PreferenceRepository> {
            self.preferences.clone()
        }

        fn bac_students(&self) -> Arc<dyn BacStudentRepository> {
            self.bac.clone()
        }

        fn bac2_students(&self) -> Arc<dyn Bac2StudentRepository> {
            self.bac2.clone()
        }

        fn prepa_students(&self) -> Arc<dyn PrepaStudentRepository> {
            self.prepa.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }
}
