//! Outbound mail queue. Services push here once their transaction has
//! committed; the `jobs work` process drains it.

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::PgPool;
use async_trait::async_trait;

use super::EmailJob;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MailQueue: Send + Sync {
    async fn push(&self, job: EmailJob) -> AppResult<()>;
}

/// Durable queue backed by the apalis Postgres tables
#[derive(Clone)]
pub struct PostgresMailQueue {
    storage: PostgresStorage<EmailJob>,
}

impl PostgresMailQueue {
    /// Create the apalis tables if needed and open the email queue.
    pub async fn connect(pool: PgPool) -> AppResult<Self> {
        PostgresStorage::setup(&pool)
            .await
            .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;
        Ok(Self {
            storage: PostgresStorage::new(pool),
        })
    }

    pub fn storage(&self) -> PostgresStorage<EmailJob> {
        self.storage.clone()
    }
}

#[async_trait]
impl MailQueue for PostgresMailQueue {
    async fn push(&self, job: EmailJob) -> AppResult<()> {
        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to enqueue email: {}", e)))?;
        Ok(())
    }
}
