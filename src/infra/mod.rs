//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Redis cache for verification tokens and rate limits
//! - Local upload storage
//! - LLM vendor HTTP clients
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod llm;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use cache::{verification_key, Cache, CacheStore};
pub use db::{Database, Migrator};
pub use llm::{ChatPrompt, ChatProvider, GeminiProvider, GroqProvider, ProviderError};
pub use repositories::*;
pub use storage::FileStorage;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockCacheStore;
#[cfg(any(test, feature = "test-utils"))]
pub use llm::MockChatProvider;
