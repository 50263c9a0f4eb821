//! Connects the backing services and assembles the service container
//! shared by `serve`, `seed` and `jobs work`.

use std::sync::Arc;

use apalis_sql::sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{llm, Cache, Database, FileStorage, GeminiProvider, GroqProvider};
use crate::jobs::PostgresMailQueue;
use crate::services::{Adapters, Services};

const JOB_POOL_CONNECTIONS: u32 = 5;

/// Live connections plus the services built on top of them
pub struct Wiring {
    pub database: Arc<Database>,
    pub cache: Arc<Cache>,
    pub mail: Arc<PostgresMailQueue>,
    pub services: Services,
}

/// Open the job queue pool and create its tables if needed.
pub async fn connect_mail_queue(config: &Config) -> AppResult<PostgresMailQueue> {
    let pool = PgPoolOptions::new()
        .max_connections(JOB_POOL_CONNECTIONS)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    PostgresMailQueue::connect(pool).await
}

/// Connect Postgres (running pending migrations), Redis and the job queue,
/// then build every service.
pub async fn connect(config: &Config) -> AppResult<Wiring> {
    let database = Arc::new(Database::connect(config).await?);
    tracing::info!("Database connected");

    let cache = Arc::new(
        Cache::connect(config)
            .await
            .map_err(|e| AppError::internal(format!("Failed to connect to Redis: {}", e)))?,
    );

    let mail = Arc::new(connect_mail_queue(config).await?);
    tracing::info!("Mail queue ready");

    let client = llm::http_client()?;
    if config.groq_api_key().is_none() {
        tracing::warn!("GROQ_API_KEY not set - Groq requests will be rejected");
    }
    if config.gemini_api_key().is_none() {
        tracing::warn!("GEMINI_API_KEY not set - Gemini requests will be rejected");
    }

    let adapters = Adapters {
        cache: cache.clone(),
        mail: mail.clone(),
        storage: FileStorage::from_config(config),
        groq: Arc::new(GroqProvider::new(client.clone(), config.groq_api_key())),
        gemini: Arc::new(GeminiProvider::new(client, config.gemini_api_key())),
    };

    let services = Services::from_connection(database.get_connection(), config.clone(), adapters);

    Ok(Wiring {
        database,
        cache,
        mail,
        services,
    })
}
