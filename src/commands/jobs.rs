//! Jobs command - Background job management.
//!
//! - `work`: sweep expired verification tokens, then deliver queued mail
//! - `list`: show the queue status
//! - `clear`: remove failed jobs from the queue
//!
//! ## Usage
//!
//! ```bash
//! orientation-api jobs work
//! orientation-api jobs list
//! orientation-api jobs clear
//! ```

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::cli::args::{JobsAction, JobsArgs};
use crate::commands::wiring;
use crate::config::{Config, JOB_NAME_EMAIL};
use crate::errors::{AppError, AppResult};
use crate::services::ServiceContainer;

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
        JobsAction::List => list_jobs(&config).await,
        JobsAction::Clear => clear_failed_jobs(&config).await,
    }
}

/// Start the background job worker
///
/// Uses apalis with PostgreSQL storage for job persistence.
async fn run_worker(config: &Config) -> AppResult<()> {
    use apalis::prelude::*;

    use crate::jobs::{email_job_handler, Mailer};

    tracing::info!("Connecting services for job worker...");
    let wiring = wiring::connect(config).await?;

    let removed = wiring.services.auth().cleanup_expired_tokens().await?;
    tracing::info!(removed, "Verification token sweep finished");

    let mailer = Mailer::from_settings(&config.smtp)?;
    if !config.smtp.is_configured() {
        tracing::warn!("SMTP not configured - emails will be logged instead of sent");
    }

    tracing::info!("Job worker started. Press Ctrl+C to stop.");

    let worker = WorkerBuilder::new(JOB_NAME_EMAIL)
        .data(mailer)
        .backend(wiring.mail.storage())
        .build_fn(email_job_handler);

    // Run with graceful shutdown on Ctrl+C
    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Job worker stopped.");
    Ok(())
}

async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    tracing::info!("Connecting to database...");
    sea_orm::Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))
}

/// Whether `jobs work` (or the server) has created the apalis tables yet
async fn queue_initialized(db: &DatabaseConnection) -> AppResult<bool> {
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') as exists",
        ))
        .await
        .map_err(|e| AppError::internal(format!("Query failed: {}", e)))?;

    Ok(row
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false))
}

/// Pending, running, failed and done counts
#[derive(Debug, Default, PartialEq)]
struct QueueStatus {
    pending: i64,
    running: i64,
    failed: i64,
    done: i64,
}

impl QueueStatus {
    fn record(&mut self, status: &str, count: i64) {
        match status {
            "Pending" => self.pending = count,
            "Running" => self.running = count,
            "Failed" => self.failed = count,
            "Done" => self.done = count,
            _ => {}
        }
    }
}

/// List pending and failed jobs
async fn list_jobs(config: &Config) -> AppResult<()> {
    let db = connect(config).await?;

    if !queue_initialized(&db).await? {
        println!("\n=== Job Queue Status ===");
        println!("Job queue not initialized.");
        println!("Run 'jobs work' first to create the queue tables.");
        println!("========================\n");
        return Ok(());
    }

    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT status::text as status, COUNT(*)::bigint as count FROM apalis.jobs GROUP BY status",
        ))
        .await
        .map_err(|e| AppError::internal(format!("Query failed: {}", e)))?;

    let mut status = QueueStatus::default();
    for row in rows {
        if let (Ok(name), Ok(count)) = (
            row.try_get::<String>("", "status"),
            row.try_get::<i64>("", "count"),
        ) {
            status.record(&name, count);
        }
    }

    println!("\n=== Job Queue Status ===");
    println!("Pending:  {}", status.pending);
    println!("Running:  {}", status.running);
    println!("Failed:   {}", status.failed);
    println!("Done:     {}", status.done);
    println!("========================\n");

    Ok(())
}

/// Clear failed jobs from the queue
async fn clear_failed_jobs(config: &Config) -> AppResult<()> {
    let db = connect(config).await?;

    if !queue_initialized(&db).await? {
        println!("Job queue not initialized. Nothing to clear.");
        return Ok(());
    }

    let result = db
        .execute(Statement::from_string(
            DatabaseBackend::Postgres,
            "DELETE FROM apalis.jobs WHERE status = 'Failed'",
        ))
        .await
        .map_err(|e| AppError::internal(format!("Failed to clear jobs: {}", e)))?;

    println!(
        "Cleared {} failed job(s) from the queue.",
        result.rows_affected()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_status_ignores_unknown_states() {
        let mut status = QueueStatus::default();
        status.record("Pending", 3);
        status.record("Failed", 1);
        status.record("Killed", 9);
        assert_eq!(
            status,
            QueueStatus {
                pending: 3,
                running: 0,
                failed: 1,
                done: 0
            }
        );
    }
}
