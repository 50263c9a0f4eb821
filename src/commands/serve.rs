//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::commands::wiring;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::services::ServiceContainer;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let wiring = wiring::connect(&config).await?;

    // Catalog load failures are logged per school and never stop the server
    if config.seed_on_startup {
        let report = wiring.services.seed().seed(config.seed_force).await?;
        tracing::info!(?report, "Startup seed finished");
    }

    let app_state = AppState::from_container(
        &wiring.services,
        wiring.database.clone(),
        wiring.cache.clone(),
        &config,
    );

    // Build router
    let app = create_router(app_state);

    // Start server
    let host = args.host.unwrap_or_else(|| config.server_host.clone());
    let port = args.port.unwrap_or(config.server_port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal, stopping server...");
}
