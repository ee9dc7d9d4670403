//! Osusu Backend Service
//!
//! Main entry point for the savings-group administration backend.
//! This service provides:
//! - HTTP JSON API for groups, slot memberships, profiles and payments
//! - Daily audit trail of admin actions

use anyhow::Context;
use osusu_backend::config::{AppConfig, LogFormat};
use osusu_backend::database::{create_pool, run_migrations};
use osusu_backend::services::AuditTrailService;
use osusu_backend::{create_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "osusu_backend={},sqlx=warn,tower_http=info",
            config.log_level
        )
        .into()
    });

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    init_tracing(&config);

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Osusu Backend Service Starting                 ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database...");

    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    info!("Running database migrations...");
    run_migrations(&pool, Some(config.migrations_dir.as_path()))
        .await
        .context("Database migration failed")?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // CORE SERVICES INITIALIZATION
    // =========================================================================
    info!("Initializing core services...");

    let audit = Arc::new(
        AuditTrailService::new(config.audit_log_dir.clone())
            .context("Audit trail initialization failed")?,
    );
    info!("✓ Audit trail service initialized");

    let app_state = AppState::new(pool, audit);
    info!("✓ Application state initialized with repositories and services");

    let app = create_router(&app_state);

    // =========================================================================
    // START SERVER
    // =========================================================================
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server on {}", addr))?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║           Osusu Backend Service Ready!                   ║");
    info!("╠══════════════════════════════════════════════════════════╣");
    info!("║  HTTP API:     {}                              ║", addr);
    info!("║  Audit logs:   {}", config.audit_log_dir.display());
    info!("║  Environment:  {}                                ║", config.environment);
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server exited unexpectedly")?;

    info!("Osusu backend service shutdown complete");
    Ok(())
}
