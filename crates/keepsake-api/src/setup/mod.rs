//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use keepsake_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    keepsake_infra::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let state = Arc::new(storage::setup_state(&config).await?);
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
