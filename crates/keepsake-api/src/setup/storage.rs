//! Storage setup: the local fallback store and the uploader

use crate::state::AppState;
use anyhow::{Context, Result};
use keepsake_core::Config;
use keepsake_storage::{create_local_storage, create_uploader};

/// Build the application state from configuration
pub async fn setup_state(config: &Config) -> Result<AppState> {
    let local_storage = create_local_storage(config)
        .await
        .context("Failed to initialize local storage")?;

    let uploader = create_uploader(config).context("Failed to initialize uploader")?;

    tracing::info!(
        local_storage_path = %local_storage.base_path().display(),
        remote_backend = uploader.is_remote_configured(),
        folder = %uploader.options().folder,
        transformation = %uploader.options().transform.to_transformation_string(),
        "Storage initialized"
    );

    Ok(AppState {
        config: config.clone(),
        uploader,
        local_storage,
    })
}
