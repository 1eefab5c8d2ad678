use crate::{CloudinaryBackend, LocalStorage, MediaBackend, StorageResult, Uploader};
use keepsake_core::{Config, TransformSpec};
use std::sync::Arc;

/// Create the remote media backend, or `None` when `CLOUDINARY_URL` is not configured.
pub fn create_media_backend(config: &Config) -> StorageResult<Option<Arc<dyn MediaBackend>>> {
    match config.remote() {
        Some(remote) => {
            let backend = CloudinaryBackend::new(remote)?;
            tracing::info!(
                backend = backend.backend_name(),
                cloud_name = %remote.cloud_name,
                folder = %remote.folder,
                "Remote media backend configured"
            );
            Ok(Some(Arc::new(backend)))
        }
        None => {
            tracing::info!("No remote media backend configured, uploads use local storage");
            Ok(None)
        }
    }
}

/// Create the uploader with the configured backend, folder and bounding box.
pub fn create_uploader(config: &Config) -> StorageResult<Uploader> {
    let backend = create_media_backend(config)?;
    let folder = config
        .remote()
        .map(|remote| remote.folder.clone())
        .unwrap_or_else(|| keepsake_core::constants::DEFAULT_REMOTE_FOLDER.to_string());
    let transform = TransformSpec::bounded(config.upload_max_width(), config.upload_max_height());

    Ok(Uploader::new(backend, folder, transform))
}

/// Create the local fallback storage rooted at `LOCAL_STORAGE_PATH`.
pub async fn create_local_storage(config: &Config) -> StorageResult<LocalStorage> {
    LocalStorage::new(
        config.local_storage_path().clone(),
        config.local_storage_base_url().to_string(),
    )
    .await
}
