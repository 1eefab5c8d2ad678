use crate::keys::validate_key;
use crate::traits::{StorageError, StorageResult};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Size and modification time of a stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredFileMetadata {
    pub size_bytes: u64,
    pub modified: SystemTime,
}

/// Local filesystem storage used as the fallback backend
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "./uploads")
    /// * `base_url` - Public URL prefix for serving files (e.g., "/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url: base_url.into(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a storage key to a filesystem path under the storage root.
    pub fn path_for(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;

        let path = self.base_path.join(storage_key);

        // Symlinks inside the root must not lead outside it.
        if let (Ok(canonical), Ok(base_canonical)) =
            (path.canonicalize(), self.base_path.canonicalize())
        {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Public URL for a storage key.
    pub fn url_for(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write `data` under `storage_key` and return `(storage_key, public_url)`.
    pub async fn put(&self, storage_key: &str, data: &[u8]) -> StorageResult<(String, String)> {
        let path = self.path_for(storage_key)?;
        self.ensure_parent_dir(&path).await?;

        let start = Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.url_for(storage_key);

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok((storage_key.to_string(), url))
    }

    pub async fn read(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.path_for(storage_key)?;
        let start = Instant::now();

        let data = fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(storage_key.to_string()),
            _ => StorageError::DownloadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            )),
        })?;

        tracing::debug!(
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage read successful"
        );

        Ok(data)
    }

    pub async fn metadata(&self, storage_key: &str) -> StorageResult<StoredFileMetadata> {
        let path = self.path_for(storage_key)?;

        let metadata = fs::metadata(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(storage_key.to_string()),
            _ => StorageError::IoError(e),
        })?;

        if !metadata.is_file() {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        Ok(StoredFileMetadata {
            size_bytes: metadata.len(),
            modified: metadata.modified()?,
        })
    }
}
