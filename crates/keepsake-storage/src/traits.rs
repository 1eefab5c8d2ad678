//! Remote media backend abstraction
//!
//! This module defines the `MediaBackend` trait implemented by managed media services
//! and the error type shared by every storage operation.

use async_trait::async_trait;
use keepsake_core::TransformSpec;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Unexpected backend response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Where and how the remote backend should store an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// Logical namespace on the remote backend.
    pub folder: String,
    /// Transform the backend applies before storing.
    pub transform: TransformSpec,
}

impl UploadOptions {
    pub fn new(folder: impl Into<String>, transform: TransformSpec) -> Self {
        Self {
            folder: folder.into(),
            transform,
        }
    }
}

/// What the remote backend returned for a stored asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAsset {
    /// HTTPS delivery URL, used verbatim as the canonical reference.
    pub secure_url: String,
    pub public_id: Option<String>,
}

/// Managed media service
///
/// Implementations must be stateless with respect to individual uploads so one
/// instance can be shared by concurrent requests behind an `Arc`.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Upload the file at `source_path` with the given folder and transform.
    ///
    /// Implementations only read `source_path`; they never modify or delete it.
    async fn upload(&self, source_path: &Path, options: &UploadOptions)
        -> StorageResult<RemoteAsset>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
