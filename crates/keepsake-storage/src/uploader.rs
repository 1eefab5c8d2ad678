//! Storage backend selection for uploads.
//!
//! The uploader owns the decision "remote or local" for a single upload. It never
//! returns an error: every failure of the remote backend degrades to
//! [`StoreOutcome::Fallback`] after one diagnostic log record.

use crate::traits::{MediaBackend, UploadOptions};
use keepsake_core::TransformSpec;
use std::path::Path;
use std::sync::Arc;

/// Result of [`Uploader::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The remote backend stored the file; holds its delivery URL unmodified.
    Stored(String),
    /// Serve the file from local storage instead.
    Fallback,
}

impl StoreOutcome {
    pub fn stored_url(&self) -> Option<&str> {
        match self {
            StoreOutcome::Stored(url) => Some(url),
            StoreOutcome::Fallback => None,
        }
    }

    pub fn into_stored_url(self) -> Option<String> {
        match self {
            StoreOutcome::Stored(url) => Some(url),
            StoreOutcome::Fallback => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StoreOutcome::Fallback)
    }
}

/// Chooses the storage backend for each upload.
///
/// Holds no per-upload state; clone it or share it behind an `Arc`.
#[derive(Clone)]
pub struct Uploader {
    backend: Option<Arc<dyn MediaBackend>>,
    options: UploadOptions,
}

impl Uploader {
    /// `backend` is `None` when no remote backend is configured, which selects
    /// local-fallback mode for every upload.
    pub fn new(
        backend: Option<Arc<dyn MediaBackend>>,
        folder: impl Into<String>,
        transform: TransformSpec,
    ) -> Self {
        Self {
            backend,
            options: UploadOptions::new(folder, transform),
        }
    }

    pub fn is_remote_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn options(&self) -> &UploadOptions {
        &self.options
    }

    /// Store the file at `source_path` on the remote backend if one is configured.
    ///
    /// The file is only read, never moved or deleted.
    #[tracing::instrument(skip(self, source_path), fields(source_path = %source_path.display()))]
    pub async fn store(&self, source_path: &Path) -> StoreOutcome {
        let Some(backend) = &self.backend else {
            tracing::debug!("No remote media backend configured, using local storage");
            return StoreOutcome::Fallback;
        };

        match backend.upload(source_path, &self.options).await {
            Ok(asset) => {
                tracing::debug!(
                    backend = backend.backend_name(),
                    secure_url = %asset.secure_url,
                    "Stored upload on remote media backend"
                );
                StoreOutcome::Stored(asset.secure_url)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    source_path = %source_path.display(),
                    folder = %self.options.folder,
                    backend = backend.backend_name(),
                    "Remote media upload failed, falling back to local storage"
                );
                StoreOutcome::Fallback
            }
        }
    }
}
