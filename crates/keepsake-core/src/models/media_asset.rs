use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage_types::StorageBackend;

/// An uploaded photo and where its canonical copy lives.
///
/// Created once per upload and never mutated; retention is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: Uuid,
    /// Local storage key the upload was written to.
    pub source_path: String,
    /// Delivery URL issued by the remote backend, only when it accepted the file.
    pub stored_url: Option<String>,
    pub backend: StorageBackend,
    /// Canonical reference to persist: `stored_url` when remote, the local URL otherwise.
    pub url: String,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl MediaAsset {
    /// Build the asset record from the uploader outcome. `stored_url` decides the backend.
    pub fn new(
        source_path: String,
        local_url: String,
        stored_url: Option<String>,
        original_filename: String,
        content_type: String,
        size_bytes: u64,
    ) -> Self {
        let (backend, url) = match &stored_url {
            Some(remote) => (StorageBackend::Remote, remote.clone()),
            None => (StorageBackend::LocalFallback, local_url),
        };

        Self {
            id: Uuid::new_v4(),
            source_path,
            stored_url,
            backend,
            url,
            original_filename,
            content_type,
            size_bytes,
            created_at: Utc::now(),
        }
    }

    pub fn is_remote(&self) -> bool {
        self.backend == StorageBackend::Remote
    }
}
