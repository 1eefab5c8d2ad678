//! Shared key generation and validation for local storage.
//!
//! Key format: `photo-quest/{uuid}.{ext}`.

use keepsake_core::constants::LOCAL_MEDIA_PREFIX;
use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

/// Generate a fresh storage key for an upload with the given extension.
///
/// The extension is lowercased; an empty extension produces a key without one.
pub fn generate_media_key(extension: &str) -> String {
    let id = Uuid::new_v4();
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    if extension.is_empty() {
        format!("{}/{}", LOCAL_MEDIA_PREFIX, id)
    } else {
        format!("{}/{}.{}", LOCAL_MEDIA_PREFIX, id, extension)
    }
}

/// Reject keys that could escape the storage root.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }

    if key.starts_with('/') || key.contains('\\') || key.contains('\0') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }

    if key.split('/').any(|segment| segment == ".." || segment == "." || segment.is_empty()) {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid path segments".to_string(),
        ));
    }

    Ok(())
}
