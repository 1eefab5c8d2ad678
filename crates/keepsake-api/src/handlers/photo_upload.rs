use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use keepsake_core::MediaAsset;
use keepsake_storage::keys::generate_media_key;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::{
    extract_multipart_file, sanitize_filename, validate_content_type, validate_file_extension,
    validate_file_size,
};

/// Upload photo handler
///
/// Writes the original to local storage, then lets the uploader decide whether the
/// remote backend holds the canonical copy. A remote failure is not an error here:
/// the asset is recorded as a local fallback.
///
/// # Returns
/// `MediaAsset` on success (HTTP 201 Created)
///
/// # Errors
/// - `AppError::InvalidInput` - Missing file, bad extension or content type
/// - `AppError::PayloadTooLarge` - File exceeds size limit
/// - `AppError::Storage` - Local write failure
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_photo"))]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<MediaAsset>), HttpAppError> {
    let file = extract_multipart_file(multipart).await?;

    validate_file_size(file.data.len(), state.config.max_file_size_bytes())?;
    let extension = validate_file_extension(&file.filename, state.config.allowed_extensions())?;
    let content_type =
        validate_content_type(&file.content_type, state.config.allowed_content_types())?;

    let key = generate_media_key(&extension);
    let (key, local_url) = state.local_storage.put(&key, &file.data).await?;
    let source_path = state.local_storage.path_for(&key)?;

    let outcome = state.uploader.store(&source_path).await;

    let asset = MediaAsset::new(
        key,
        local_url,
        outcome.into_stored_url(),
        sanitize_filename(&file.filename),
        content_type,
        file.data.len() as u64,
    );

    tracing::info!(
        media_id = %asset.id,
        source_path = %asset.source_path,
        backend = %asset.backend,
        size_bytes = asset.size_bytes,
        "Photo uploaded"
    );

    Ok((StatusCode::CREATED, Json(asset)))
}
