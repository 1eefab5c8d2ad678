//! Common utilities for the photo upload handler

use axum::extract::Multipart;
use keepsake_core::AppError;

const MAX_FILENAME_LENGTH: usize = 255;

/// A file received in a multipart upload.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Extract file data, filename, and content type from multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        if file.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        file = Some(UploadedFile {
            data: data.to_vec(),
            filename,
            content_type,
        });
    }

    file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size == 0 {
        return Err(AppError::InvalidInput("File is empty".to_string()));
    }

    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size.div_ceil(1024 * 1024)
        )));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Validate content type against allowlist. Compares normalized MIME type only (no parameter bypass).
pub fn validate_content_type(content_type: &str, allowed_types: &[String]) -> Result<String, AppError> {
    let normalized = normalize_mime_type(content_type);
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(normalized)
}

/// Validate file extension and return it lowercased
pub fn validate_file_extension(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<String, AppError> {
    let extension = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Missing file extension (filename: {})",
                filename
            )))
        }
    };

    if !allowed_extensions.contains(&extension) {
        return Err(AppError::InvalidInput(format!(
            "Invalid file extension. Allowed extensions: {}",
            allowed_extensions.join(", ")
        )));
    }

    Ok(extension)
}

/// Keep only the final path component of a client filename and replace unusual
/// characters. The result is only recorded, never used as a path.
pub fn sanitize_filename(filename: &str) -> String {
    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        return "file".to_string();
    }

    sanitized
}
