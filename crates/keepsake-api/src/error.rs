//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain errors convert
//! into `AppError` first so every failure renders the same `ErrorResponse` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keepsake_core::{AppError, ErrorMetadata, LogLevel};
use keepsake_infra::ErrorResponse;
use keepsake_processing::ProcessingError;
use keepsake_storage::StorageError;

static CACHED_IS_PRODUCTION: std::sync::LazyLock<bool> = std::sync::LazyLock::new(|| {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
});

/// Wrapper type for AppError to implement IntoResponse
///
/// Needed because of the orphan rule: `IntoResponse` and `AppError` are both foreign
/// to this crate.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::UploadFailed(msg)
            | StorageError::DownloadFailed(msg)
            | StorageError::BackendError(msg)
            | StorageError::InvalidResponse(msg) => AppError::Storage(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        HttpAppError(AppError::ImageProcessing(err.to_string()))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn error_response(app_error: &AppError, is_production: bool) -> ErrorResponse {
    // Details only outside production, and never for sensitive errors.
    let show_details = !is_production && !app_error.is_sensitive();

    ErrorResponse {
        error: app_error.client_message(),
        details: show_details.then(|| app_error.detailed_message()),
        error_type: show_details.then(|| app_error.error_type().to_string()),
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (
            status,
            Json(error_response(app_error, *CACHED_IS_PRODUCTION)),
        )
            .into_response()
    }
}
