use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};
use keepsake_core::{AppError, ImageFormat};
use keepsake_infra::{format_http_date, NegotiationSkipped};
use keepsake_processing::{render_for_delivery, DeliveryRequest, RenderedImage};
use serde::{Deserialize, Deserializer};

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::conditional::{is_not_modified, representation_etag};

/// Requested bounds. Values that do not parse never reject the request.
#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    #[serde(default, alias = "width", deserialize_with = "lenient_dimension")]
    pub w: Option<u32>,
    #[serde(default, alias = "height", deserialize_with = "lenient_dimension")]
    pub h: Option<u32>,
}

/// Parse a query dimension: digits only, saturating at `u32::MAX`. Anything else
/// (negative, fractional, garbage) is treated as unspecified.
fn parse_dimension(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let parsed = value.parse::<u64>().unwrap_or(u64::MAX);
    Some(u32::try_from(parsed).unwrap_or(u32::MAX))
}

fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_dimension))
}

/// Representation tag folded into the ETag so each variant validates on its own.
fn representation_tag(request: &DeliveryRequest, transcode: bool) -> String {
    if !transcode {
        return "original".to_string();
    }
    let dimension = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();
    format!(
        "{}:w{}:h{}",
        request
            .target
            .map(|format| format.extension())
            .unwrap_or("original"),
        dimension(request.bounds.width()),
        dimension(request.bounds.height()),
    )
}

fn validator_headers(
    builder: axum::http::response::Builder,
    etag: &str,
    last_modified: DateTime<Utc>,
) -> axum::http::response::Builder {
    builder
        .header(header::ETAG, etag)
        .header(header::LAST_MODIFIED, format_http_date(last_modified))
}

/// Serve a locally stored photo
///
/// Resizes to `?w=&h=` (clamped, never upscaled) and transcodes to the format
/// negotiated from `Accept`. When that is not possible the original bytes are served
/// and the response is marked so the delivery middleware keeps their content type.
#[tracing::instrument(skip(state, query, headers), fields(operation = "serve_media"))]
pub async fn serve_media(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<MediaQuery>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let source_format = ImageFormat::from_path(&key)
        .ok_or_else(|| AppError::NotFound(format!("Media not found: {}", key)))?;

    let metadata = state.local_storage.metadata(&key).await?;
    let data = state.local_storage.read(&key).await?;
    let last_modified: DateTime<Utc> = metadata.modified.into();

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());
    let request = DeliveryRequest::new(accept, query.w, query.h);
    let transcode = state.config.delivery_transcode();

    let etag = representation_etag(&data, &representation_tag(&request, transcode));

    if is_not_modified(&headers, &etag, last_modified) {
        let response = validator_headers(Response::builder(), &etag, last_modified)
            .status(StatusCode::NOT_MODIFIED)
            .body(Body::empty())
            .map_err(|e| AppError::Internal(e.to_string()))?;
        return Ok(response);
    }

    let (rendered, skipped) = if !transcode {
        (
            RenderedImage {
                data,
                format: source_format,
                transcoded: false,
            },
            true,
        )
    } else if request.is_passthrough(source_format) {
        (render_for_delivery(data, source_format, request)?, false)
    } else {
        let original = data.clone();
        let result =
            tokio::task::spawn_blocking(move || render_for_delivery(data, source_format, request))
                .await
                .map_err(|e| AppError::Internal(format!("Render task failed: {}", e)))?;

        match result {
            Ok(rendered) => (rendered, false),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    key = %key,
                    "Serving original bytes, conversion not possible"
                );
                (
                    RenderedImage {
                        data: original,
                        format: source_format,
                        transcoded: false,
                    },
                    true,
                )
            }
        }
    };

    let mut response = validator_headers(Response::builder(), &etag, last_modified)
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static(rendered.format.mime_type()),
        )
        .header(header::CONTENT_LENGTH, rendered.data.len())
        .body(Body::from(rendered.data))
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if skipped {
        response.extensions_mut().insert(NegotiationSkipped);
    }

    Ok(response)
}
