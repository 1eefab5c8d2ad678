//! Cache and content-type policy for image responses.
//!
//! Activates on request paths ending in an image extension. Other responses pass
//! through without any header mutation.

use axum::http::{header, HeaderMap, HeaderValue, Response};
use axum::{extract::Request, middleware::Next};
use chrono::{DateTime, Utc};
use keepsake_core::constants::{DELIVERY_CACHE_CONTROL, DELIVERY_VARY};
use keepsake_core::{is_image_path, negotiate_format};

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Response extension set by handlers that could not produce the negotiated format.
/// The middleware then keeps the handler's `Content-Type` so it matches the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct NegotiationSkipped;

/// Format a timestamp as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn format_http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn insert_if_absent(headers: &mut HeaderMap, name: header::HeaderName, value: String) {
    if headers.contains_key(&name) {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(&value) {
        headers.insert(name, value);
    }
}

/// Apply the delivery policy to `response` for a request to `path` with `accept`.
///
/// Cache headers and validators go on every response for an image path. The
/// negotiated `Content-Type` is only written on successful responses, so error bodies
/// keep their own type.
pub fn apply_delivery_headers<B>(
    path: &str,
    accept: Option<&str>,
    response: &mut Response<B>,
    now: DateTime<Utc>,
) {
    if !is_image_path(path) {
        return;
    }

    let status = response.status();
    let skipped = response.extensions().get::<NegotiationSkipped>().is_some();
    let headers = response.headers_mut();

    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(DELIVERY_CACHE_CONTROL),
    );
    headers.insert(header::VARY, HeaderValue::from_static(DELIVERY_VARY));

    // Handlers that know the asset supply real validators; this is the fallback.
    insert_if_absent(headers, header::LAST_MODIFIED, format_http_date(now));
    insert_if_absent(
        headers,
        header::ETAG,
        format!("W/\"{:x}\"", now.timestamp_millis()),
    );

    if skipped || !status.is_success() {
        return;
    }

    if let Some(format) = negotiate_format(accept) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(format.mime_type()),
        );
    }
}

/// Image delivery middleware
pub async fn image_delivery_middleware(request: Request, next: Next) -> axum::response::Response {
    let path = request.uri().path().to_string();
    let accept = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut response = next.run(request).await;
    apply_delivery_headers(&path, accept.as_deref(), &mut response, Utc::now());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;
    use chrono::TimeZone;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/img/sample.png",
                get(|| async { ([(header::CONTENT_TYPE, "image/png")], "png bytes") }),
            )
            .route(
                "/img/validated.jpg",
                get(|| async {
                    (
                        [
                            (header::CONTENT_TYPE, "image/jpeg"),
                            (header::ETAG, "\"abc\""),
                            (header::LAST_MODIFIED, "Mon, 01 Jan 2024 00:00:00 GMT"),
                        ],
                        "jpeg bytes",
                    )
                }),
            )
            .route(
                "/img/original.heic",
                get(|| async {
                    let mut response =
                        ([(header::CONTENT_TYPE, "image/heif")], "heic bytes").into_response();
                    response.extensions_mut().insert(NegotiationSkipped);
                    response
                }),
            )
            .route(
                "/api/guests",
                get(|| async { ([(header::CONTENT_TYPE, "application/json")], "[]") }),
            )
            .layer(axum::middleware::from_fn(image_delivery_middleware))
    }

    async fn send(path: &str, accept: Option<&str>) -> axum::response::Response {
        let mut request = axum::http::Request::get(path);
        if let Some(accept) = accept {
            request = request.header(header::ACCEPT, accept);
        }
        app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_image_path_gets_cache_headers_and_avif() {
        let response = send("/img/sample.png", Some("image/avif,*/*")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "image/avif");
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );
        assert_eq!(headers[header::VARY], "Accept-Encoding, Accept");
        assert!(headers.contains_key(header::ETAG));
        assert!(headers.contains_key(header::LAST_MODIFIED));
    }

    #[tokio::test]
    async fn test_webp_when_avif_not_accepted() {
        let response = send("/img/sample.png", Some("image/webp,*/*")).await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/webp");
    }

    #[tokio::test]
    async fn test_content_type_unchanged_without_modern_formats() {
        let response = send("/img/sample.png", Some("image/png")).await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

        let response = send("/img/sample.png", None).await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_non_image_path_is_untouched() {
        let response = send("/api/guests", Some("image/avif,*/*")).await;

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert!(!headers.contains_key(header::CACHE_CONTROL));
        assert!(!headers.contains_key(header::VARY));
        assert!(!headers.contains_key(header::ETAG));
        assert!(!headers.contains_key(header::LAST_MODIFIED));
    }

    #[tokio::test]
    async fn test_handler_validators_are_kept() {
        let response = send("/img/validated.jpg", Some("image/webp")).await;

        let headers = response.headers();
        assert_eq!(headers[header::ETAG], "\"abc\"");
        assert_eq!(headers[header::LAST_MODIFIED], "Mon, 01 Jan 2024 00:00:00 GMT");
    }

    #[tokio::test]
    async fn test_skipped_negotiation_keeps_content_type() {
        let response = send("/img/original.heic", Some("image/avif,image/webp")).await;

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "image/heif");
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_image_gets_cache_policy_but_keeps_content_type() {
        let response = send("/img/missing.png", Some("image/avif")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let headers = response.headers();
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );
        assert_eq!(headers[header::VARY], "Accept-Encoding, Accept");
        assert!(headers.contains_key(header::ETAG));
        assert!(headers.contains_key(header::LAST_MODIFIED));
        assert_ne!(
            headers.get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"image/avif"[..])
        );
    }

    #[test]
    fn test_not_modified_keeps_content_type_unset() {
        let mut response = Response::new(());
        *response.status_mut() = StatusCode::NOT_MODIFIED;
        apply_delivery_headers("/a.png", Some("image/webp"), &mut response, Utc::now());

        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );
        assert!(!response.headers().contains_key(header::CONTENT_TYPE));
    }

    #[test]
    fn test_fallback_validators_use_response_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        let mut response = Response::new(());
        apply_delivery_headers("/a.gif", None, &mut response, now);

        assert_eq!(
            response.headers()[header::LAST_MODIFIED],
            "Sat, 01 Jun 2024 12:30:00 GMT"
        );
        assert_eq!(
            response.headers()[header::ETAG],
            format!("W/\"{:x}\"", now.timestamp_millis()).as_str()
        );
    }

    #[test]
    fn test_http_date_round_trip() {
        let now = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        let formatted = format_http_date(now);
        assert_eq!(formatted, "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(parse_http_date(&formatted), Some(now));
        assert_eq!(parse_http_date("yesterday"), None);
    }
}
