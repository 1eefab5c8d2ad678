//! Route configuration and setup

use crate::constants::{API_PREFIX, MEDIA_ROUTE_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use keepsake_core::Config;
use keepsake_infra::{image_delivery_middleware, request_id_middleware};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            &format!("{}/photos", API_PREFIX),
            post(handlers::photo_upload::upload_photo),
        )
        .route(
            &format!("{}/{{*key}}", MEDIA_ROUTE_PREFIX),
            get(handlers::media_serve::serve_media),
        )
        // Size is enforced by RequestBodyLimitLayer and the upload handler.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            config.max_file_size_bytes() + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(axum::middleware::from_fn(image_delivery_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::HEAD, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        if config.is_production() {
            tracing::warn!("CORS configured to allow all origins - not recommended for production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
