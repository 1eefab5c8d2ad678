//! Keepsake Infrastructure Library
//!
//! Shared infrastructure for the HTTP service:
//! - Middleware (image delivery headers, request ID)
//! - Telemetry initialization
//! - Error response body

pub mod error;
pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use error::ErrorResponse;
pub use middleware::{
    apply_delivery_headers, format_http_date, get_request_id, image_delivery_middleware,
    parse_http_date, request_id_middleware, NegotiationSkipped, RequestId,
};
pub use telemetry::init_telemetry;
