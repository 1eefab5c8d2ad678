//! Shared HTTP middleware

pub mod image_delivery;
pub mod request_id;

pub use image_delivery::{
    apply_delivery_headers, format_http_date, image_delivery_middleware, parse_http_date,
    NegotiationSkipped,
};
pub use request_id::{get_request_id, request_id_middleware, RequestId};
