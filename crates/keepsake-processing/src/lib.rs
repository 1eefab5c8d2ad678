//! Keepsake Processing Library
//!
//! Image work for delivery: bounded resizing and encoding into the format
//! negotiated from the request's `Accept` header.

pub mod compression;
pub mod error;
pub mod resize;
pub mod transcoder;

pub use compression::ImageEncoder;
pub use error::ProcessingError;
pub use resize::{BoundingBox, ImageResize};
pub use transcoder::{render_for_delivery, DeliveryRequest, RenderedImage};
