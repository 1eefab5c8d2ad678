//! Keepsake API Library
//!
//! HTTP service for the photo pipeline: the upload endpoint, local media delivery and
//! application setup.

pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
mod utils;

pub use error::HttpAppError;
pub use keepsake_infra::ErrorResponse;
