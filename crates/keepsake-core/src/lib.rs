//! Keepsake Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! the photo ingestion and delivery pipeline: the uploader, the delivery middleware
//! and the HTTP service that wires them together.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, PipelineConfig, RemoteMediaConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    clamp_dimension, clamp_dimensions, is_image_path, negotiate_format, CropMode, ImageFormat,
    MediaAsset, QualityPolicy, TransformSpec,
};
pub use storage_types::StorageBackend;
