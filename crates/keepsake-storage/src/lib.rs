//! Keepsake Storage Library
//!
//! Storage for uploaded photos. Two backends are interchangeable from the caller's
//! point of view:
//!
//! - **Remote**: a managed media service ([`CloudinaryBackend`]) that stores, transforms
//!   and serves images by URL.
//! - **Local fallback**: the application's own filesystem ([`LocalStorage`]).
//!
//! The [`Uploader`] picks between them per upload and never fails: a missing or
//! failing remote backend yields [`StoreOutcome::Fallback`].
//!
//! # Storage key format
//!
//! Local keys are `photo-quest/{uuid}.{ext}`. Keys must not contain `..` or a leading
//! `/`. Key generation is centralized in the `keys` module.

pub mod cloudinary;
pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;
pub mod uploader;

// Re-export commonly used types
pub use cloudinary::CloudinaryBackend;
pub use factory::{create_local_storage, create_media_backend, create_uploader};
pub use keepsake_core::StorageBackend;
pub use local::{LocalStorage, StoredFileMetadata};
pub use traits::{MediaBackend, RemoteAsset, StorageError, StorageResult, UploadOptions};
pub use uploader::{StoreOutcome, Uploader};
