//! Pipeline-wide constants.

/// Hard ceiling for any requested width or height, in pixels.
pub const MAX_DIMENSION: u32 = 2048;

/// Bounding box applied to images stored on the remote backend.
pub const DEFAULT_UPLOAD_BOUND: u32 = 1200;

/// Logical folder on the remote backend holding this application's media.
pub const DEFAULT_REMOTE_FOLDER: &str = "wedding-photos";

/// Local key prefix for photo quest uploads.
pub const LOCAL_MEDIA_PREFIX: &str = "photo-quest";

/// Cache policy for delivered images. Assets are never mutated in place.
pub const DELIVERY_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Representation varies with the negotiated format and encoding.
pub const DELIVERY_VARY: &str = "Accept-Encoding, Accept";

/// Path extensions the delivery middleware treats as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "heic", "heif"];

/// Content types accepted by the upload endpoint.
pub const IMAGE_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/heic",
    "image/heif",
];
