pub mod delivery;
pub mod media_asset;
pub mod transform;

pub use delivery::{is_image_path, negotiate_format, ImageFormat};
pub use media_asset::MediaAsset;
pub use transform::{clamp_dimension, clamp_dimensions, CropMode, QualityPolicy, TransformSpec};
