//! Bounded transform directives and the dimension clamp shared by upload and delivery.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_UPLOAD_BOUND, MAX_DIMENSION};

/// Clamp a single requested dimension to [`MAX_DIMENSION`].
///
/// `None` and `Some(0)` both mean "unspecified" and yield `None`; a zero never reaches
/// a resizer.
pub fn clamp_dimension(value: Option<u32>) -> Option<u32> {
    match value {
        None | Some(0) => None,
        Some(v) => Some(v.min(MAX_DIMENSION)),
    }
}

/// Clamp a requested width/height pair. Each side is handled independently.
pub fn clamp_dimensions(width: Option<u32>, height: Option<u32>) -> (Option<u32>, Option<u32>) {
    (clamp_dimension(width), clamp_dimension(height))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Shrink to fit inside the box, keep aspect ratio, never upscale.
    #[default]
    Limit,
}

impl CropMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CropMode::Limit => "limit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPolicy {
    #[default]
    Auto,
}

impl QualityPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            QualityPolicy::Auto => "auto",
        }
    }
}

/// Transform applied to an asset stored on the remote backend.
///
/// Fields are private so the 2048px ceiling can not be bypassed; build one with
/// [`TransformSpec::bounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSpec {
    max_width: u32,
    max_height: u32,
    crop: CropMode,
    quality: QualityPolicy,
}

impl TransformSpec {
    /// Bounding box of at most `max_width` x `max_height`, each clamped to the ceiling.
    /// A zero side falls back to the default upload bound rather than being dropped.
    pub fn bounded(max_width: u32, max_height: u32) -> Self {
        let max_width = clamp_dimension(Some(max_width)).unwrap_or(DEFAULT_UPLOAD_BOUND);
        let max_height = clamp_dimension(Some(max_height)).unwrap_or(DEFAULT_UPLOAD_BOUND);
        Self {
            max_width,
            max_height,
            crop: CropMode::Limit,
            quality: QualityPolicy::Auto,
        }
    }

    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    pub fn crop(&self) -> CropMode {
        self.crop
    }

    pub fn quality(&self) -> QualityPolicy {
        self.quality
    }

    /// Chained transformation string understood by the remote media service,
    /// e.g. `c_limit,w_1200,h_1200/q_auto`.
    pub fn to_transformation_string(&self) -> String {
        format!(
            "c_{},w_{},h_{}/q_{}",
            self.crop.as_str(),
            self.max_width,
            self.max_height,
            self.quality.as_str()
        )
    }
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self::bounded(DEFAULT_UPLOAD_BOUND, DEFAULT_UPLOAD_BOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_dimensions_caps_oversized_values() {
        assert_eq!(clamp_dimensions(Some(4000), Some(9999)), (Some(2048), Some(2048)));
        assert_eq!(clamp_dimensions(Some(2048), Some(2049)), (Some(2048), Some(2048)));
        assert_eq!(clamp_dimensions(Some(u32::MAX), Some(10)), (Some(2048), Some(10)));
    }

    #[test]
    fn test_clamp_dimensions_keeps_unspecified_absent() {
        assert_eq!(clamp_dimensions(None, None), (None, None));
        assert_eq!(clamp_dimensions(Some(640), None), (Some(640), None));
        assert_eq!(clamp_dimensions(None, Some(480)), (None, Some(480)));
        assert_eq!(clamp_dimension(Some(0)), None);
    }

    #[test]
    fn test_transform_spec_default_is_1200_limit_auto() {
        let spec = TransformSpec::default();
        assert_eq!(spec.max_width(), 1200);
        assert_eq!(spec.max_height(), 1200);
        assert_eq!(spec.crop(), CropMode::Limit);
        assert_eq!(spec.quality(), QualityPolicy::Auto);
        assert_eq!(spec.to_transformation_string(), "c_limit,w_1200,h_1200/q_auto");
    }

    #[test]
    fn test_transform_spec_clamps_to_ceiling() {
        let spec = TransformSpec::bounded(5000, 3000);
        assert_eq!(spec.max_width(), 2048);
        assert_eq!(spec.max_height(), 2048);
    }
}
