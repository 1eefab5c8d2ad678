use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use keepsake_core::clamp_dimensions;

/// Requested bounding box. Each side is already clamped to the dimension ceiling;
/// `None` leaves that side unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    width: Option<u32>,
    height: Option<u32>,
}

impl BoundingBox {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        let (width, height) = clamp_dimensions(width, height);
        Self { width, height }
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn is_unbounded(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Target size for a "limit" fit: shrink to fit inside the box, keep the aspect
    /// ratio, never upscale.
    pub fn fit_within(orig_width: u32, orig_height: u32, bounds: BoundingBox) -> (u32, u32) {
        if orig_width == 0 || orig_height == 0 {
            return (orig_width, orig_height);
        }

        let scale_width = bounds
            .width
            .map(|w| w as f64 / orig_width as f64)
            .unwrap_or(1.0);
        let scale_height = bounds
            .height
            .map(|h| h as f64 / orig_height as f64)
            .unwrap_or(1.0);
        let scale = scale_width.min(scale_height).min(1.0);

        if scale >= 1.0 {
            return (orig_width, orig_height);
        }

        let width = ((orig_width as f64 * scale).round() as u32).max(1);
        let height = ((orig_height as f64 * scale).round() as u32).max(1);
        (width, height)
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Resize to fit the box. Returns the image untouched when it already fits.
    pub fn resize_to_fit(img: DynamicImage, bounds: BoundingBox) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::fit_within(orig_width, orig_height, bounds);

        if (width, height) == (orig_width, orig_height) {
            return img;
        }

        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }
}
