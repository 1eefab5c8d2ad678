//! Render a stored image for one delivery request.
//!
//! The target format comes from the same negotiation the delivery middleware uses,
//! so the bytes served always match the `Content-Type` it advertises.

use crate::compression::{codec_format, ImageEncoder};
use crate::error::{ProcessingError, ProcessingResult};
use crate::resize::{BoundingBox, ImageResize};
use image::GenericImageView;
use keepsake_core::{negotiate_format, ImageFormat};
use std::time::Instant;

/// What a client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryRequest {
    /// Negotiated format, `None` to keep the stored one.
    pub target: Option<ImageFormat>,
    pub bounds: BoundingBox,
}

impl DeliveryRequest {
    pub fn new(accept: Option<&str>, width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            target: negotiate_format(accept),
            bounds: BoundingBox::new(width, height),
        }
    }

    /// Whether the stored bytes can be served as they are.
    pub fn is_passthrough(&self, source: ImageFormat) -> bool {
        self.target.map(|t| t == source).unwrap_or(true) && self.bounds.is_unbounded()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub transcoded: bool,
}

/// Produce the representation for `request` from the stored `data`.
///
/// Returns the original bytes untouched when no conversion is needed. Fails when the
/// source can not be decoded or the target can not be encoded; callers then serve the
/// original.
pub fn render_for_delivery(
    data: Vec<u8>,
    source: ImageFormat,
    request: DeliveryRequest,
) -> ProcessingResult<RenderedImage> {
    if request.is_passthrough(source) {
        return Ok(RenderedImage {
            data,
            format: source,
            transcoded: false,
        });
    }

    let codec = codec_format(source).ok_or_else(|| {
        ProcessingError::UnsupportedFormat(format!("{} can not be decoded", source.mime_type()))
    })?;

    let start = Instant::now();
    let img = image::load_from_memory_with_format(&data, codec)
        .map_err(|e| ProcessingError::Decode(e.to_string()))?;
    let (orig_width, orig_height) = img.dimensions();

    let img = ImageResize::resize_to_fit(img, request.bounds);
    let target = request.target.unwrap_or(source);
    let encoded = ImageEncoder::encode(&img, target)?;

    tracing::debug!(
        source = source.mime_type(),
        target = target.mime_type(),
        orig_width,
        orig_height,
        width = img.width(),
        height = img.height(),
        size_bytes = encoded.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Rendered image for delivery"
    );

    Ok(RenderedImage {
        data: encoded,
        format: target,
        transcoded: true,
    })
}
