//! Image format detection and `Accept`-driven negotiation.

use serde::{Deserialize, Serialize};

use crate::constants::IMAGE_EXTENSIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Heif,
    Avif,
}

impl ImageFormat {
    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "webp" => Some(ImageFormat::WebP),
            "gif" => Some(ImageFormat::Gif),
            "heic" | "heif" => Some(ImageFormat::Heif),
            "avif" => Some(ImageFormat::Avif),
            _ => None,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        path_extension(path).and_then(Self::from_extension)
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Heif => "image/heif",
            ImageFormat::Avif => "image/avif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::WebP => "webp",
            ImageFormat::Gif => "gif",
            ImageFormat::Heif => "heic",
            ImageFormat::Avif => "avif",
        }
    }
}

fn path_extension(path: &str) -> Option<&str> {
    // Ignore any query string a caller may have left on the path.
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let file_name = path.rsplit('/').next()?;
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Whether a request path names an image resource the delivery middleware handles.
pub fn is_image_path(path: &str) -> bool {
    path_extension(path)
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Pick the delivery format from an `Accept` header: AVIF, then WebP, otherwise `None`
/// (keep the original representation).
///
/// Media ranges are matched by name; a `q=0` parameter explicitly refuses a type.
pub fn negotiate_format(accept: Option<&str>) -> Option<ImageFormat> {
    let accept = accept?;
    let accepts = |mime: &str| {
        accept.split(',').any(|range| {
            let mut parts = range.split(';').map(str::trim);
            let name_matches = parts
                .next()
                .map(|name| name.eq_ignore_ascii_case(mime))
                .unwrap_or(false);
            let refused = parts.any(|param| {
                param
                    .strip_prefix("q=")
                    .and_then(|q| q.trim().parse::<f32>().ok())
                    .map(|q| q <= 0.0)
                    .unwrap_or(false)
            });
            name_matches && !refused
        })
    };

    if accepts("image/avif") {
        Some(ImageFormat::Avif)
    } else if accepts("image/webp") {
        Some(ImageFormat::WebP)
    } else {
        None
    }
}
