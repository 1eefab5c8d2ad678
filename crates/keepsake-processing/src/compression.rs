use crate::error::{ProcessingError, ProcessingResult};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use keepsake_core::ImageFormat;
use std::io::Cursor;

// Balanced presets: roughly the size/quality trade-off of `q_auto`.
const JPEG_QUALITY: u8 = 75;
const WEBP_QUALITY: f32 = 80.0;
const AVIF_QUALITY: f32 = 70.0;
const AVIF_SPEED: u8 = 6;

/// Codec used by the `image` crate for a delivery format, if it has one.
pub(crate) fn codec_format(format: ImageFormat) -> Option<image::ImageFormat> {
    match format {
        ImageFormat::Jpeg => Some(image::ImageFormat::Jpeg),
        ImageFormat::Png => Some(image::ImageFormat::Png),
        ImageFormat::WebP => Some(image::ImageFormat::WebP),
        ImageFormat::Gif => Some(image::ImageFormat::Gif),
        ImageFormat::Avif => Some(image::ImageFormat::Avif),
        ImageFormat::Heif => None,
    }
}

/// Encodes decoded images into delivery formats
pub struct ImageEncoder;

impl ImageEncoder {
    pub fn encode(img: &DynamicImage, format: ImageFormat) -> ProcessingResult<Vec<u8>> {
        match format {
            ImageFormat::Jpeg => Self::encode_jpeg(img),
            ImageFormat::Png => Self::encode_with_image(img, image::ImageFormat::Png),
            ImageFormat::Gif => Self::encode_with_image(
                &DynamicImage::ImageRgba8(img.to_rgba8()),
                image::ImageFormat::Gif,
            ),
            ImageFormat::WebP => Ok(Self::encode_webp(img)),
            ImageFormat::Avif => Self::encode_avif(img),
            ImageFormat::Heif => Err(ProcessingError::UnsupportedFormat(
                "HEIF encoding is not available".to_string(),
            )),
        }
    }

    fn encode_jpeg(img: &DynamicImage) -> ProcessingResult<Vec<u8>> {
        // JPEG has no alpha channel.
        let rgb_img = img.to_rgb8();
        let mut buffer = Vec::new();

        JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
            .encode_image(&rgb_img)
            .map_err(|e| ProcessingError::Encode(format!("JPEG: {}", e)))?;

        Ok(buffer)
    }

    fn encode_with_image(img: &DynamicImage, format: image::ImageFormat) -> ProcessingResult<Vec<u8>> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(|e| ProcessingError::Encode(format!("{:?}: {}", format, e)))?;
        Ok(buffer)
    }

    fn encode_webp(img: &DynamicImage) -> Vec<u8> {
        let (width, height) = img.dimensions();
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        encoder.encode(WEBP_QUALITY).to_vec()
    }

    fn encode_avif(img: &DynamicImage) -> ProcessingResult<Vec<u8>> {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let encoder = ravif::Encoder::new()
            .with_quality(AVIF_QUALITY)
            .with_alpha_quality(AVIF_QUALITY)
            .with_speed(AVIF_SPEED);

        let encoded = if img.color().has_alpha() {
            let rgba_data: Vec<rgb::RGBA8> = img
                .to_rgba8()
                .as_raw()
                .chunks_exact(4)
                .map(|chunk| rgb::RGBA8::new(chunk[0], chunk[1], chunk[2], chunk[3]))
                .collect();
            encoder.encode_rgba(ravif::Img::new(rgba_data.as_slice(), width, height))
        } else {
            let rgb_data: Vec<rgb::RGB8> = img
                .to_rgb8()
                .as_raw()
                .chunks_exact(3)
                .map(|chunk| rgb::RGB8::new(chunk[0], chunk[1], chunk[2]))
                .collect();
            encoder.encode_rgb(ravif::Img::new(rgb_data.as_slice(), width, height))
        }
        .map_err(|e| ProcessingError::Encode(format!("AVIF: {}", e)))?;

        Ok(encoded.avif_file)
    }
}
