//! Test fixtures: real image blobs built with the `image` crate.

#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use std::io::Cursor;

/// PNG of the given size with a horizontal gradient.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        Rgb([(x * 255 / width.max(1)) as u8, 120, 200])
    });
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buffer
}

/// Bytes with a HEIC brand that no decoder here understands.
pub fn create_fake_heic() -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x00, 0x18];
    data.extend_from_slice(b"ftypheic");
    data.extend_from_slice(&[0u8; 16]);
    data
}
