//! Encoded image fixtures shared by the unit tests.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::decode::DecodedImage;

/// Image where every pixel value encodes its own position.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 251) as u8])
    })
}

/// Decoded image where every pixel is unique for sizes up to 256x256.
pub fn labelled_image(width: u32, height: u32) -> DecodedImage {
    DecodedImage::from_rgb_image(gradient_image(width, height))
}

pub fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .expect("fixture encoding failed");
    bytes
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(&gradient_image(width, height), ImageFormat::Jpeg)
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(&gradient_image(width, height), ImageFormat::Png)
}

/// Minimal big-endian EXIF APP1 segment holding only an orientation tag.
pub fn exif_segment(orientation: u16) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(b"Exif\0\0");
    // TIFF header: "MM", magic 42, IFD0 at offset 8
    payload.extend_from_slice(&[0x4D, 0x4D, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
    // One entry: tag 0x0112 (Orientation), type SHORT, count 1
    payload.extend_from_slice(&[0x00, 0x01]);
    payload.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
    payload.extend_from_slice(&orientation.to_be_bytes());
    payload.extend_from_slice(&[0x00, 0x00]);
    // No next IFD
    payload.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let length = (payload.len() + 2) as u16;
    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&length.to_be_bytes());
    segment.extend_from_slice(&payload);
    segment
}

/// Insert an APP1 segment right after the JPEG start-of-image marker.
pub fn with_app1(jpeg: &[u8], segment: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "fixture is not a JPEG");
    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// JPEG whose EXIF block records the given orientation value.
pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    with_app1(&jpeg(width, height), &exif_segment(orientation))
}

/// JPEG with an APP1 segment that claims to be EXIF but holds garbage.
pub fn jpeg_with_corrupt_exif(width: u32, height: u32) -> Vec<u8> {
    let mut segment = vec![0xFF, 0xE1, 0x00, 0x0E];
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&[0x58, 0x58, 0x00, 0x2A, 0xFF, 0xFF]);
    with_app1(&jpeg(width, height), &segment)
}
