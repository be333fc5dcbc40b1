//! Shrinking decoded images by a sample factor.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType, SampleFactor};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidBounds` for a zero target side and
/// `DecodeError::MalformedBuffer` if the pixel buffer does not match its
/// dimensions.
pub fn resize(
    image: DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidBounds { width, height });
    }

    // Fast path: if dimensions match, hand the buffer back
    if image.width == width && image.height == height {
        return Ok(image);
    }

    let malformed = DecodeError::MalformedBuffer {
        width: image.width,
        height: image.height,
        len: image.pixels.len(),
    };
    let rgb_image = image.into_rgb_image().ok_or(malformed)?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Shrink an image by `factor`, flooring each side.
///
/// A factor of 1 and empty images are passed through untouched.
pub fn downsample(
    image: DecodedImage,
    factor: SampleFactor,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if factor == SampleFactor::ONE || image.is_empty() {
        return Ok(image);
    }

    let target = factor.apply(image.dimensions());
    resize(image, target.width, target.height, filter)
}
