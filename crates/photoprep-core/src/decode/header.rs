//! Header-only inspection and sample factor estimation.
//!
//! Only the image header is parsed here; the pixel data is never touched.
//! This keeps the estimate cheap even for full-resolution camera output.

use image::ImageReader;
use log::{debug, warn};

use super::{BoundingBox, DecodeError, Fallback, ImageDimensions, SampleFactor};
use crate::source::ImageSource;

/// Read the declared width and height of an image without decoding it.
///
/// # Errors
///
/// Returns `DecodeError::SourceUnreadable` if the source cannot be opened,
/// the format is not recognized, or the header is missing or truncated.
pub fn read_dimensions<S: ImageSource + ?Sized>(
    source: &S,
) -> Result<ImageDimensions, DecodeError> {
    let reader = source
        .open()
        .map_err(|e| DecodeError::SourceUnreadable(e.to_string()))?;

    let (width, height) = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| DecodeError::SourceUnreadable(e.to_string()))?
        .into_dimensions()
        .map_err(|e| DecodeError::SourceUnreadable(e.to_string()))?;

    Ok(ImageDimensions::new(width, height))
}

/// Compute the power-of-two decode factor for an image of `dims`.
///
/// Returns 1 when the image already fits. Otherwise the factor keeps
/// doubling while half of each side, divided by the current factor, still
/// covers the requested side.
///
/// For a 4000x3000 image and a 1024x1024 box: 1500 and 2000 both cover
/// 1024 at factor 1, so the factor doubles to 2; at factor 2, 750 no
/// longer covers 1024, so 2 is returned.
pub fn calculate_sample_size(dims: ImageDimensions, bounds: BoundingBox) -> SampleFactor {
    if dims.fits_within(bounds) {
        return SampleFactor::ONE;
    }

    let half_width = dims.width / 2;
    let half_height = dims.height / 2;
    let mut factor = SampleFactor::ONE;

    while half_height / factor.get() >= bounds.height()
        && half_width / factor.get() >= bounds.width()
    {
        match factor.doubled() {
            Some(next) => factor = next,
            None => break,
        }
    }

    factor
}

/// Estimate the decode factor for `source` against `bounds`.
///
/// An unreadable header is not an error here: it is logged and treated as
/// a 0x0 image, which yields a factor of 1 reported as
/// [`Fallback::Defaulted`].
pub fn estimate_sample_size<S: ImageSource + ?Sized>(
    source: &S,
    bounds: BoundingBox,
) -> Fallback<SampleFactor> {
    match read_dimensions(source) {
        Ok(dims) => {
            let factor = calculate_sample_size(dims, bounds);
            debug!(
                "{}: {}x{} against {}x{} -> sample factor {}",
                source.describe(),
                dims.width,
                dims.height,
                bounds.width(),
                bounds.height(),
                factor.get()
            );
            Fallback::Found(factor)
        }
        Err(reason) => {
            warn!(
                "{}: could not read image header, decoding at full size: {}",
                source.describe(),
                reason
            );
            Fallback::Defaulted {
                value: calculate_sample_size(ImageDimensions::UNKNOWN, bounds),
                reason,
            }
        }
    }
}
