//! Full pixel decode at a chosen sample factor.

use image::{ImageReader, Limits};
use log::debug;

use super::resize::downsample;
use super::{DecodeError, DecodedImage, FilterType, SampleFactor};
use crate::source::ImageSource;

/// Options for the full decode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Filter used to shrink the decoded pixels.
    pub filter: FilterType,
    /// Upper bound on decoder allocations, in bytes. `None` disables it.
    pub max_decode_bytes: Option<u64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            filter: FilterType::default(),
            max_decode_bytes: Limits::default().max_alloc,
        }
    }
}

impl DecodeOptions {
    fn limits(&self) -> Limits {
        let mut limits = Limits::no_limits();
        limits.max_alloc = self.max_decode_bytes;
        limits
    }
}

/// Decode every pixel of `source` and shrink the result by `factor`.
///
/// This is a full-resolution decode followed by a resize. The factor only
/// sets the output size; it does not lower peak memory, which is bounded
/// solely by `DecodeOptions::max_decode_bytes`.
///
/// The format is guessed from the content, so the same call handles JPEG
/// and PNG captures. Orientation is not applied here.
///
/// # Errors
///
/// Returns `DecodeError::SourceUnreadable` if the source cannot be opened,
/// is not a supported image, is corrupted, or exceeds the allocation limit.
pub fn decode_sampled<S: ImageSource + ?Sized>(
    source: &S,
    factor: SampleFactor,
    options: &DecodeOptions,
) -> Result<DecodedImage, DecodeError> {
    let reader = source
        .open()
        .map_err(|e| DecodeError::SourceUnreadable(e.to_string()))?;

    let mut reader = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| DecodeError::SourceUnreadable(e.to_string()))?;
    reader.limits(options.limits());

    let img = reader
        .decode()
        .map_err(|e| DecodeError::SourceUnreadable(e.to_string()))?;

    let full = DecodedImage::from_rgb_image(img.into_rgb8());
    debug!(
        "{}: decoded {}x{}, sample factor {}",
        source.describe(),
        full.width,
        full.height,
        factor.get()
    );

    downsample(full, factor, options.filter)
}
