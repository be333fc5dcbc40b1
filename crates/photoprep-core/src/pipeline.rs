//! End-to-end preparation of a captured photo for display.
//!
//! Runs the steps in order: estimate the sample factor from the header,
//! decode at that factor, read the EXIF orientation, rotate upright. The
//! header and orientation reads degrade to defaults; the decode and the
//! rotation are the only steps whose failures reach the caller.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::decode::{
    decode_sampled, estimate_sample_size, read_orientation, BoundingBox, DecodeError,
    DecodeOptions, DecodedImage, FilterType, Orientation, SampleFactor,
};
use crate::source::ImageSource;
use crate::transform::normalize;

/// Per-call settings for [`prepare_for_display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Box the decoded image should cover.
    pub bounds: BoundingBox,
    /// Filter used when shrinking by the sample factor.
    pub filter: FilterType,
    /// Decoder allocation limit in bytes (`None` for no limit).
    pub max_decode_bytes: Option<u64>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        let decode = DecodeOptions::default();
        Self {
            bounds: BoundingBox::default(),
            filter: decode.filter,
            max_decode_bytes: decode.max_decode_bytes,
        }
    }
}

impl PipelineOptions {
    /// Default options with a custom bounding box.
    pub fn with_bounds(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            filter: self.filter,
            max_decode_bytes: self.max_decode_bytes,
        }
    }
}

/// A display-ready image and how it was produced.
#[derive(Debug)]
pub struct PreparedImage {
    /// Upright, downsampled pixels.
    pub image: DecodedImage,
    /// Factor the image was decoded at.
    pub sample_factor: SampleFactor,
    /// Orientation that was corrected.
    pub orientation: Orientation,
    /// Reasons for every step that fell back to a default.
    pub fallbacks: Vec<DecodeError>,
}

impl PreparedImage {
    /// True when a header or metadata read had to be defaulted.
    pub fn degraded(&self) -> bool {
        !self.fallbacks.is_empty()
    }
}

/// Prepare the image behind `source` for display.
///
/// # Errors
///
/// Returns `DecodeError::SourceUnreadable` if the pixels cannot be decoded
/// and `DecodeError::RotationFailed` if the decoded buffer cannot be
/// rotated. Both are logged before being returned.
pub fn prepare_for_display<S: ImageSource + ?Sized>(
    source: &S,
    options: &PipelineOptions,
) -> Result<PreparedImage, DecodeError> {
    let result = run(source, options);
    match &result {
        Ok(prepared) => info!(
            "{}: prepared {}x{} image (sample factor {}, {} degrees{})",
            source.describe(),
            prepared.image.width,
            prepared.image.height,
            prepared.sample_factor.get(),
            prepared.orientation.rotation_angle().degrees(),
            if prepared.degraded() { ", degraded" } else { "" }
        ),
        Err(e) => warn!("{}: could not prepare image: {}", source.describe(), e),
    }
    result
}

fn run<S: ImageSource + ?Sized>(
    source: &S,
    options: &PipelineOptions,
) -> Result<PreparedImage, DecodeError> {
    let mut fallbacks = Vec::new();

    let (sample_factor, reason) = estimate_sample_size(source, options.bounds).into_parts();
    fallbacks.extend(reason);

    let decoded = decode_sampled(source, sample_factor, &options.decode_options())?;

    let (orientation, reason) = read_orientation(source).into_parts();
    fallbacks.extend(reason);

    let image = normalize(decoded, orientation)?;

    Ok(PreparedImage {
        image,
        sample_factor,
        orientation,
        fallbacks,
    })
}
