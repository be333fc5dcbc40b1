//! Photoprep Core - display preparation for captured photos
//!
//! This crate turns a full-resolution camera capture into an image that is
//! ready to show: it picks a memory-friendly power-of-two decode factor from
//! the image header, decodes at that factor, and rotates the pixels upright
//! according to the EXIF orientation.
//!
//! # Module Structure
//!
//! - `source` - Re-openable image sources (files, in-memory bytes)
//! - `decode` - Header inspection, sample factor estimation, orientation lookup, decoding
//! - `transform` - Right-angle rotation and orientation normalization
//! - `pipeline` - The complete capture-to-display flow
//!
//! # Logging
//!
//! Diagnostics go through the `log` facade. The crate never installs a
//! logger; degraded header and metadata reads are reported at `warn`.

pub mod decode;
pub mod pipeline;
pub mod source;
pub mod transform;

#[cfg(test)]
mod test_fixtures;

pub use decode::{
    calculate_sample_size, decode_sampled, estimate_sample_size, read_orientation, BoundingBox,
    DecodeError, DecodedImage, Fallback, Orientation, RotationAngle, SampleFactor,
};
pub use pipeline::{prepare_for_display, PipelineOptions, PreparedImage};
pub use source::{BytesSource, FileSource, ImageSource};
pub use transform::{normalize, rotate};
