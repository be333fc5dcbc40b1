//! Image inspection and decoding for the display pipeline.
//!
//! This module provides functionality for:
//! - Reading declared dimensions from an image header
//! - Estimating a power-of-two sample factor for a bounding box
//! - Reading the EXIF orientation of a capture
//! - Decoding pixels and shrinking them by the sample factor
//!
//! # Architecture
//!
//! Each function opens the [`ImageSource`](crate::source::ImageSource) it is
//! given and drops the reader before returning. All operations are
//! synchronous and single-threaded.
//!
//! Header and metadata reads never fail outright: they return a
//! [`Fallback`] holding either the value read or a safe default together
//! with the reason it was needed.
//!
//! # Examples
//!
//! ```ignore
//! use photoprep_core::decode::{decode_sampled, estimate_sample_size, BoundingBox, DecodeOptions};
//! use photoprep_core::source::FileSource;
//!
//! let source = FileSource::new("capture.jpg");
//! let factor = estimate_sample_size(&source, BoundingBox::square(1024)?).into_value();
//! let image = decode_sampled(&source, factor, &DecodeOptions::default())?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod header;
mod orientation;
mod resize;
mod sampled;
mod types;

pub use header::{calculate_sample_size, estimate_sample_size, read_dimensions};
pub use orientation::{read_orientation, read_orientation_value};
pub use resize::{downsample, resize};
pub use sampled::{decode_sampled, DecodeOptions};
pub use types::{
    BoundingBox, DecodeError, DecodedImage, Fallback, FilterType, ImageDimensions, Orientation,
    RotationAngle, SampleFactor,
};
