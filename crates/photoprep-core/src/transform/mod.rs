//! Orientation correction for decoded images.
//!
//! # Coordinate System
//!
//! - Rotation angles are clockwise, in right-angle steps
//! - Rotations are taken about the image centre; the canvas is never cropped
//! - Origin is top-left corner

mod rotation;

pub use rotation::{normalize, rotate, rotate_degrees, rotated_dimensions};
