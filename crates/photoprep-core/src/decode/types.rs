//! Core types for scale estimation and orientation handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for the normalization pipeline.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source could not be opened, or holds no decodable image.
    #[error("Source unreadable: {0}")]
    SourceUnreadable(String),

    /// Orientation metadata is missing or corrupt.
    #[error("Metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// The rotation could not be constructed or applied.
    #[error("Rotation failed: {0}")]
    RotationFailed(String),

    /// A bounding box side was zero.
    #[error("Invalid bounding box {width}x{height}: both sides must be positive")]
    InvalidBounds { width: u32, height: u32 },

    /// A pixel buffer's length does not match its dimensions.
    #[error("Malformed pixel buffer: {width}x{height} image has {len} bytes")]
    MalformedBuffer { width: u32, height: u32, len: usize },

    /// A sample factor was not a positive power of two.
    #[error("Invalid sample factor {0}: must be a positive power of two")]
    InvalidSampleFactor(u32),
}

/// Filter type used when shrinking a decoded image by its sample factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Maximum dimensions the caller wants to display, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct BoundingBox {
    width: u32,
    height: u32,
}

impl BoundingBox {
    /// Create a bounding box. Both sides must be positive.
    pub fn new(width: u32, height: u32) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    /// A square box, the common case for thumbnail-sized views.
    pub fn square(size: u32) -> Result<Self, DecodeError> {
        Self::new(size, size)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawBounds {
    width: u32,
    height: u32,
}

impl TryFrom<RawBounds> for BoundingBox {
    type Error = DecodeError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        BoundingBox::new(raw.width, raw.height)
    }
}

impl From<BoundingBox> for RawBounds {
    fn from(bounds: BoundingBox) -> Self {
        RawBounds {
            width: bounds.width,
            height: bounds.height,
        }
    }
}

/// Width and height as declared by an image header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Dimensions used when the header could not be read.
    pub const UNKNOWN: ImageDimensions = ImageDimensions {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when neither side exceeds the requested box.
    pub fn fits_within(&self, bounds: BoundingBox) -> bool {
        self.width <= bounds.width() && self.height <= bounds.height()
    }
}

/// Power-of-two divisor applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SampleFactor(u32);

impl SampleFactor {
    /// Decode at full resolution.
    pub const ONE: SampleFactor = SampleFactor(1);

    /// Create a sample factor, rejecting zero and non-powers of two.
    pub fn new(value: u32) -> Result<Self, DecodeError> {
        if value.is_power_of_two() {
            Ok(Self(value))
        } else {
            Err(DecodeError::InvalidSampleFactor(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The next larger factor, or `None` on overflow.
    pub fn doubled(self) -> Option<Self> {
        self.0.checked_mul(2).map(Self)
    }

    /// Dimensions produced by decoding `dims` at this factor.
    ///
    /// Each side is divided and floored, but never drops below one pixel
    /// for a non-empty side.
    pub fn apply(self, dims: ImageDimensions) -> ImageDimensions {
        let shrink = |side: u32| {
            if side == 0 {
                0
            } else {
                (side / self.0).max(1)
            }
        };
        ImageDimensions::new(shrink(dims.width), shrink(dims.height))
    }
}

impl Default for SampleFactor {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for SampleFactor {
    type Error = DecodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        SampleFactor::new(value)
    }
}

impl From<SampleFactor> for u32 {
    fn from(factor: SampleFactor) -> Self {
        factor.0
    }
}

/// Orientation recorded by the camera at capture time.
///
/// Only the pure rotations are distinguished. Mirrored EXIF orientations
/// and out-of-range values are reported as `Unknown`.
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Stored upright (EXIF 1).
    #[default]
    Normal,
    /// Needs a 90 degree clockwise turn (EXIF 6).
    Rotate90,
    /// Needs a 180 degree turn (EXIF 3).
    Rotate180,
    /// Needs a 270 degree clockwise turn (EXIF 8).
    Rotate270,
    /// Anything else, including unreadable metadata.
    Unknown,
}

impl Orientation {
    /// Corrective rotation for this orientation.
    pub fn rotation_angle(self) -> RotationAngle {
        match self {
            Orientation::Normal => RotationAngle::Deg0,
            Orientation::Rotate90 => RotationAngle::Deg90,
            Orientation::Rotate180 => RotationAngle::Deg180,
            Orientation::Rotate270 => RotationAngle::Deg270,
            Orientation::Unknown => RotationAngle::Deg0,
        }
    }

    /// Returns true if correcting this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        self.rotation_angle().swaps_dimensions()
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            3 => Orientation::Rotate180,
            6 => Orientation::Rotate90,
            8 => Orientation::Rotate270,
            _ => Orientation::Unknown,
        }
    }
}

/// Clockwise rotation in right-angle steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RotationAngle {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl RotationAngle {
    pub fn degrees(self) -> u32 {
        match self {
            RotationAngle::Deg0 => 0,
            RotationAngle::Deg90 => 90,
            RotationAngle::Deg180 => 180,
            RotationAngle::Deg270 => 270,
        }
    }

    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, RotationAngle::Deg90 | RotationAngle::Deg270)
    }

    /// Rotation equivalent to applying `self` and then `other`.
    pub fn then(self, other: RotationAngle) -> RotationAngle {
        match (self.degrees() + other.degrees()) % 360 {
            90 => RotationAngle::Deg90,
            180 => RotationAngle::Deg180,
            270 => RotationAngle::Deg270,
            _ => RotationAngle::Deg0,
        }
    }
}

impl TryFrom<u32> for RotationAngle {
    type Error = DecodeError;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(RotationAngle::Deg0),
            90 => Ok(RotationAngle::Deg90),
            180 => Ok(RotationAngle::Deg180),
            270 => Ok(RotationAngle::Deg270),
            other => Err(DecodeError::RotationFailed(format!(
                "unsupported angle {other} (expected 0, 90, 180 or 270)"
            ))),
        }
    }
}

impl From<RotationAngle> for u32 {
    fn from(angle: RotationAngle) -> Self {
        angle.degrees()
    }
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Consume into an image::RgbImage without copying the buffer.
    pub fn into_rgb_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels)
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the buffer length matches the dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.pixel_count().checked_mul(3) == Some(self.pixels.len() as u64)
    }
}

/// Outcome of a step that substitutes a default instead of failing.
#[derive(Debug)]
pub enum Fallback<T> {
    /// The value was read from the source.
    Found(T),
    /// The source could not provide a value, so a safe default is used.
    Defaulted { value: T, reason: DecodeError },
}

impl<T> Fallback<T> {
    /// The usable value, whether read or defaulted.
    pub fn value(&self) -> &T {
        match self {
            Fallback::Found(value) => value,
            Fallback::Defaulted { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Fallback::Found(value) => value,
            Fallback::Defaulted { value, .. } => value,
        }
    }

    /// Why the default was used, if it was.
    pub fn reason(&self) -> Option<&DecodeError> {
        match self {
            Fallback::Found(_) => None,
            Fallback::Defaulted { reason, .. } => Some(reason),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Fallback::Defaulted { .. })
    }

    /// Split into the value and the optional reason.
    pub fn into_parts(self) -> (T, Option<DecodeError>) {
        match self {
            Fallback::Found(value) => (value, None),
            Fallback::Defaulted { value, reason } => (value, Some(reason)),
        }
    }
}
