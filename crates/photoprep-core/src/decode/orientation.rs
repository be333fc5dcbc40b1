//! EXIF orientation lookup.

use exif::{In, Reader, Tag};
use log::{debug, warn};

use super::{DecodeError, Fallback, Orientation};
use crate::source::ImageSource;

/// Read the raw EXIF orientation value from the primary image.
///
/// Returns `Ok(None)` when the EXIF block is readable but carries no
/// orientation tag.
///
/// # Errors
///
/// Returns `DecodeError::SourceUnreadable` if the source cannot be opened,
/// and `DecodeError::MetadataUnavailable` if no EXIF block can be parsed.
pub fn read_orientation_value<S: ImageSource + ?Sized>(
    source: &S,
) -> Result<Option<u32>, DecodeError> {
    let mut reader = source
        .open()
        .map_err(|e| DecodeError::SourceUnreadable(e.to_string()))?;

    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| DecodeError::MetadataUnavailable(e.to_string()))?;

    Ok(exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0)))
}

/// Read the capture orientation of `source`.
///
/// A readable EXIF block without an orientation tag means `Normal`.
/// Unreadable sources and missing or corrupt EXIF fall back to `Unknown`,
/// which maps to no rotation.
pub fn read_orientation<S: ImageSource + ?Sized>(source: &S) -> Fallback<Orientation> {
    match read_orientation_value(source) {
        Ok(Some(value)) => {
            let orientation = Orientation::from(value);
            debug!(
                "{}: EXIF orientation {} -> {:?}",
                source.describe(),
                value,
                orientation
            );
            Fallback::Found(orientation)
        }
        Ok(None) => Fallback::Found(Orientation::Normal),
        Err(reason) => {
            warn!(
                "{}: orientation unavailable, leaving image unrotated: {}",
                source.describe(),
                reason
            );
            Fallback::Defaulted {
                value: Orientation::Unknown,
                reason,
            }
        }
    }
}
