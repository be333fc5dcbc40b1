//! Right-angle rotation about the image centre.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image we
//! find the source pixel that lands on it. Working with pixel centres
//! `(x + 0.5, y + 0.5)` and rotating clockwise by θ about the centres of
//! both canvases:
//!
//! ```text
//! src - c_src = R(-θ) * (dst - c_dst)
//! ```
//!
//! For θ in {90, 180, 270} the half-pixel offsets cancel and the mapping
//! reduces to exact integer index arithmetic, so no interpolation is needed
//! and every source pixel appears exactly once in the output:
//!
//! ```text
//!  90: src = (dst_y,         h - 1 - dst_x)
//! 180: src = (w - 1 - dst_x, h - 1 - dst_y)
//! 270: src = (w - 1 - dst_y, dst_x        )
//! ```

use log::debug;

use crate::decode::{DecodeError, DecodedImage, Orientation, RotationAngle};

const CHANNELS: usize = 3;

/// Dimensions of the canvas after rotating a `width` x `height` image.
pub fn rotated_dimensions(width: u32, height: u32, angle: RotationAngle) -> (u32, u32) {
    if angle.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotate an image clockwise by a right angle about its centre.
///
/// A zero angle moves the input through untouched. Otherwise a new buffer
/// is allocated; for 90 and 270 degrees width and height swap.
///
/// # Errors
///
/// Returns `DecodeError::RotationFailed` if the pixel buffer length does not
/// match `width * height * 3`.
pub fn rotate(image: DecodedImage, angle: RotationAngle) -> Result<DecodedImage, DecodeError> {
    if angle == RotationAngle::Deg0 {
        return Ok(image);
    }

    if !image.is_well_formed() {
        return Err(DecodeError::RotationFailed(format!(
            "{}x{} image has {} bytes, expected {}",
            image.width,
            image.height,
            image.pixels.len(),
            image.pixel_count() * CHANNELS as u64
        )));
    }

    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = rotated_dimensions(image.width, image.height, angle);
    let (dst_w, dst_h) = (dst_w as usize, dst_h as usize);

    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = match angle {
                RotationAngle::Deg0 => (dst_x, dst_y),
                RotationAngle::Deg90 => (dst_y, src_h - 1 - dst_x),
                RotationAngle::Deg180 => (src_w - 1 - dst_x, src_h - 1 - dst_y),
                RotationAngle::Deg270 => (src_w - 1 - dst_y, dst_x),
            };

            let src_idx = (src_y * src_w + src_x) * CHANNELS;
            let dst_idx = (dst_y * dst_w + dst_x) * CHANNELS;
            output[dst_idx..dst_idx + CHANNELS]
                .copy_from_slice(&image.pixels[src_idx..src_idx + CHANNELS]);
        }
    }

    Ok(DecodedImage {
        width: dst_w as u32,
        height: dst_h as u32,
        pixels: output,
    })
}

/// Rotate by a raw clockwise angle in degrees.
///
/// Angles are taken modulo 360, so -90 and 270 are the same rotation.
///
/// # Errors
///
/// Returns `DecodeError::RotationFailed` for angles that are not a multiple
/// of 90 degrees, or for a malformed pixel buffer.
pub fn rotate_degrees(image: DecodedImage, degrees: i32) -> Result<DecodedImage, DecodeError> {
    let angle = RotationAngle::try_from(degrees.rem_euclid(360) as u32).map_err(|_| {
        DecodeError::RotationFailed(format!(
            "unsupported angle {degrees} (expected a multiple of 90)"
        ))
    })?;
    rotate(image, angle)
}

/// Turn a decoded image upright according to its capture orientation.
///
/// `Normal` and `Unknown` need no rotation, and zero-area images with an
/// empty buffer have nothing to rotate; in all three cases the input is
/// returned as is.
///
/// # Errors
///
/// Returns `DecodeError::RotationFailed` if a rotation is required and the
/// pixel buffer does not match the dimensions, including a non-zero-area
/// image with no pixels at all.
pub fn normalize(
    image: DecodedImage,
    orientation: Orientation,
) -> Result<DecodedImage, DecodeError> {
    let angle = orientation.rotation_angle();
    let zero_area = image.width == 0 || image.height == 0;
    if angle == RotationAngle::Deg0 || (zero_area && image.is_well_formed()) {
        return Ok(image);
    }

    debug!(
        "rotating {}x{} image by {} degrees for {:?}",
        image.width,
        image.height,
        angle.degrees(),
        orientation
    );
    rotate(image, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::labelled_image;

    fn pixel(image: &DecodedImage, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * image.width + x) * 3) as usize;
        [image.pixels[idx], image.pixels[idx + 1], image.pixels[idx + 2]]
    }

    /// 2x1 image: red on the left, green on the right.
    fn red_green() -> DecodedImage {
        DecodedImage::new(2, 1, vec![255, 0, 0, 0, 255, 0])
    }

    #[test]
    fn test_no_rotation_is_identity() {
        let img = labelled_image(100, 50);
        let ptr = img.pixels.as_ptr();
        let expected = img.clone();

        let result = normalize(img, Orientation::Normal).unwrap();

        assert_eq!(result, expected);
        // Same buffer, no new allocation
        assert_eq!(result.pixels.as_ptr(), ptr);
    }

    #[test]
    fn test_unknown_orientation_is_identity() {
        let img = labelled_image(7, 3);
        let ptr = img.pixels.as_ptr();
        let result = normalize(img, Orientation::Unknown).unwrap();
        assert_eq!(result.pixels.as_ptr(), ptr);
        assert_eq!((result.width, result.height), (7, 3));
    }

    #[test]
    fn test_rotate90_dimensions() {
        let img = labelled_image(800, 600);
        let result = normalize(img, Orientation::Rotate90).unwrap();

        assert_eq!(result.width, 600);
        assert_eq!(result.height, 800);
        assert_eq!(result.pixels.len(), 800 * 600 * 3);
    }

    #[test]
    fn test_rotate90_keeps_every_pixel() {
        let img = labelled_image(80, 60);
        let result = normalize(img.clone(), Orientation::Rotate90).unwrap();

        let mut before: Vec<[u8; 3]> = img.pixels.chunks(3).map(|p| [p[0], p[1], p[2]]).collect();
        let mut after: Vec<[u8; 3]> =
            result.pixels.chunks(3).map(|p| [p[0], p[1], p[2]]).collect();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_rotate90_clockwise() {
        // Left/right pair becomes top/bottom with the left pixel on top
        let result = rotate(red_green(), RotationAngle::Deg90).unwrap();
        assert_eq!((result.width, result.height), (1, 2));
        assert_eq!(pixel(&result, 0, 0), [255, 0, 0]);
        assert_eq!(pixel(&result, 0, 1), [0, 255, 0]);
    }

    #[test]
    fn test_rotate270_clockwise() {
        let result = rotate(red_green(), RotationAngle::Deg270).unwrap();
        assert_eq!((result.width, result.height), (1, 2));
        assert_eq!(pixel(&result, 0, 0), [0, 255, 0]);
        assert_eq!(pixel(&result, 0, 1), [255, 0, 0]);
    }

    #[test]
    fn test_rotate180() {
        let result = normalize(red_green(), Orientation::Rotate180).unwrap();
        assert_eq!((result.width, result.height), (2, 1));
        assert_eq!(pixel(&result, 0, 0), [0, 255, 0]);
        assert_eq!(pixel(&result, 1, 0), [255, 0, 0]);
    }

    #[test]
    fn test_rotate180_twice_restores_image() {
        let img = labelled_image(31, 17);
        let once = normalize(img.clone(), Orientation::Rotate180).unwrap();
        assert_ne!(once, img);
        let twice = normalize(once, Orientation::Rotate180).unwrap();
        assert_eq!(twice, img);
    }

    #[test]
    fn test_matches_image_crate_rotations() {
        let rgb = crate::test_fixtures::gradient_image(13, 5);
        let img = DecodedImage::from_rgb_image(rgb.clone());

        let cases = [
            (RotationAngle::Deg90, image::imageops::rotate90(&rgb)),
            (RotationAngle::Deg180, image::imageops::rotate180(&rgb)),
            (RotationAngle::Deg270, image::imageops::rotate270(&rgb)),
        ];
        for (angle, expected) in cases {
            let result = rotate(img.clone(), angle).unwrap();
            assert_eq!(
                result,
                DecodedImage::from_rgb_image(expected),
                "{} degrees",
                angle.degrees()
            );
        }
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = DecodedImage::new(1, 1, vec![1, 2, 3]);
        for angle in [RotationAngle::Deg90, RotationAngle::Deg180, RotationAngle::Deg270] {
            assert_eq!(rotate(img.clone(), angle).unwrap(), img);
        }
    }

    #[test]
    fn test_empty_image_passes_through() {
        let img = DecodedImage::new(0, 0, vec![]);
        let result = normalize(img, Orientation::Rotate90).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_malformed_buffer_fails() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0u8; 20],
        };
        assert!(matches!(
            normalize(img, Orientation::Rotate270),
            Err(DecodeError::RotationFailed(_))
        ));
    }

    #[test]
    fn test_missing_pixels_fail_instead_of_passing_through() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![],
        };
        assert!(matches!(
            normalize(img, Orientation::Rotate90),
            Err(DecodeError::RotationFailed(_))
        ));
    }

    #[test]
    fn test_zero_area_with_stray_pixels_fails() {
        let img = DecodedImage {
            width: 0,
            height: 4,
            pixels: vec![0u8; 6],
        };
        assert!(matches!(
            normalize(img, Orientation::Rotate180),
            Err(DecodeError::RotationFailed(_))
        ));
    }

    #[test]
    fn test_malformed_buffer_without_rotation_is_untouched() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0u8; 20],
        };
        assert!(rotate(img, RotationAngle::Deg0).is_ok());
    }

    #[test]
    fn test_rotate_degrees() {
        let img = labelled_image(6, 4);
        assert_eq!(
            rotate_degrees(img.clone(), -90).unwrap(),
            rotate(img.clone(), RotationAngle::Deg270).unwrap()
        );
        assert_eq!(rotate_degrees(img.clone(), 450).unwrap().width, 4);
        assert_eq!(rotate_degrees(img.clone(), 360).unwrap(), img);
    }

    #[test]
    fn test_rotate_degrees_rejects_other_angles() {
        let img = labelled_image(6, 4);
        for degrees in [1, 45, 89, -15] {
            assert!(matches!(
                rotate_degrees(img.clone(), degrees),
                Err(DecodeError::RotationFailed(_))
            ));
        }
    }

    #[test]
    fn test_rotated_dimensions() {
        assert_eq!(rotated_dimensions(100, 50, RotationAngle::Deg0), (100, 50));
        assert_eq!(rotated_dimensions(100, 50, RotationAngle::Deg90), (50, 100));
        assert_eq!(rotated_dimensions(100, 50, RotationAngle::Deg180), (100, 50));
        assert_eq!(rotated_dimensions(100, 50, RotationAngle::Deg270), (50, 100));
    }
}
