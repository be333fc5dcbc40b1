//! WASM bindings for orientation correction.

use crate::types::JsDecodedImage;
use photoprep_core::transform::rotate_degrees;
use wasm_bindgen::prelude::*;

/// Rotate an image clockwise about its centre.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `degrees` - Clockwise angle; must be a multiple of 90 (negative values wrap)
///
/// # Returns
///
/// New `JsDecodedImage` holding every source pixel. Width and height swap
/// for 90 and 270 degrees.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const upright = normalize(image, read_orientation_degrees(bytes));
/// ```
#[wasm_bindgen]
pub fn normalize(image: &JsDecodedImage, degrees: i32) -> Result<JsDecodedImage, JsValue> {
    rotate_degrees(image.to_decoded(), degrees)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
