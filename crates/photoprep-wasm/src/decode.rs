//! Display pipeline WASM bindings.
//!
//! This module exposes the photoprep-core pipeline to JavaScript. The host
//! passes the captured file's bytes; every function reopens them as needed.
//!
//! # Functions
//!
//! - [`estimate_sample_size`] - Power-of-two decode factor for a bounding box
//! - [`read_orientation_degrees`] - Corrective clockwise rotation from EXIF
//! - [`inspect`] - Header, factor and orientation summary as a plain object
//! - [`prepare_for_display`] - Decode, downsample and rotate upright
//!
//! # Example
//!
//! ```typescript
//! import { prepare_for_display } from '@photoprep/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = prepare_for_display(bytes, 1024, 1024, 1);
//! console.log(`Prepared ${image.width}x${image.height}`);
//! ```

use crate::types::{filter_from_u8, ImageReport, JsDecodedImage};
use photoprep_core::decode::{self, BoundingBox, DecodeError, ImageDimensions};
use photoprep_core::pipeline::{self, PipelineOptions};
use photoprep_core::source::BytesSource;
use wasm_bindgen::prelude::*;

fn to_js_error(e: DecodeError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Estimate the decode factor for an image against a bounding box.
///
/// Returns 1 when the header cannot be read.
///
/// # Errors
///
/// Returns an error if either requested side is zero.
#[wasm_bindgen]
pub fn estimate_sample_size(bytes: &[u8], req_width: u32, req_height: u32) -> Result<u32, JsValue> {
    sample_size(bytes, req_width, req_height).map_err(to_js_error)
}

/// Clockwise rotation (0, 90, 180 or 270) needed to show the image upright.
///
/// Returns 0 when the image has no readable orientation metadata.
#[wasm_bindgen]
pub fn read_orientation_degrees(bytes: &[u8]) -> u32 {
    let source = BytesSource::from(bytes);
    decode::read_orientation(&source)
        .into_value()
        .rotation_angle()
        .degrees()
}

/// Summarize what `prepare_for_display` would do, without decoding pixels.
///
/// The returned object has `width`, `height`, `sampleFactor`,
/// `rotationDegrees`, `displayWidth`, `displayHeight` and `warnings`.
#[wasm_bindgen]
pub fn inspect(bytes: &[u8], req_width: u32, req_height: u32) -> Result<JsValue, JsValue> {
    let report = build_report(bytes, req_width, req_height).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode, downsample and rotate an image for display.
///
/// # Arguments
///
/// * `bytes` - The encoded image (JPEG or PNG) as a `Uint8Array`
/// * `req_width` / `req_height` - Bounding box the result should cover
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear (default), 2=Lanczos3
///
/// # Errors
///
/// Returns an error if the bounding box is empty, the pixels cannot be
/// decoded, or the decoded buffer cannot be rotated.
#[wasm_bindgen]
pub fn prepare_for_display(
    bytes: &[u8],
    req_width: u32,
    req_height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    prepare(bytes, req_width, req_height, filter)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

fn sample_size(bytes: &[u8], req_width: u32, req_height: u32) -> Result<u32, DecodeError> {
    let bounds = BoundingBox::new(req_width, req_height)?;
    let source = BytesSource::from(bytes);
    Ok(decode::estimate_sample_size(&source, bounds).into_value().get())
}

fn build_report(bytes: &[u8], req_width: u32, req_height: u32) -> Result<ImageReport, DecodeError> {
    let bounds = BoundingBox::new(req_width, req_height)?;
    let source = BytesSource::from(bytes);
    let mut warnings = Vec::new();

    let dims = match decode::read_dimensions(&source) {
        Ok(dims) => dims,
        Err(e) => {
            warnings.push(e.to_string());
            ImageDimensions::UNKNOWN
        }
    };
    let factor = decode::calculate_sample_size(dims, bounds);

    let (orientation, reason) = decode::read_orientation(&source).into_parts();
    warnings.extend(reason.map(|e| e.to_string()));

    let (display_width, display_height) =
        ImageReport::display_dimensions(factor.apply(dims), orientation.swaps_dimensions());

    Ok(ImageReport {
        width: dims.width,
        height: dims.height,
        sample_factor: factor.get(),
        rotation_degrees: orientation.rotation_angle().degrees(),
        display_width,
        display_height,
        warnings,
    })
}

fn prepare(
    bytes: &[u8],
    req_width: u32,
    req_height: u32,
    filter: u8,
) -> Result<decode::DecodedImage, DecodeError> {
    let options = PipelineOptions {
        filter: filter_from_u8(filter),
        ..PipelineOptions::with_bounds(BoundingBox::new(req_width, req_height)?)
    };
    let source = BytesSource::from(bytes);
    pipeline::prepare_for_display(&source, &options).map(|prepared| prepared.image)
}
