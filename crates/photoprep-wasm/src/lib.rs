//! Photoprep WASM - WebAssembly bindings for Photoprep
//!
//! This crate exposes the photoprep-core display pipeline to a browser or
//! webview host, which plays the part of the camera screen: it hands over
//! the captured file's bytes and shows the returned pixels.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Sample factor, orientation and full pipeline bindings
//! - `transform` - Rotation binding
//! - `logging` - Console backend for the `log` facade
//!
//! # Usage
//!
//! Decoding a camera image takes time proportional to its size, so call
//! these functions from a Web Worker rather than the UI thread.
//!
//! ```typescript
//! import init, { init_logging, prepare_for_display } from '@photoprep/wasm';
//!
//! await init(); // console logging at warn level
//! init_logging(3); // also report each prepared image
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = prepare_for_display(bytes, 1024, 1024, 1);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod logging;
mod transform;
mod types;

// Re-export public types
pub use decode::{estimate_sample_size, inspect, prepare_for_display, read_orientation_degrees};
pub use transform::normalize;
pub use types::{ImageReport, JsDecodedImage};

/// Initialize the WASM module (called automatically on load).
///
/// Installs the console logger at warn level, so metadata and header
/// fallbacks show up without any setup. Use [`init_logging`] to change it.
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Warn);
}

/// Route pipeline diagnostics to the browser console.
///
/// `level`: 0=off, 1=error, 2=warn, 3=info, 4=debug, 5=trace.
#[wasm_bindgen]
pub fn init_logging(level: u8) {
    logging::install(logging::level_filter(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
