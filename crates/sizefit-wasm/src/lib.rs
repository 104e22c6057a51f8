//! Sizefit WASM - WebAssembly bindings for sizefit
//!
//! This crate exposes the sizefit-core compression search to the browser,
//! where decoding, previews and downloads are handled by the page.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and results
//! - `compress` - Size-constrained compression bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSourceImage, compress_to_target } from '@sizefit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = new JsSourceImage(width, height, rgbPixels);
//! const result = compress_to_target(image, 200);
//! const blob = new Blob([result.bytes()], { type: 'image/jpeg' });
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod types;

// Re-export public types
pub use compress::{compress_best_effort, compress_to_target, target_presets};
pub use types::{JsCompressionResult, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
