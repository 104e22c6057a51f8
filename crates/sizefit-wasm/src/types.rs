//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core sizefit
//! types, handling the conversion between Rust and JavaScript data representations.

use sizefit_core::{CompressedBytes, EncodeAttempt, SourceImage};
use wasm_bindgen::prelude::*;

/// A decoded RGB image handed over from JavaScript.
///
/// Decoding happens on the JS side (e.g. `createImageBitmap` + canvas
/// `getImageData`, with the alpha channel stripped). Validation of the
/// dimensions against the buffer length is deferred to compression so the
/// constructor never throws.
#[wasm_bindgen]
pub struct JsSourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a new JsSourceImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            width,
            height,
            pixels,
        }
    }

    /// Build from RGBA data as returned by canvas `getImageData`.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> JsSourceImage {
        let pixels = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        JsSourceImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSourceImage {
    /// Validate and convert to a core SourceImage. Clones the pixel data.
    pub(crate) fn to_source(&self) -> Result<SourceImage, sizefit_core::raster::ResizeError> {
        SourceImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// The outcome of a compression, shaped for the before/after UI.
#[wasm_bindgen]
pub struct JsCompressionResult {
    bytes: Vec<u8>,
    quality: f64,
    scale: f64,
    width: u32,
    height: u32,
    attempts: u32,
    met_target: bool,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Encoded JPEG bytes. Creates a copy in JS memory.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Encoded size in bytes.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Encoded size in kilobytes, rounded to two decimals for display.
    #[wasm_bindgen(getter)]
    pub fn size_kb(&self) -> f64 {
        (self.bytes.len() as f64 / 1024.0 * 100.0).round() / 100.0
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f64 {
        self.quality
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// False when this is the closest effort rather than a result within budget.
    #[wasm_bindgen(getter)]
    pub fn met_target(&self) -> bool {
        self.met_target
    }
}

impl JsCompressionResult {
    pub(crate) fn from_compressed(result: CompressedBytes) -> Self {
        Self {
            quality: result.quality,
            scale: result.scale,
            width: result.width,
            height: result.height,
            attempts: result.attempts,
            bytes: result.bytes,
            met_target: true,
        }
    }

    pub(crate) fn from_best_effort(best: EncodeAttempt, attempts: u32) -> Self {
        Self {
            quality: best.quality,
            scale: best.scale,
            width: best.width,
            height: best.height,
            attempts,
            bytes: best.bytes,
            met_target: false,
        }
    }
}
