//! Lossy encoding capability used by the compression search.
//!
//! This module provides:
//! - The [`Encoder`] trait: pixels plus a quality in `[0.0, 1.0]` in, compressed bytes out
//! - [`JpegEncoder`], the default implementation on top of [`encode_jpeg`]
//!
//! Encoders must be deterministic: identical pixels and quality always
//! produce identical bytes. The search relies on this to make repeated
//! `compress` calls reproducible.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::encode::{Encoder, JpegEncoder};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let bytes = JpegEncoder.encode(&pixels, 100, 100, 0.9).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, quality_to_jpeg, EncodeError, JpegEncoder};

/// A lossy codec driven by a normalized quality parameter.
pub trait Encoder {
    /// Encode RGB pixels (3 bytes per pixel, row-major) at `quality`.
    ///
    /// `quality` is in `[0.0, 1.0]`; higher keeps more detail. Errors are
    /// treated as non-retryable by the search.
    fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        quality: f64,
    ) -> Result<Vec<u8>, EncodeError>;
}

impl<E: Encoder + ?Sized> Encoder for &E {
    fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        quality: f64,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(pixels, width, height, quality)
    }
}
