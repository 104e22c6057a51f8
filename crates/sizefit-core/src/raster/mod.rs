//! Decoded raster images and resampling.
//!
//! This module provides:
//! - [`SourceImage`], the immutable RGB raster handed to the compressor
//! - The [`Resampler`] capability used to derive downscaled copies
//! - [`FilterResampler`], a resampler backed by the `image` crate
//!
//! Decoding itself happens outside this crate. Callers build a
//! `SourceImage` from whatever decoder they already use.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::raster::{scaled_dimensions, FilterResampler, Resampler, SourceImage};
//!
//! let image = SourceImage::new(800, 600, vec![128u8; 800 * 600 * 3])?;
//! let (w, h) = scaled_dimensions(image.width(), image.height(), 0.85);
//! let smaller = FilterResampler::default().resample(&image, w, h)?;
//! ```

mod resize;
mod types;

pub use resize::{resize, scaled_dimensions, FilterResampler, Resampler};
pub use types::{FilterType, ResizeError, SourceImage};
