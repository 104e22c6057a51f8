//! Sizefit Core - size-constrained image compression
//!
//! This crate encodes a decoded RGB image so that the output fits a byte
//! budget, trading quality first and resolution second, in a bounded number
//! of encode attempts.
//!
//! - `raster` - the source image type and resampling
//! - `encode` - the lossy encoder capability and its JPEG implementation
//! - `compress` - the adaptive quality/scale search
//! - `target` - preset budgets

pub mod compress;
pub mod encode;
pub mod raster;
pub mod target;

pub use compress::{
    compress_to_target, CompressedBytes, CompressionError, EncodeAttempt, EncodeConfig, Progress,
    SizeConstrainedEncoder,
};
pub use encode::{Encoder, JpegEncoder};
pub use raster::{FilterResampler, FilterType, Resampler, SourceImage};
pub use target::{kb_to_bytes, TargetSize};

/// Compress raw RGB pixels to at most `target_bytes` as JPEG.
///
/// Builds the [`SourceImage`] first, so a zero-area image or a buffer of
/// the wrong length fails with [`CompressionError::InvalidInput`].
pub fn compress_pixels(
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    target_bytes: u64,
    config: EncodeConfig,
) -> Result<CompressedBytes, CompressionError> {
    let image = SourceImage::new(width, height, pixels)?;
    compress_to_target(&image, target_bytes, config)
}
