//! Image resampling for the downscaling phase of the search.
//!
//! All functions return new `SourceImage` instances without modifying the input.

use super::{FilterType, ResizeError, SourceImage};

/// Produces resized copies of a raster.
///
/// Implementations must be deterministic and must never mutate the input:
/// the compressor resamples the same source several times per search.
pub trait Resampler {
    /// Resample `image` to exactly `width x height`.
    fn resample(
        &self,
        image: &SourceImage,
        width: u32,
        height: u32,
    ) -> Result<SourceImage, ResizeError>;
}

/// A [`Resampler`] backed by `image::imageops::resize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterResampler {
    /// Interpolation filter used for every resample.
    pub filter: FilterType,
}

impl FilterResampler {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Resampler for FilterResampler {
    fn resample(
        &self,
        image: &SourceImage,
        width: u32,
        height: u32,
    ) -> Result<SourceImage, ResizeError> {
        resize(image, width, height, self.filter)
    }
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `ResizeError::ZeroArea` if either target dimension is zero.
pub fn resize(
    image: &SourceImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<SourceImage, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::ZeroArea { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| ResizeError::Failed("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    SourceImage::from_rgb_image(resized)
}

/// Dimensions of `width x height` after applying `scale` to both axes.
///
/// Each axis is rounded to the nearest pixel and clamped to at least 1,
/// so repeated shrinking of a tiny image bottoms out at 1x1.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (scale_axis(width, scale), scale_axis(height, scale))
}

fn scale_axis(length: u32, scale: f64) -> u32 {
    let scaled = (length as f64 * scale).round();
    if scaled >= u32::MAX as f64 {
        u32::MAX
    } else if scaled < 1.0 || scaled.is_nan() {
        1
    } else {
        scaled as u32
    }
}
