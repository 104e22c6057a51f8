//! Core raster types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or resampling a raster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResizeError {
    /// Width or height is zero.
    #[error("Invalid dimensions: {width}x{height} has zero area")]
    ZeroArea { width: u32, height: u32 },

    /// Pixel buffer length doesn't match `width * height * 3`.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The underlying resize implementation failed.
    #[error("Resample failed: {0}")]
    Failed(String),
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An immutable decoded image with RGB pixel data.
///
/// Construction checks that the image has a non-zero area and that the
/// buffer holds exactly `width * height * 3` bytes, so every `SourceImage`
/// in circulation is encodable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SourceImage {
    /// Create a new SourceImage from dimensions and RGB pixel data
    /// (3 bytes per pixel, row-major order).
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ResizeError> {
        if width == 0 || height == 0 {
            return Err(ResizeError::ZeroArea { width, height });
        }

        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(ResizeError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a SourceImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, ResizeError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB pixel data in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}
