//! The search loop.

use std::borrow::Cow;

use enough::{Stop, Unstoppable};
use log::{debug, info, warn};

use super::{
    CompressedBytes, CompressionError, EncodeAttempt, EncodeConfig, Progress, SearchState, Step,
};
use crate::encode::{Encoder, JpegEncoder};
use crate::raster::{scaled_dimensions, FilterResampler, Resampler, SourceImage};

/// Runs the adaptive quality/scale search against an [`Encoder`].
///
/// Holds only configuration and stateless capabilities, so one instance can
/// serve any number of `compress` calls, including concurrent ones when
/// `E` and `R` are `Sync`.
#[derive(Debug, Clone)]
pub struct SizeConstrainedEncoder<E, R = FilterResampler> {
    encoder: E,
    resampler: R,
    config: EncodeConfig,
}

impl SizeConstrainedEncoder<JpegEncoder, FilterResampler> {
    /// JPEG output, bilinear downscaling, default policy.
    pub fn jpeg() -> Self {
        Self::new(JpegEncoder, FilterResampler::default(), EncodeConfig::default())
    }
}

impl<E: Encoder> SizeConstrainedEncoder<E, FilterResampler> {
    /// Use `encoder` with bilinear downscaling and the default policy.
    pub fn with_defaults(encoder: E) -> Self {
        Self::new(encoder, FilterResampler::default(), EncodeConfig::default())
    }
}

impl<E: Encoder, R: Resampler> SizeConstrainedEncoder<E, R> {
    pub fn new(encoder: E, resampler: R, config: EncodeConfig) -> Self {
        Self {
            encoder,
            resampler,
            config,
        }
    }

    /// Replace the search policy.
    pub fn with_config(mut self, config: EncodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// Encode `image` to at most `target_bytes`.
    pub fn compress(
        &self,
        image: &SourceImage,
        target_bytes: u64,
    ) -> Result<CompressedBytes, CompressionError> {
        self.compress_with(image, target_bytes, &Unstoppable, |_| {})
    }

    /// Like [`compress`](Self::compress), with cancellation and progress.
    ///
    /// `stop` is checked before every attempt, never during an encode.
    /// `on_progress` is called once per completed attempt.
    pub fn compress_with<P>(
        &self,
        image: &SourceImage,
        target_bytes: u64,
        stop: &dyn Stop,
        mut on_progress: P,
    ) -> Result<CompressedBytes, CompressionError>
    where
        P: FnMut(&Progress),
    {
        self.config.validate()?;

        if image.width() == 0 || image.height() == 0 {
            return Err(CompressionError::InvalidInput(format!(
                "image has zero area ({}x{})",
                image.width(),
                image.height()
            )));
        }

        if target_bytes == 0 {
            warn!("Rejecting zero-byte target before encoding");
            return Err(CompressionError::TargetUnreachable {
                target_bytes,
                attempts: 0,
                best: None,
            });
        }

        let mut state = SearchState::new(&self.config);

        loop {
            if stop.check().is_err() {
                warn!("Compression cancelled after {} attempt(s)", state.attempts());
                return Err(CompressionError::Cancelled {
                    attempts: state.attempts(),
                });
            }

            let attempt = self.attempt(image, &state)?;

            debug!(
                "Attempt {}: quality={:.3} scale={:.4} {}x{} -> {} bytes (target {})",
                state.attempts() + 1,
                attempt.quality,
                attempt.scale,
                attempt.width,
                attempt.height,
                attempt.size(),
                target_bytes
            );

            on_progress(&Progress {
                attempt: state.attempts() + 1,
                max_attempts: self.config.max_attempts,
                quality: attempt.quality,
                scale: attempt.scale,
                width: attempt.width,
                height: attempt.height,
                size: attempt.size(),
                within_target: attempt.size() <= target_bytes,
            });

            match state.next(attempt, target_bytes, &self.config) {
                Step::Continue(next) => state = next,
                Step::Success(result) => {
                    info!(
                        "Compressed {}x{} to {} bytes in {} attempt(s)",
                        image.width(),
                        image.height(),
                        result.size(),
                        result.attempts
                    );
                    return Ok(result);
                }
                Step::Exhausted(state) => {
                    let attempts = state.attempts();
                    let best = state.into_best();
                    warn!(
                        "Target of {} bytes not reached in {} attempt(s); best was {:?} bytes",
                        target_bytes,
                        attempts,
                        best.as_ref().map(EncodeAttempt::size)
                    );
                    return Err(CompressionError::TargetUnreachable {
                        target_bytes,
                        attempts,
                        best,
                    });
                }
            }
        }
    }

    /// Resample to the state's scale and encode at its quality.
    fn attempt(
        &self,
        image: &SourceImage,
        state: &SearchState,
    ) -> Result<EncodeAttempt, CompressionError> {
        let attempt_number = state.attempts() + 1;
        let (width, height) = scaled_dimensions(image.width(), image.height(), state.scale());

        let pixels: Cow<'_, SourceImage> = if (width, height) == (image.width(), image.height()) {
            Cow::Borrowed(image)
        } else {
            let resized = self
                .resampler
                .resample(image, width, height)
                .map_err(|source| CompressionError::ResampleFailure {
                    attempt: attempt_number,
                    source,
                })?;
            Cow::Owned(resized)
        };

        let bytes = self
            .encoder
            .encode(pixels.pixels(), pixels.width(), pixels.height(), state.quality())
            .map_err(|source| CompressionError::EncodeFailure {
                attempt: attempt_number,
                source,
            })?;

        Ok(EncodeAttempt {
            quality: state.quality(),
            scale: state.scale(),
            width: pixels.width(),
            height: pixels.height(),
            bytes,
        })
    }
}

/// Compress `image` to at most `target_bytes` as JPEG with the given policy.
pub fn compress_to_target(
    image: &SourceImage,
    target_bytes: u64,
    config: EncodeConfig,
) -> Result<CompressedBytes, CompressionError> {
    SizeConstrainedEncoder::jpeg()
        .with_config(config)
        .compress(image, target_bytes)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::encode::{quality_to_jpeg, EncodeError};
    use crate::raster::ResizeError;
    use proptest::prelude::*;

    /// Size grows with pixel count and quality, like a real codec.
    struct PixelCostEncoder {
        bytes_per_kilopixel: usize,
    }

    impl Encoder for PixelCostEncoder {
        fn encode(
            &self,
            _pixels: &[u8],
            width: u32,
            height: u32,
            quality: f64,
        ) -> Result<Vec<u8>, EncodeError> {
            let pixels = (width as usize) * (height as usize);
            let len = pixels * self.bytes_per_kilopixel * quality_to_jpeg(quality) as usize
                / 100_000
                + 64;
            Ok(vec![0u8; len])
        }
    }

    struct BlankResampler;

    impl Resampler for BlankResampler {
        fn resample(
            &self,
            _image: &SourceImage,
            width: u32,
            height: u32,
        ) -> Result<SourceImage, ResizeError> {
            SourceImage::new(width, height, vec![0u8; (width * height * 3) as usize])
        }
    }

    fn run(
        width: u32,
        height: u32,
        cost: usize,
        target: u64,
        config: EncodeConfig,
    ) -> (Result<CompressedBytes, CompressionError>, Vec<Progress>) {
        let image = SourceImage::new(width, height, vec![0u8; (width * height * 3) as usize])
            .unwrap();
        let search = SizeConstrainedEncoder::new(
            PixelCostEncoder {
                bytes_per_kilopixel: cost,
            },
            BlankResampler,
            config,
        );
        let mut seen = Vec::new();
        let result = search.compress_with(&image, target, &Unstoppable, |p| seen.push(*p));
        (result, seen)
    }

    fn config_strategy() -> impl Strategy<Value = EncodeConfig> {
        (0.5f64..=1.0, 0.0f64..=1.0, 0.01f64..=0.2, 0.3f64..=0.95, 1u32..=25).prop_map(
            |(initial, floor_frac, step, scale_factor, max_attempts)| EncodeConfig {
                initial_quality: initial,
                quality_floor: initial * floor_frac,
                quality_step: step,
                scale_factor,
                max_attempts,
            },
        )
    }

    proptest! {
        /// Property: success never exceeds the target.
        #[test]
        fn prop_success_within_target(
            (width, height) in (1u32..=300, 1u32..=300),
            cost in 100usize..=5_000,
            target in 1u64..=200_000,
            config in config_strategy(),
        ) {
            let (result, _) = run(width, height, cost, target, config);
            if let Ok(compressed) = result {
                prop_assert!(compressed.size() <= target);
                prop_assert!(compressed.attempts <= config.max_attempts);
            }
        }

        /// Property: quality and scale never increase and quality never
        /// drops below the floor.
        #[test]
        fn prop_parameters_monotone(
            (width, height) in (1u32..=300, 1u32..=300),
            cost in 100usize..=5_000,
            target in 1u64..=200_000,
            config in config_strategy(),
        ) {
            let (_, seen) = run(width, height, cost, target, config);
            for pair in seen.windows(2) {
                prop_assert!(pair[0].quality >= pair[1].quality);
                prop_assert!(pair[0].scale >= pair[1].scale);
                // Scale only moves once quality is at the floor
                if pair[1].scale < pair[0].scale {
                    prop_assert!(pair[0].quality <= config.quality_floor + 1e-6);
                }
            }
            for p in &seen {
                prop_assert!(p.quality >= config.quality_floor);
                prop_assert!(p.width >= 1 && p.height >= 1);
            }
        }

        /// Property: exhaustion carries the smallest size seen.
        #[test]
        fn prop_exhaustion_carries_minimum(
            (width, height) in (1u32..=200, 1u32..=200),
            cost in 100usize..=5_000,
            config in config_strategy(),
        ) {
            // Floor of 64 bytes per encode makes a 1-byte target unreachable
            let (result, seen) = run(width, height, cost, 1, config);
            let err = result.unwrap_err();
            let min = seen.iter().map(|p| p.size).min();
            prop_assert_eq!(err.best_effort().map(EncodeAttempt::size), min);
            prop_assert_eq!(seen.len() as u32, config.max_attempts);
        }

        /// Property: a budget at or above the first encode succeeds immediately.
        #[test]
        fn prop_generous_budget_first_attempt(
            (width, height) in (1u32..=300, 1u32..=300),
            cost in 100usize..=5_000,
            slack in 0u64..=1_000,
        ) {
            let config = EncodeConfig::default();
            let (_, probe) = run(width, height, cost, u64::MAX, config);
            let first = probe[0].size;

            let (result, seen) = run(width, height, cost, first + slack, config);
            let compressed = result.unwrap();
            prop_assert_eq!(compressed.attempts, 1);
            prop_assert_eq!(compressed.quality, config.initial_quality);
            prop_assert_eq!(compressed.scale, 1.0);
            prop_assert_eq!(seen.len(), 1);
        }
    }
}
