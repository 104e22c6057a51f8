//! Search state and its transition function.
//!
//! Each iteration of the search is `SearchState::next(attempt) -> Step`.
//! The loop that drives it only resamples, encodes and checks for
//! cancellation; every policy decision lives here.

use super::EncodeConfig;

/// Tolerance used when comparing quality against the floor.
const QUALITY_EPSILON: f64 = 1e-6;

/// One encode at a specific (quality, scale) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeAttempt {
    /// Codec quality used for this attempt.
    pub quality: f64,
    /// Scale applied to both axes of the source.
    pub scale: f64,
    /// Encoded width in pixels.
    pub width: u32,
    /// Encoded height in pixels.
    pub height: u32,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

impl EncodeAttempt {
    /// Encoded size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A successful encoding within budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedBytes {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// Quality of the accepted attempt.
    pub quality: f64,
    /// Scale of the accepted attempt.
    pub scale: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of encodes performed, including the accepted one.
    pub attempts: u32,
}

impl CompressedBytes {
    fn from_attempt(attempt: EncodeAttempt, attempts: u32) -> Self {
        Self {
            bytes: attempt.bytes,
            quality: attempt.quality,
            scale: attempt.scale,
            width: attempt.width,
            height: attempt.height,
            attempts,
        }
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Snapshot reported to the caller after every attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 1-based attempt number.
    pub attempt: u32,
    pub max_attempts: u32,
    pub quality: f64,
    pub scale: f64,
    pub width: u32,
    pub height: u32,
    /// Encoded size of this attempt.
    pub size: u64,
    /// Whether this attempt met the budget.
    pub within_target: bool,
}

/// Mutable state of one `compress` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    quality: f64,
    scale: f64,
    attempts: u32,
    best: Option<EncodeAttempt>,
}

/// Outcome of feeding one attempt into the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Over budget; try again with the contained parameters.
    Continue(SearchState),
    /// Within budget; the search is over.
    Success(CompressedBytes),
    /// Over budget and out of attempts. The state still holds the best attempt.
    Exhausted(SearchState),
}

impl SearchState {
    /// Starting state: `initial_quality` at full resolution.
    pub fn new(config: &EncodeConfig) -> Self {
        Self {
            quality: config.initial_quality,
            scale: 1.0,
            attempts: 0,
            best: None,
        }
    }

    /// Quality for the next attempt.
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Scale for the next attempt.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of attempts consumed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Smallest attempt seen so far.
    pub fn best(&self) -> Option<&EncodeAttempt> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<EncodeAttempt> {
        self.best
    }

    /// Whether quality has bottomed out and the next reduction shrinks resolution.
    pub fn at_quality_floor(&self, config: &EncodeConfig) -> bool {
        self.quality <= config.quality_floor + QUALITY_EPSILON
    }

    /// Fold the result of encoding at (`self.quality()`, `self.scale()`) into the state.
    pub fn next(mut self, attempt: EncodeAttempt, target_bytes: u64, config: &EncodeConfig) -> Step {
        self.attempts += 1;

        if attempt.size() <= target_bytes {
            return Step::Success(CompressedBytes::from_attempt(attempt, self.attempts));
        }

        // Ties keep the earlier attempt, which has the higher quality or scale.
        let is_smallest = match &self.best {
            Some(best) => attempt.size() < best.size(),
            None => true,
        };
        if is_smallest {
            self.best = Some(attempt);
        }

        if self.attempts >= config.max_attempts {
            return Step::Exhausted(self);
        }

        if self.at_quality_floor(config) {
            self.scale *= config.scale_factor;
        } else {
            self.quality = (self.quality - config.quality_step).max(config.quality_floor);
        }

        Step::Continue(self)
    }
}
