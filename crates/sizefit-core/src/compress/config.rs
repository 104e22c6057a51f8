//! Tunable policy for the size-constrained search.

use serde::{Deserialize, Serialize};

use super::CompressionError;

/// Search policy.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// caller can override a single knob such as `max_attempts`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Codec quality for the first attempt (0.0 to 1.0).
    pub initial_quality: f64,
    /// Quality at which the search stops lowering quality and starts shrinking resolution.
    pub quality_floor: f64,
    /// Amount subtracted from quality per attempt while above the floor.
    pub quality_step: f64,
    /// Multiplicative shrink applied to both axes once quality is at the floor.
    pub scale_factor: f64,
    /// Hard ceiling on encode invocations per call.
    pub max_attempts: u32,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            initial_quality: 0.90,
            quality_floor: 0.80,
            quality_step: 0.05,
            scale_factor: 0.85,
            max_attempts: 15,
        }
    }
}

impl EncodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt ceiling.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the starting quality and the floor in one go.
    pub fn with_quality_range(mut self, initial_quality: f64, quality_floor: f64) -> Self {
        self.initial_quality = initial_quality;
        self.quality_floor = quality_floor;
        self
    }

    /// Check that the policy describes a terminating, shrink-only search.
    pub fn validate(&self) -> Result<(), CompressionError> {
        let finite = [
            ("initial_quality", self.initial_quality),
            ("quality_floor", self.quality_floor),
            ("quality_step", self.quality_step),
            ("scale_factor", self.scale_factor),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }

        if self.initial_quality <= 0.0 || self.initial_quality > 1.0 {
            return Err(invalid(format!(
                "initial_quality must be in (0, 1], got {}",
                self.initial_quality
            )));
        }
        if self.quality_floor < 0.0 || self.quality_floor > self.initial_quality {
            return Err(invalid(format!(
                "quality_floor must be in [0, initial_quality], got {}",
                self.quality_floor
            )));
        }
        if self.quality_step <= 0.0 {
            return Err(invalid(format!(
                "quality_step must be positive, got {}",
                self.quality_step
            )));
        }
        if self.scale_factor <= 0.0 || self.scale_factor >= 1.0 {
            return Err(invalid(format!(
                "scale_factor must be in (0, 1), got {}",
                self.scale_factor
            )));
        }
        if self.max_attempts == 0 {
            return Err(invalid("max_attempts must be at least 1".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> CompressionError {
    CompressionError::InvalidConfig(message)
}
