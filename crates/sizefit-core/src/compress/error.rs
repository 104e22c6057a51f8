//! Error types for the compression search.

use thiserror::Error;

use super::EncodeAttempt;
use crate::encode::EncodeError;
use crate::raster::ResizeError;

/// Why a `compress` call did not return bytes within budget.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The image is degenerate (zero area or malformed buffer).
    #[error("Invalid input image: {0}")]
    InvalidInput(String),

    /// The search policy cannot describe a terminating search.
    #[error("Invalid encode config: {0}")]
    InvalidConfig(String),

    /// The encoder failed; the search is aborted rather than retried.
    #[error("Encoder failed on attempt {attempt}: {source}")]
    EncodeFailure {
        attempt: u32,
        #[source]
        source: EncodeError,
    },

    /// Resampling the source for a smaller scale failed.
    #[error("Resample failed on attempt {attempt}: {source}")]
    ResampleFailure {
        attempt: u32,
        #[source]
        source: ResizeError,
    },

    /// No attempt met the budget. `best` holds the smallest encoding seen,
    /// or `None` when the budget was rejected before encoding.
    #[error("Target of {target_bytes} bytes not reachable after {attempts} attempt(s)")]
    TargetUnreachable {
        target_bytes: u64,
        attempts: u32,
        best: Option<EncodeAttempt>,
    },

    /// The caller's stop token fired between attempts.
    #[error("Compression cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },
}

impl CompressionError {
    /// The closest result seen, if this is a `TargetUnreachable` that encoded anything.
    pub fn best_effort(&self) -> Option<&EncodeAttempt> {
        match self {
            CompressionError::TargetUnreachable { best, .. } => best.as_ref(),
            _ => None,
        }
    }

    /// Take ownership of the closest result seen.
    pub fn into_best_effort(self) -> Option<EncodeAttempt> {
        match self {
            CompressionError::TargetUnreachable { best, .. } => best,
            _ => None,
        }
    }

    /// Whether relaxing the target or raising `max_attempts` could help.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CompressionError::TargetUnreachable { .. })
    }
}

impl From<ResizeError> for CompressionError {
    fn from(err: ResizeError) -> Self {
        CompressionError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(size: usize) -> EncodeAttempt {
        EncodeAttempt {
            quality: 0.8,
            scale: 0.85,
            width: 10,
            height: 10,
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_best_effort_access() {
        let err = CompressionError::TargetUnreachable {
            target_bytes: 10,
            attempts: 15,
            best: Some(attempt(42)),
        };
        assert_eq!(err.best_effort().map(|a| a.size()), Some(42));
        assert!(err.is_recoverable());
        assert_eq!(err.into_best_effort().map(|a| a.bytes.len()), Some(42));
    }

    #[test]
    fn test_other_errors_have_no_best_effort() {
        let err = CompressionError::Cancelled { attempts: 2 };
        assert!(err.best_effort().is_none());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = CompressionError::TargetUnreachable {
            target_bytes: 0,
            attempts: 0,
            best: None,
        };
        assert_eq!(
            err.to_string(),
            "Target of 0 bytes not reachable after 0 attempt(s)"
        );

        let err = CompressionError::EncodeFailure {
            attempt: 1,
            source: EncodeError::EncodingFailed("boom".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Encoder failed on attempt 1: JPEG encoding failed: boom"
        );
    }

    #[test]
    fn test_resize_error_maps_to_invalid_input() {
        let err: CompressionError = ResizeError::ZeroArea {
            width: 0,
            height: 0,
        }
        .into();
        assert!(matches!(err, CompressionError::InvalidInput(_)));
    }
}
