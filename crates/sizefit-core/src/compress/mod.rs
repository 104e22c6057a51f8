//! Size-constrained compression search.
//!
//! This module turns a [`SourceImage`](crate::raster::SourceImage) into
//! encoded bytes no larger than a caller-supplied budget. The search runs
//! in two phases:
//!
//! 1. Lower codec quality by `quality_step` until it reaches `quality_floor`
//! 2. Shrink both axes by `scale_factor` per attempt, quality pinned at the floor
//!
//! The first attempt that fits wins. Parameters only ever decrease, and the
//! number of encodes is capped by `max_attempts`. When the cap is hit the
//! smallest attempt is handed back inside
//! [`CompressionError::TargetUnreachable`] rather than as a success.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::compress::{compress_to_target, EncodeConfig};
//!
//! let result = compress_to_target(&image, 100 * 1024, EncodeConfig::default())?;
//! println!("{} bytes at q={} scale={}", result.size(), result.quality, result.scale);
//! ```

mod config;
mod encoder;
mod error;
mod state;

pub use config::EncodeConfig;
pub use enough::{Stop, StopReason, Unstoppable};
pub use encoder::{compress_to_target, SizeConstrainedEncoder};
pub use error::CompressionError;
pub use state::{CompressedBytes, EncodeAttempt, Progress, SearchState, Step};
