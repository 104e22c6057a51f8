//! Preset size budgets offered by the upload UI.

use serde::{Deserialize, Serialize};

/// Bytes per kilobyte used for every budget in this crate.
pub const BYTES_PER_KB: u64 = 1024;

/// Convert a budget in kilobytes to bytes.
pub fn kb_to_bytes(kb: u64) -> u64 {
    kb.saturating_mul(BYTES_PER_KB)
}

/// A preset target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSize {
    Kb50,
    Kb100,
    Kb200,
    Kb500,
    Mb1,
}

impl TargetSize {
    /// Every preset, smallest first.
    pub const ALL: [TargetSize; 5] = [
        TargetSize::Kb50,
        TargetSize::Kb100,
        TargetSize::Kb200,
        TargetSize::Kb500,
        TargetSize::Mb1,
    ];

    /// Budget in kilobytes.
    pub fn kilobytes(self) -> u64 {
        match self {
            TargetSize::Kb50 => 50,
            TargetSize::Kb100 => 100,
            TargetSize::Kb200 => 200,
            TargetSize::Kb500 => 500,
            TargetSize::Mb1 => 1024,
        }
    }

    /// Budget in bytes.
    pub fn bytes(self) -> u64 {
        kb_to_bytes(self.kilobytes())
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            TargetSize::Kb50 => "50 KB",
            TargetSize::Kb100 => "100 KB",
            TargetSize::Kb200 => "200 KB",
            TargetSize::Kb500 => "500 KB",
            TargetSize::Mb1 => "1 MB",
        }
    }
}
