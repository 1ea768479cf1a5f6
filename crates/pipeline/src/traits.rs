//! Core traits for the filtering pipeline.
//!
//! This module defines the PercentileGate trait, the injectable slot for a
//! statistical keep/drop pass over individual combinations.

use generator::Combination;

/// Injectable statistical pass over a single combination.
///
/// The baseline implementation keeps everything; a real percentile model
/// can be substituted at session construction without touching the
/// generator or pipeline contracts.
///
/// `Send + Sync` so a gate can be shared the same way compiled filters
/// are.
pub trait PercentileGate: Send + Sync {
    /// Returns the name of this gate (for logging/reporting)
    fn name(&self) -> &str;

    /// True to keep the combination, false to drop it.
    fn keep(&self, combo: &Combination) -> bool;
}

/// Baseline gate: keeps every combination.
pub struct AlwaysKeep;

impl PercentileGate for AlwaysKeep {
    fn name(&self) -> &str {
        "AlwaysKeep"
    }

    fn keep(&self, _combo: &Combination) -> bool {
        true
    }
}
