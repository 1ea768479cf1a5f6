//! Unconditional core filters applied before any manual rule.
//!
//! Two passes, in order:
//! 1. The injectable percentile gate (baseline keeps everything)
//! 2. Seed-intersection: only combinations that digit-pair expansion of
//!    the seed could produce survive, regardless of which method built
//!    the pool

use crate::pool::CandidatePool;
use crate::traits::{AlwaysKeep, PercentileGate};
use generator::{Combination, Seed, digit_pair};
use std::collections::HashSet;
use tracing::debug;

/// The unconditional base filter stage.
///
/// The digit-pair membership set is computed once at construction and
/// reused for every apply, so reapplying the stage to an already-filtered
/// pool is cheap and removes nothing.
pub struct CoreFilterStage {
    gate: Box<dyn PercentileGate>,
    pair_members: HashSet<Combination>,
}

impl CoreFilterStage {
    /// Stage with the baseline always-keep gate.
    pub fn new(seed: &Seed) -> Self {
        Self::with_gate(seed, AlwaysKeep)
    }

    /// Stage with an injected percentile gate.
    pub fn with_gate(seed: &Seed, gate: impl PercentileGate + 'static) -> Self {
        let pair_members = digit_pair::expand(seed).into_iter().collect();
        Self {
            gate: Box::new(gate),
            pair_members,
        }
    }

    /// Name of the injected gate (for reporting).
    pub fn gate_name(&self) -> &str {
        self.gate.name()
    }

    /// Apply both core passes, returning how many combinations dropped.
    pub fn apply(&self, pool: &mut CandidatePool) -> usize {
        let before = pool.len();
        pool.retain(|combo| self.gate.keep(combo) && self.pair_members.contains(combo));
        let removed = before - pool.len();
        debug!(
            "Core filter stage (gate: {}) removed {} of {} combinations",
            self.gate.name(),
            removed,
            before
        );
        removed
    }
}
