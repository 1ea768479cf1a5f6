//! Helper to build a SeedContext from a parsed seed.
//!
//! This module aggregates everything seed-dependent rules need to answer
//! their trigger questions, computed once per session:
//! - Digit sum
//! - Per-digit occurrence counts
//! - Distinct canonical pairs
//! - Mirror-digit set (mirror(d) = 9 - d)
//!
//! Gathering the data up front keeps rule evaluation O(1) per query and
//! avoids re-deriving the same values for every combination in the pool.

use crate::types::{Digit, Seed};
use std::collections::BTreeSet;

/// Precomputed, immutable view of a seed for rule evaluation.
#[derive(Debug, Clone)]
pub struct SeedContext {
    /// The seed itself, in entry order.
    pub seed: Seed,

    /// Sum of the five seed digits.
    pub digit_sum: u32,

    /// Occurrence count per digit value.
    pub counts: [u8; 10],

    /// Distinct canonical (lo, hi) pairs from any two seed positions.
    pub pairs: BTreeSet<(Digit, Digit)>,

    /// Mirrors of the seed digits: { 9 - d for each distinct d }.
    pub mirror_digits: BTreeSet<Digit>,
}

impl SeedContext {
    /// True if the seed holds `d` in at least one position.
    pub fn contains_digit(&self, d: Digit) -> bool {
        d <= 9 && self.counts[d as usize] > 0
    }

    /// True if two seed positions form the pair, in either order.
    pub fn contains_pair(&self, a: Digit, b: Digit) -> bool {
        let pair = if a <= b { (a, b) } else { (b, a) };
        self.pairs.contains(&pair)
    }
}

/// Build a SeedContext for a given seed.
pub fn build_seed_context(seed: &Seed) -> SeedContext {
    let mut counts = [0u8; 10];
    for &d in seed.digits() {
        counts[d as usize] += 1;
    }

    let mirror_digits = seed.digits().iter().map(|&d| 9 - d).collect();

    SeedContext {
        seed: *seed,
        digit_sum: seed.digit_sum(),
        counts,
        pairs: seed.pairs(),
        mirror_digits,
    }
}
