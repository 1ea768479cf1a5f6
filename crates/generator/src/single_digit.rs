//! Single-digit expansion.
//!
//! Enumerates every combination that shares at least one digit with the
//! seed, by brute force:
//!
//! ## Algorithm
//! 1. Take the distinct digits of the seed (repeats contribute nothing new)
//! 2. For each seed digit d, enumerate all 10,000 4-digit suffixes 0000-9999
//! 3. Canonicalize d + suffix into a sorted combination
//! 4. Union everything into one deduplicated set
//! 5. Sort for a deterministic output order

use crate::types::{Combination, Digit, Seed};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Expand a seed through the single-digit method.
///
/// Returns the deduplicated combinations in canonical sorted order. The
/// raw enumeration is 10,000 tuples per distinct seed digit; duplicates
/// collapse during the union, so the result is far smaller.
#[instrument(skip(seed), fields(seed = %seed))]
pub fn expand(seed: &Seed) -> Vec<Combination> {
    let lead_digits: Vec<Digit> = {
        let distinct: HashSet<Digit> = seed.digits().iter().copied().collect();
        let mut v: Vec<Digit> = distinct.into_iter().collect();
        v.sort_unstable();
        v
    };

    let combos = lead_digits
        .par_iter()
        .fold(HashSet::new, |mut local: HashSet<Combination>, &lead| {
            for code in 0..10_000u16 {
                local.insert(Combination::new([
                    lead,
                    (code / 1000) as u8,
                    (code / 100 % 10) as u8,
                    (code / 10 % 10) as u8,
                    (code % 10) as u8,
                ]));
            }
            local
        })
        .reduce(HashSet::new, |mut acc, local| {
            acc.extend(local);
            acc
        });

    let mut combos: Vec<Combination> = combos.into_iter().collect();
    combos.sort_unstable();

    debug!(
        "Single-digit expansion of seed {} produced {} combinations",
        seed,
        combos.len()
    );
    combos
}
