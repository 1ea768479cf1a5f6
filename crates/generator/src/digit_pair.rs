//! Digit-pair expansion.
//!
//! Enumerates every combination that embeds a 2-digit pair drawn from two
//! seed positions. This is the tighter of the two methods and also doubles
//! as the membership set for the unconditional seed-intersection filter.
//!
//! ## Algorithm
//! 1. Derive the distinct canonical pairs from all position pairs i < j
//!    (duplicate pairs across positions collapse; a doubled pair like
//!    (4, 4) exists only when the digit repeats in the seed)
//! 2. For each pair, enumerate all 1,000 3-digit suffixes 000-999
//! 3. Canonicalize pair + suffix into a sorted combination
//! 4. Union into one deduplicated set, sorted for deterministic output

use crate::types::{Combination, Digit, Seed};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Expand a seed through the digit-pair method.
#[instrument(skip(seed), fields(seed = %seed))]
pub fn expand(seed: &Seed) -> Vec<Combination> {
    let pairs: Vec<(Digit, Digit)> = seed.pairs().into_iter().collect();

    let combos = pairs
        .par_iter()
        .fold(HashSet::new, |mut local: HashSet<Combination>, &(a, b)| {
            for code in 0..1_000u16 {
                local.insert(Combination::new([
                    a,
                    b,
                    (code / 100) as u8,
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
        "Digit-pair expansion of seed {} produced {} combinations from {} pairs",
        seed,
        combos.len(),
        pairs.len()
    );
    combos
}
