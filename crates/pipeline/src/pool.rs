//! The candidate pool: a unique, ordered, shrink-only combination set.

use generator::Combination;
use std::collections::BTreeSet;

/// The set of surviving candidate combinations for one session.
///
/// Uniqueness and iteration order come from the `BTreeSet`; since
/// `Combination` orders lexicographically on its canonical digits, pool
/// iteration is already the deterministic output order.
///
/// After construction the pool can only shrink: removal is `pub(crate)`
/// and goes through the core stage or the elimination pipeline, never
/// through callers.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    combos: BTreeSet<Combination>,
}

impl CandidatePool {
    /// An empty pool — the valid "no seed" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from generated combinations. Duplicates collapse.
    pub fn from_combinations(combos: impl IntoIterator<Item = Combination>) -> Self {
        Self {
            combos: combos.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn contains(&self, combo: &Combination) -> bool {
        self.combos.contains(combo)
    }

    /// Iterate in canonical (lexicographic) order.
    pub fn iter(&self) -> impl Iterator<Item = &Combination> {
        self.combos.iter()
    }

    /// The surviving combinations as canonical 5-digit strings, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.combos.iter().map(|c| c.to_string()).collect()
    }

    /// Keep only combinations the predicate accepts.
    pub(crate) fn retain(&mut self, f: impl FnMut(&Combination) -> bool) {
        self.combos.retain(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_deduplicates() {
        let pool = CandidatePool::from_combinations(vec![
            Combination::parse("12345").unwrap(),
            Combination::parse("54321").unwrap(), // same box
            Combination::parse("00000").unwrap(),
        ]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_pool_iterates_in_canonical_order() {
        let pool = CandidatePool::from_combinations(vec![
            Combination::parse("99999").unwrap(),
            Combination::parse("00011").unwrap(),
            Combination::parse("12345").unwrap(),
        ]);
        assert_eq!(pool.to_strings(), vec!["00011", "12345", "99999"]);
    }

    #[test]
    fn test_retain_only_shrinks() {
        let mut pool = CandidatePool::from_combinations(vec![
            Combination::parse("00000").unwrap(),
            Combination::parse("11111").unwrap(),
        ]);
        pool.retain(|c| c.contains(1));
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(&Combination::parse("11111").unwrap()));
    }

    #[test]
    fn test_empty_pool_is_valid() {
        let pool = CandidatePool::new();
        assert!(pool.is_empty());
        assert!(pool.to_strings().is_empty());
    }
}
