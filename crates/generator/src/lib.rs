//! # Generator Crate
//!
//! This crate implements candidate generation for the 5-digit sieve.
//!
//! ## Components
//!
//! ### Single-Digit Expansion
//! Each seed digit combined with every 4-digit suffix:
//! - 10,000 raw tuples per distinct seed digit
//! - Canonicalized and deduplicated into one pool
//!
//! ### Digit-Pair Expansion
//! Each distinct canonical seed pair combined with every 3-digit suffix:
//! - 1,000 raw tuples per pair
//! - The same set also serves as the seed-intersection membership filter
//!
//! ## Example Usage
//!
//! ```ignore
//! use generator::{generate, GenerationMethod, Seed};
//! use generator::seed_context::build_seed_context;
//!
//! let seed = Seed::parse("12345").expect("valid seed");
//! let pool = generate(&seed, GenerationMethod::DigitPairExpansion);
//! let context = build_seed_context(&seed);
//!
//! println!("{} candidates, seed sum {}", pool.len(), context.digit_sum);
//! ```

// Public modules
pub mod types;
pub mod seed_context;
pub mod single_digit;
pub mod digit_pair;

// Re-export commonly used types
pub use types::{Combination, Digit, GenerationMethod, Seed};
pub use seed_context::{SeedContext, build_seed_context};

/// Run the selected expansion method over a seed.
///
/// The output is deduplicated and sorted lexicographically on the
/// canonical digit strings, so identical inputs always produce identical
/// pools.
pub fn generate(seed: &Seed, method: GenerationMethod) -> Vec<Combination> {
    match method {
        GenerationMethod::SingleDigitExpansion => single_digit::expand(seed),
        GenerationMethod::DigitPairExpansion => digit_pair::expand(seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_dispatches_both_methods() {
        let seed = Seed::parse("12345").unwrap();
        let single = generate(&seed, GenerationMethod::SingleDigitExpansion);
        let pair = generate(&seed, GenerationMethod::DigitPairExpansion);

        assert!(!single.is_empty());
        assert!(!pair.is_empty());
        // Pair expansion is strictly narrower than single-digit expansion.
        assert!(pair.len() < single.len());
    }

    #[test]
    fn test_pair_expansion_is_subset_of_single() {
        let seed = Seed::parse("12345").unwrap();
        let single: std::collections::HashSet<Combination> = generate(&seed, GenerationMethod::SingleDigitExpansion)
            .into_iter()
            .collect();
        for combo in generate(&seed, GenerationMethod::DigitPairExpansion) {
            assert!(single.contains(&combo));
        }
    }

    #[test]
    fn test_identical_input_identical_output() {
        let seed = Seed::parse("90817").unwrap();
        let a = generate(&seed, GenerationMethod::DigitPairExpansion);
        let b = generate(&seed, GenerationMethod::DigitPairExpansion);
        assert_eq!(a, b);
    }
}
