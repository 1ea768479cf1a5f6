//! Expand a seed with both methods and print pool sizes.
//!
//! Run with: cargo run --package generator --example expand_seed -- 12345

use generator::{GenerationMethod, Seed, generate};

fn main() {
    let input = std::env::args().nth(1).unwrap_or_else(|| "12345".to_string());

    let Some(seed) = Seed::parse(&input) else {
        eprintln!("'{}' is not a 5-digit seed", input);
        std::process::exit(1);
    };

    let single = generate(&seed, GenerationMethod::SingleDigitExpansion);
    let pair = generate(&seed, GenerationMethod::DigitPairExpansion);

    println!("seed {}", seed);
    println!("  single-digit expansion: {} combinations", single.len());
    println!("  digit-pair expansion:   {} combinations", pair.len());
    println!("  first five (pair method):");
    for combo in pair.iter().take(5) {
        println!("    {}", combo);
    }
}
