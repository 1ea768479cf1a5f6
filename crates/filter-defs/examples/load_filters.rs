//! Load a descriptor file and print what was accepted and skipped.
//!
//! Run with: cargo run --package filter-defs --example load_filters -- data/filters.txt

use filter_defs::DescriptorCatalog;
use std::path::Path;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/filters.txt".to_string());

    let catalog = match DescriptorCatalog::load_from_file(Path::new(&path)) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    };

    println!("{} descriptors:", catalog.len());
    for descriptor in catalog.descriptors() {
        println!(
            "  {} [{}] when({}) do({})",
            descriptor.name, descriptor.category, descriptor.condition, descriptor.action
        );
    }

    if !catalog.diagnostics().is_empty() {
        println!("{} skipped:", catalog.diagnostics().len());
        for diagnostic in catalog.diagnostics() {
            println!("  {}", diagnostic);
        }
    }
}
