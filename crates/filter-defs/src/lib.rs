//! # Filter-Defs Crate
//!
//! This crate handles loading user-authored filter definitions.
//!
//! ## Main Components
//!
//! - **types**: `FilterDescriptor`, `DigitClasses`, skip diagnostics
//! - **parser**: row (`::`-separated) and block (`key: value`) layouts
//! - **catalog**: one-time load with name-uniqueness validation
//! - **error**: fatal load errors
//!
//! ## Example Usage
//!
//! ```ignore
//! use filter_defs::DescriptorCatalog;
//! use std::path::Path;
//!
//! let catalog = DescriptorCatalog::load_from_file(Path::new("data/filters.txt"))?;
//! for descriptor in catalog.descriptors() {
//!     println!("{} [{}]", descriptor.name, descriptor.category);
//! }
//! for diagnostic in catalog.diagnostics() {
//!     eprintln!("skipped: {}", diagnostic);
//! }
//! ```
//!
//! Malformed records never abort a load; they are skipped with a named
//! diagnostic. The only fatal conditions are I/O failures and duplicate
//! filter names.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod catalog;

// Re-export commonly used types for convenience
pub use error::{DescriptorError, Result};
pub use types::{Diagnostic, DigitClasses, FilterDescriptor, parse_digit_list};
pub use parser::{LoadedDescriptors, parse_source};
pub use catalog::DescriptorCatalog;
