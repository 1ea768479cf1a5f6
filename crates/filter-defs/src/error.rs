//! Error types for the filter-defs crate.

use thiserror::Error;

/// Errors that can occur while loading a descriptor source.
///
/// Per-record problems are NOT errors: a malformed record becomes a
/// [`crate::types::Diagnostic`] and the rest of the batch continues. These
/// variants cover the conditions that must stop the load outright.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// I/O error occurred while reading the source file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two records claim the same filter name.
    ///
    /// Names key every later ranking, preview, and application call;
    /// continuing with a duplicate would silently break determinism, so
    /// this aborts the load.
    #[error("duplicate filter name '{name}' in {file}")]
    DuplicateName { name: String, file: String },

    /// A field value the catalog cannot accept
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DescriptorError>;
