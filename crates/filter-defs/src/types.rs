//! Core types for user-authored filter definitions.
//!
//! A descriptor is the raw, human-authored record: a unique name, a
//! category label, a trigger condition phrased over the seed, and an
//! elimination action phrased over a combination. Compilation into an
//! executable predicate happens downstream; this crate only carries the
//! text faithfully and reports what it had to skip.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// A single human-authored elimination rule, as loaded from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Unique name, used for ranking display, preview, and application.
    pub name: String,

    /// Free-form grouping label ("manual" when the source omits it).
    pub category: String,

    /// Trigger condition over the seed ("always" when omitted).
    pub condition: String,

    /// Elimination action over a combination.
    pub action: String,
}

/// A non-fatal problem found while parsing a descriptor source.
///
/// Carries enough context to name the offending record; nothing is ever
/// dropped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Label of the source (file path or caller-provided tag).
    pub file: String,
    /// 1-indexed line where the record starts.
    pub line: usize,
    /// Why the record was skipped.
    pub reason: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.reason)
    }
}

/// Caller-supplied digit classifications consumed by trap-family filters.
///
/// All three sets are optional; an empty set simply makes the filters that
/// reference it inert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitClasses {
    pub hot: BTreeSet<u8>,
    pub cold: BTreeSet<u8>,
    pub due: BTreeSet<u8>,
}

impl DigitClasses {
    /// Build from three comma-separated digit lists.
    pub fn from_inputs(hot: &str, cold: &str, due: &str) -> Self {
        Self {
            hot: parse_digit_list(hot, "hot"),
            cold: parse_digit_list(cold, "cold"),
            due: parse_digit_list(due, "due"),
        }
    }
}

/// Parse a lenient comma/space-separated digit list.
///
/// Tokens that are not a single decimal digit are skipped with a warning;
/// bad input degrades to a smaller set, never to an error.
pub fn parse_digit_list(input: &str, label: &str) -> BTreeSet<u8> {
    let mut digits = BTreeSet::new();
    for token in input.split([',', ' ', ';']) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<u8>() {
            Ok(d) if d <= 9 => {
                digits.insert(d);
            }
            _ => {
                warn!("Skipping non-digit token '{}' in {} list", token, label);
            }
        }
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digit_list_basic() {
        let digits = parse_digit_list("1, 2, 9", "hot");
        assert_eq!(digits.into_iter().collect::<Vec<_>>(), vec![1, 2, 9]);
    }

    #[test]
    fn test_parse_digit_list_skips_bad_tokens() {
        let digits = parse_digit_list("3, x, 42, 7", "cold");
        assert_eq!(digits.into_iter().collect::<Vec<_>>(), vec![3, 7]);
    }

    #[test]
    fn test_parse_digit_list_empty() {
        assert!(parse_digit_list("", "due").is_empty());
        assert!(parse_digit_list("  ,  ", "due").is_empty());
    }

    #[test]
    fn test_digit_classes_from_inputs() {
        let classes = DigitClasses::from_inputs("0,1", "8 9", "");
        assert_eq!(classes.hot.len(), 2);
        assert!(classes.cold.contains(&8));
        assert!(classes.due.is_empty());
    }
}
