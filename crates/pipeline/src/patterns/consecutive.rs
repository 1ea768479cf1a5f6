//! Consecutive-run family.
//!
//! Eliminates a combination when its sorted digits contain a run of at
//! least N strictly consecutive integers:
//! - `eliminate combos with a run of 4 consecutive digits`
//! - `eliminate combos with 3 or more consecutive digits`
//!
//! A repeated digit breaks the run: 1,2,2,3 counts as a run of 2, not 3.
//! This matches the historical counting loop exactly.

use crate::compiler::{ActionFn, FilterContext};
use filter_defs::FilterDescriptor;
use generator::Combination;
use once_cell::sync::Lazy;
use regex::Regex;

static CONSECUTIVE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bconsecutive\b").unwrap());
static RUN_OF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:runs?|strings?|sequences?)\s+of\s+(\d+)").unwrap());
static N_CONSECUTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s+(?:or\s+more\s+)?consecutive\b").unwrap());

/// Longest run of strictly increasing-by-one digits in the sorted form.
fn longest_run(combo: &Combination) -> u32 {
    let digits = combo.digits();
    let mut best = 1u32;
    let mut count = 1u32;
    for i in 1..digits.len() {
        if digits[i] == digits[i - 1] + 1 {
            count += 1;
        } else {
            count = 1;
        }
        best = best.max(count);
    }
    best
}

pub fn compile(descriptor: &FilterDescriptor) -> Option<ActionFn> {
    let action = descriptor.action.as_str();
    if !CONSECUTIVE_RE.is_match(action) {
        return None;
    }
    let run_length: u32 = if let Some(caps) = RUN_OF_RE.captures(action) {
        caps[1].parse().ok()?
    } else if let Some(caps) = N_CONSECUTIVE_RE.captures(action) {
        caps[1].parse().ok()?
    } else {
        return None;
    };

    Some(Box::new(move |combo: &Combination, _ctx: &FilterContext| {
        longest_run(combo) >= run_length
    }))
}
