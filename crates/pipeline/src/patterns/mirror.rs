//! Mirror-digit family.
//!
//! The mirror of digit d is 9 - d. These rules count how many of the
//! combination's five digits fall in the seed's mirror set:
//! - `eliminate combos with no mirror digits`
//! - `eliminate combos with at least 3 mirror digits`
//! - `require at least one mirror digit`

use crate::compiler::{ActionFn, FilterContext};
use crate::patterns::{is_require, parse_count_bound};
use filter_defs::FilterDescriptor;
use generator::Combination;
use once_cell::sync::Lazy;
use regex::Regex;

static MIRROR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bmirror\b").unwrap());

pub fn compile(descriptor: &FilterDescriptor) -> Option<ActionFn> {
    let action = descriptor.action.as_str();
    if !MIRROR_RE.is_match(action) {
        return None;
    }
    let bound = parse_count_bound(action)?;
    let require = is_require(action);

    Some(Box::new(move |combo: &Combination, ctx: &FilterContext| {
        let count = combo
            .digits()
            .iter()
            .filter(|&&d| ctx.seed.mirror_digits.contains(&d))
            .count() as u32;
        if require { !bound.matches(count) } else { bound.matches(count) }
    }))
}
