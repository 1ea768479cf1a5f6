//! Seed-containment implication family (action side).
//!
//! The trigger ("seed contains 7", "seed contains pair 34") is handled by
//! the shared condition compiler. The action requires the combination to
//! hold at least one digit from a stated set, eliminating those that hold
//! none:
//! - `eliminate combos lacking any of 0, 1, 2`
//! - `eliminate combos without any digit from 5 6`
//! - `require at least one of 3, 4`
//!
//! The digit list must follow the keyword directly; actions that talk
//! about positions are left to the positional family.

use crate::compiler::{ActionFn, FilterContext};
use crate::patterns::digits_in;
use filter_defs::FilterDescriptor;
use generator::Combination;
use once_cell::sync::Lazy;
use regex::Regex;

static LACKING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:lacking|without|missing)\s+(?:any\s+|all\s+)?(?:digits?\s+)?(?:of\s+|from\s+|in\s+)?((?:\d[\s,]*)+)")
        .unwrap()
});
static REQUIRE_OF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:require|must\s+contain|keep)\s+(?:at\s+least\s+one|any|one)\s+(?:digit\s+)?(?:of|from)\s+((?:\d[\s,]*)+)")
        .unwrap()
});
static POSITION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bposition\b").unwrap());

pub fn compile(descriptor: &FilterDescriptor) -> Option<ActionFn> {
    let action = descriptor.action.as_str();
    if POSITION_RE.is_match(action) {
        return None;
    }

    let fragment = LACKING_RE
        .captures(action)
        .or_else(|| REQUIRE_OF_RE.captures(action))
        .map(|caps| caps[1].to_string())?;

    let required = digits_in(&fragment);
    if required.is_empty() {
        return None;
    }

    Some(Box::new(move |combo: &Combination, _ctx: &FilterContext| {
        !required.iter().any(|&d| combo.contains(d))
    }))
}
