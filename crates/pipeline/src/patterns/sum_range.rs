//! Sum-range family.
//!
//! Actions over the combination digit-sum, e.g.:
//! - `keep sum between 12 and 25` (eliminate outside the range)
//! - `eliminate combos with sum outside 12-25` (same)
//! - `eliminate combos with sum between 30 and 45` (eliminate inside)
//!
//! The trigger side (e.g. "seed sum <= 12") is handled by the shared
//! condition compiler; this module only compiles the action range.

use crate::compiler::{ActionFn, FilterContext};
use crate::patterns::{is_require, parse_range};
use filter_defs::FilterDescriptor;
use generator::Combination;
use once_cell::sync::Lazy;
use regex::Regex;

static SUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsums?\b").unwrap());
static OUTSIDE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\boutside\b").unwrap());

pub fn compile(descriptor: &FilterDescriptor) -> Option<ActionFn> {
    let action = descriptor.action.as_str();
    if !SUM_RE.is_match(action) {
        return None;
    }
    let (lo, hi) = parse_range(action)?;
    let eliminate_outside = OUTSIDE_RE.is_match(action) || is_require(action);

    Some(Box::new(move |combo: &Combination, _ctx: &FilterContext| {
        let sum = combo.digit_sum();
        let inside = sum >= lo && sum <= hi;
        if eliminate_outside { !inside } else { inside }
    }))
}
