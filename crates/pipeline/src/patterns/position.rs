//! Positional constraint family.
//!
//! Eliminates a combination when a 1-indexed position holds a forbidden
//! digit:
//! - `eliminate combos with 9 in position 1`
//! - `eliminate combos where position 5 is 0`
//!
//! Positions index the canonical *sorted* representation — position 1 is
//! the smallest digit, position 5 the largest. The drawn order of a box
//! outcome is not represented in the pool at all, so this is the only
//! position these rules can talk about; it is kept for compatibility with
//! the historical rule sets even though their authors may have had the
//! draw order in mind.

use crate::compiler::{ActionFn, FilterContext};
use filter_defs::FilterDescriptor;
use generator::Combination;
use once_cell::sync::Lazy;
use regex::Regex;

static POS_IS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bposition\s+([1-5])\s+(?:is|=|holds|has)\s+(\d)\b").unwrap()
});
static DIGIT_IN_POS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d)\s+in\s+position\s+([1-5])\b").unwrap());

pub fn compile(descriptor: &FilterDescriptor) -> Option<ActionFn> {
    let action = descriptor.action.as_str();

    let (position, digit) = if let Some(caps) = POS_IS_RE.captures(action) {
        (caps[1].parse::<usize>().ok()?, caps[2].parse::<u8>().ok()?)
    } else if let Some(caps) = DIGIT_IN_POS_RE.captures(action) {
        (caps[2].parse::<usize>().ok()?, caps[1].parse::<u8>().ok()?)
    } else {
        return None;
    };

    Some(Box::new(move |combo: &Combination, _ctx: &FilterContext| {
        combo.digits()[position - 1] == digit
    }))
}
