//! Pattern families recognized by the rule compiler.
//!
//! One module per family, each exposing a single stateless
//! `compile(&FilterDescriptor) -> Option<ActionFn>` constructor that the
//! compiler's lookup table points at. Shared text-extraction helpers
//! (ranges, count bounds, digit lists, polarity) live here so every family
//! reads rule text the same way.

pub mod consecutive;
pub mod containment;
pub mod digit_class;
pub mod mirror;
pub mod position;
pub mod shape;
pub mod sum_range;
pub mod trap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Sum of five digits can never exceed this.
pub(crate) const MAX_DIGIT_SUM: u32 = 45;

static RANGE_BETWEEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:between|from)\s+(\d+)\s+(?:and|to)\s+(\d+)").unwrap());
static RANGE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+)\s*(?:-|\bto\b)\s*(\d+)\b").unwrap());
static RANGE_AT_MOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:<=|\bat\s+most|\bno\s+more\s+than)\s*(\d+)").unwrap());
static RANGE_OR_LESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s+or\s+(?:less|fewer|under|below)\b").unwrap());
static RANGE_AT_LEAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:>=|\bat\s+least)\s*(\d+)").unwrap());
static RANGE_OR_MORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s+or\s+(?:more|above|over)\b").unwrap());
static RANGE_EXACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:exactly|is)\s+(\d+)\b").unwrap());

/// Extract an inclusive numeric range from rule text.
///
/// Understands "between A and B", "A-B", "A to B", one-sided bounds
/// ("<= A", "at most A", "A or less", ">= A", "at least A", "A or more")
/// and point values ("exactly A"). One-sided bounds clamp to 0 or the
/// maximum digit sum.
pub(crate) fn parse_range(text: &str) -> Option<(u32, u32)> {
    if let Some(caps) = RANGE_BETWEEN.captures(text) {
        return Some((caps[1].parse().ok()?, caps[2].parse().ok()?));
    }
    if let Some(caps) = RANGE_SPAN.captures(text) {
        return Some((caps[1].parse().ok()?, caps[2].parse().ok()?));
    }
    if let Some(caps) = RANGE_AT_MOST.captures(text) {
        return Some((0, caps[1].parse().ok()?));
    }
    if let Some(caps) = RANGE_OR_LESS.captures(text) {
        return Some((0, caps[1].parse().ok()?));
    }
    if let Some(caps) = RANGE_AT_LEAST.captures(text) {
        return Some((caps[1].parse().ok()?, MAX_DIGIT_SUM));
    }
    if let Some(caps) = RANGE_OR_MORE.captures(text) {
        return Some((caps[1].parse().ok()?, MAX_DIGIT_SUM));
    }
    if let Some(caps) = RANGE_EXACT.captures(text) {
        let n = caps[1].parse().ok()?;
        return Some((n, n));
    }
    None
}

/// A compiled bound over a digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CountBound {
    AtLeast(u32),
    AtMost(u32),
    Exactly(u32),
}

impl CountBound {
    pub(crate) fn matches(self, count: u32) -> bool {
        match self {
            CountBound::AtLeast(n) => count >= n,
            CountBound::AtMost(n) => count <= n,
            CountBound::Exactly(n) => count == n,
        }
    }
}

static COUNT_AT_LEAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bat\s+least\s+(\d+)").unwrap());
static COUNT_OR_MORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s*(?:\+|or\s+more)").unwrap());
static COUNT_MORE_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmore\s+than\s+(\d+)").unwrap());
static COUNT_AT_MOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:at\s+most|no\s+more\s+than)\s+(\d+)").unwrap());
static COUNT_OR_FEWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s+or\s+(?:fewer|less)").unwrap());
static COUNT_FEWER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:fewer|less)\s+than\s+(\d+)").unwrap());
static COUNT_EXACTLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bexactly\s+(\d+)").unwrap());
static COUNT_ONE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:at\s+least\s+one|one\s+or\s+more|any)\b").unwrap());
static COUNT_NONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:no|none|zero|without)\b").unwrap());

/// Extract a count bound ("at least 3", "no", "2 or fewer", ...) from
/// rule text. Numeric forms are tried before the word forms so that
/// "no more than 2" resolves as at-most-2, not as none.
pub(crate) fn parse_count_bound(text: &str) -> Option<CountBound> {
    if let Some(caps) = COUNT_AT_LEAST.captures(text) {
        return Some(CountBound::AtLeast(caps[1].parse().ok()?));
    }
    if let Some(caps) = COUNT_OR_MORE.captures(text) {
        return Some(CountBound::AtLeast(caps[1].parse().ok()?));
    }
    if let Some(caps) = COUNT_MORE_THAN.captures(text) {
        let n: u32 = caps[1].parse().ok()?;
        return Some(CountBound::AtLeast(n + 1));
    }
    if let Some(caps) = COUNT_AT_MOST.captures(text) {
        return Some(CountBound::AtMost(caps[1].parse().ok()?));
    }
    if let Some(caps) = COUNT_OR_FEWER.captures(text) {
        return Some(CountBound::AtMost(caps[1].parse().ok()?));
    }
    if let Some(caps) = COUNT_FEWER_THAN.captures(text) {
        let n: u32 = caps[1].parse().ok()?;
        return Some(CountBound::AtMost(n.checked_sub(1)?));
    }
    if let Some(caps) = COUNT_EXACTLY.captures(text) {
        return Some(CountBound::Exactly(caps[1].parse().ok()?));
    }
    if COUNT_ONE_WORD.is_match(text) {
        return Some(CountBound::AtLeast(1));
    }
    if COUNT_NONE.is_match(text) {
        return Some(CountBound::Exactly(0));
    }
    None
}

static REQUIRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:require|must|keep|retain)\b").unwrap());

/// True when the action is phrased as a requirement ("require", "keep",
/// "must", "retain") rather than an elimination. Requirement polarity
/// inverts the compiled predicate: eliminate what does NOT satisfy it.
pub(crate) fn is_require(text: &str) -> bool {
    REQUIRE_RE.is_match(text)
}

/// Pull the single digits out of a captured digit-list fragment.
pub(crate) fn digits_in(fragment: &str) -> Vec<u8> {
    fragment
        .chars()
        .filter(|c| c.is_ascii_digit())
        .map(|c| c as u8 - b'0')
        .collect()
}
