//! Structural shape family.
//!
//! Classifies a combination by its exact digit-multiplicity signature and
//! eliminates (or requires) one class:
//!
//! | signature   | class         | example |
//! |-------------|---------------|---------|
//! | [5]         | quint         | 77777   |
//! | [4,1]       | quad          | 11112   |
//! | [3,2]       | full house    | 11122   |
//! | [3,1,1]     | triple        | 11123   |
//! | [2,2,1]     | double-double | 11223   |
//! | [2,1,1,1]   | one pair      | 11234   |
//! | [1,1,1,1,1] | no repeats    | 12345   |
//!
//! Classes are exact: a full house is not a triple, and a double-double
//! is not a pair.

use crate::compiler::{ActionFn, FilterContext};
use crate::patterns::is_require;
use filter_defs::FilterDescriptor;
use generator::Combination;
use once_cell::sync::Lazy;
use regex::Regex;

/// Exact multiplicity-signature class of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Quint,
    Quad,
    FullHouse,
    Triple,
    DoubleDouble,
    Pair,
    Distinct,
}

impl Shape {
    /// Classify by sorted multiplicity signature.
    pub fn of(combo: &Combination) -> Shape {
        let mut signature: Vec<u8> = combo.counts().into_iter().filter(|&c| c > 0).collect();
        signature.sort_unstable_by(|a, b| b.cmp(a));
        match signature.as_slice() {
            [5] => Shape::Quint,
            [4, 1] => Shape::Quad,
            [3, 2] => Shape::FullHouse,
            [3, 1, 1] => Shape::Triple,
            [2, 2, 1] => Shape::DoubleDouble,
            [2, 1, 1, 1] => Shape::Pair,
            _ => Shape::Distinct,
        }
    }
}

static QUINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:quint(?:uple)?s?|five\s+of\s+a\s+kind|all\s+(?:five\s+)?identical)\b")
        .unwrap()
});
static QUAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:quads?|four\s+of\s+a\s+kind)\b").unwrap());
static FULL_HOUSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:full\s+house|triple\s*(?:\+|and|with)\s*(?:a\s+)?pair)\b").unwrap()
});
static DOUBLE_DOUBLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:double[\s-]double|two\s+pairs?)\b").unwrap());
static TRIPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:triples?|three\s+of\s+a\s+kind)\b").unwrap());
static PAIR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:one\s+pair|pairs?)\b").unwrap());
static DISTINCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:no\s+repeats?|all\s+(?:digits\s+)?(?:different|distinct)|singles)\b")
        .unwrap()
});

/// Pick the shape named by the action. Compound names are tried before
/// their components ("full house" before "triple", "two pairs" before
/// "pair").
fn named_shape(action: &str) -> Option<Shape> {
    if QUINT_RE.is_match(action) {
        Some(Shape::Quint)
    } else if QUAD_RE.is_match(action) {
        Some(Shape::Quad)
    } else if FULL_HOUSE_RE.is_match(action) {
        Some(Shape::FullHouse)
    } else if DOUBLE_DOUBLE_RE.is_match(action) {
        Some(Shape::DoubleDouble)
    } else if TRIPLE_RE.is_match(action) {
        Some(Shape::Triple)
    } else if PAIR_RE.is_match(action) {
        Some(Shape::Pair)
    } else if DISTINCT_RE.is_match(action) {
        Some(Shape::Distinct)
    } else {
        None
    }
}

pub fn compile(descriptor: &FilterDescriptor) -> Option<ActionFn> {
    let action = descriptor.action.as_str();
    let target = named_shape(action)?;
    let require = is_require(action);

    Some(Box::new(move |combo: &Combination, _ctx: &FilterContext| {
        let shape = Shape::of(combo);
        if require { shape != target } else { shape == target }
    }))
}
