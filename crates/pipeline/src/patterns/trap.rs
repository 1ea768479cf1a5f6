//! Hot/cold/due trap family.
//!
//! These rules count combination digits against the caller-supplied
//! hot/cold/due classification sets (the only filters that consume them):
//! - `eliminate combos with no hot digits`
//! - `eliminate combos with at least 2 cold digits`
//! - `require at least one due digit`
//!
//! A trap filter whose referenced class set was not supplied is inert —
//! it eliminates nothing rather than letting an empty set wipe the pool.

use crate::compiler::{ActionFn, FilterContext};
use crate::patterns::{is_require, parse_count_bound};
use filter_defs::FilterDescriptor;
use once_cell::sync::Lazy;
use regex::Regex;
use generator::Combination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrapKind {
    Hot,
    Cold,
    Due,
}

static TRAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(hot|cold|due)\s+digits?\b").unwrap());

pub fn compile(descriptor: &FilterDescriptor) -> Option<ActionFn> {
    let action = descriptor.action.as_str();
    let caps = TRAP_RE.captures(action)?;

    let kind = match caps[1].to_lowercase().as_str() {
        "hot" => TrapKind::Hot,
        "cold" => TrapKind::Cold,
        "due" => TrapKind::Due,
        _ => return None,
    };
    let bound = parse_count_bound(action)?;
    let require = is_require(action);

    Some(Box::new(move |combo: &Combination, ctx: &FilterContext| {
        let class = match kind {
            TrapKind::Hot => &ctx.classes.hot,
            TrapKind::Cold => &ctx.classes.cold,
            TrapKind::Due => &ctx.classes.due,
        };
        if class.is_empty() {
            return false;
        }
        let count = combo.digits().iter().filter(|&&d| class.contains(&d)).count() as u32;
        if require { !bound.matches(count) } else { bound.matches(count) }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_defs::DigitClasses;
    use generator::{Seed, build_seed_context};

    fn ctx_with_classes(hot: &str, cold: &str, due: &str) -> FilterContext {
        FilterContext {
            seed: build_seed_context(&Seed::parse("12345").unwrap()),
            classes: DigitClasses::from_inputs(hot, cold, due),
        }
    }

    fn action(text: &str) -> ActionFn {
        compile(&FilterDescriptor {
            name: "t".into(),
            category: "trap".into(),
            condition: "always".into(),
            action: text.into(),
        })
        .expect("action should compile")
    }

    fn combo(s: &str) -> Combination {
        Combination::parse(s).unwrap()
    }

    #[test]
    fn test_no_hot_digits() {
        let f = action("eliminate combos with no hot digits");
        let ctx = ctx_with_classes("1,2", "", "");
        assert!(f(&combo("03456"), &ctx)); // no 1 or 2
        assert!(!f(&combo("13456"), &ctx));
    }

    #[test]
    fn test_cold_digit_threshold() {
        let f = action("eliminate combos with at least 2 cold digits");
        let ctx = ctx_with_classes("", "0,9", "");
        assert!(f(&combo("00123"), &ctx)); // two cold zeros
        assert!(f(&combo("09123"), &ctx));
        assert!(!f(&combo("01234"), &ctx)); // one cold digit
    }

    #[test]
    fn test_require_due_digit() {
        let f = action("require at least one due digit");
        let ctx = ctx_with_classes("", "", "7");
        assert!(f(&combo("01234"), &ctx)); // no 7 -> eliminated
        assert!(!f(&combo("01237"), &ctx));
    }

    #[test]
    fn test_empty_class_is_inert() {
        let f = action("eliminate combos with no hot digits");
        let ctx = ctx_with_classes("", "", "");
        assert!(!f(&combo("03456"), &ctx));
        assert!(!f(&combo("99999"), &ctx));
    }

    #[test]
    fn test_non_trap_action_declines() {
        let descriptor = FilterDescriptor {
            name: "t".into(),
            category: "manual".into(),
            condition: "always".into(),
            action: "eliminate combos with no mirror digits".into(),
        };
        assert!(compile(&descriptor).is_none());
    }
}
