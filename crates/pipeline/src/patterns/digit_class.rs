//! Digit-class threshold family.
//!
//! Counts the digits of a combination (all five positions, with
//! multiplicity) that satisfy a class predicate and compares the count to
//! a bound:
//! - `eliminate combos with at least 3 high digits`
//! - `require at least 1 prime digit`
//! - `eliminate combos with no even digits`
//!
//! Classes: high (>= 8), low (<= 3), prime ({2,3,5,7}), even, odd.

use crate::compiler::{ActionFn, FilterContext};
use crate::patterns::{is_require, parse_count_bound};
use filter_defs::FilterDescriptor;
use generator::{Combination, Digit};
use once_cell::sync::Lazy;
use regex::Regex;

/// Which digit predicate the rule counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DigitClass {
    High,
    Low,
    Prime,
    Even,
    Odd,
}

impl DigitClass {
    fn contains(self, d: Digit) -> bool {
        match self {
            DigitClass::High => d >= 8,
            DigitClass::Low => d <= 3,
            DigitClass::Prime => matches!(d, 2 | 3 | 5 | 7),
            DigitClass::Even => d % 2 == 0,
            DigitClass::Odd => d % 2 == 1,
        }
    }
}

static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(high|low|prime|even|odd)\s+digits?\b").unwrap());

pub fn compile(descriptor: &FilterDescriptor) -> Option<ActionFn> {
    let action = descriptor.action.as_str();
    let caps = CLASS_RE.captures(action)?;

    let class = match caps[1].to_lowercase().as_str() {
        "high" => DigitClass::High,
        "low" => DigitClass::Low,
        "prime" => DigitClass::Prime,
        "even" => DigitClass::Even,
        "odd" => DigitClass::Odd,
        _ => return None,
    };
    let bound = parse_count_bound(action)?;
    let require = is_require(action);

    Some(Box::new(move |combo: &Combination, _ctx: &FilterContext| {
        let count = combo.digits().iter().filter(|&&d| class.contains(d)).count() as u32;
        if require { !bound.matches(count) } else { bound.matches(count) }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_defs::DigitClasses;
    use generator::{Seed, build_seed_context};

    fn ctx() -> FilterContext {
        FilterContext {
            seed: build_seed_context(&Seed::parse("12345").unwrap()),
            classes: DigitClasses::default(),
        }
    }

    fn action(text: &str) -> ActionFn {
        compile(&FilterDescriptor {
            name: "t".into(),
            category: "manual".into(),
            condition: "always".into(),
            action: text.into(),
        })
        .expect("action should compile")
    }

    fn combo(s: &str) -> Combination {
        Combination::parse(s).unwrap()
    }

    #[test]
    fn test_high_digit_threshold() {
        let f = action("eliminate combos with at least 3 high digits");
        let ctx = ctx();
        assert!(f(&combo("08899"), &ctx)); // 8,8,9,9 -> 4 high
        assert!(!f(&combo("01289"), &ctx)); // 8,9 -> 2 high
    }

    #[test]
    fn test_prime_digit_requirement() {
        let f = action("require at least 1 prime digit");
        let ctx = ctx();
        assert!(f(&combo("00148"), &ctx)); // no primes -> eliminated
        assert!(!f(&combo("00138"), &ctx)); // 3 is prime -> kept
    }

    #[test]
    fn test_low_digits_counted_with_multiplicity() {
        let f = action("eliminate combos with more than 3 low digits");
        let ctx = ctx();
        assert!(f(&combo("00012"), &ctx)); // five low digits
        assert!(!f(&combo("01299"), &ctx)); // three low digits
    }

    #[test]
    fn test_no_even_digits() {
        let f = action("eliminate combos with no even digits");
        let ctx = ctx();
        assert!(f(&combo("13579"), &ctx));
        assert!(!f(&combo("13578"), &ctx));
    }

    #[test]
    fn test_missing_bound_declines() {
        let descriptor = FilterDescriptor {
            name: "t".into(),
            category: "manual".into(),
            condition: "always".into(),
            action: "eliminate combos with high digits sometimes".into(),
        };
        assert!(compile(&descriptor).is_none());
    }
}
