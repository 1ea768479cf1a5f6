//! Filter rule compiler.
//!
//! Turns human-authored [`FilterDescriptor`]s into executable predicates.
//! Recognition is table-driven: each pattern family registers one
//! constructor in an ordered lookup table, resolved once at compile time.
//! Evaluation never touches descriptor text again.
//!
//! Conditions compile to a [`Trigger`] over the seed; actions compile to a
//! boxed pure closure over the combination. A descriptor whose condition
//! or action matches no known pattern becomes a named
//! [`CompileDiagnostic`] and is excluded — the rest of the batch is
//! unaffected.
//!
//! Compilation has no hidden state: compiling the same descriptor list
//! twice yields behaviorally identical filters.

use filter_defs::{DigitClasses, FilterDescriptor};
use generator::{Combination, SeedContext};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::patterns;

/// Everything a compiled predicate may consult besides the combination
/// itself: the precomputed seed view and the caller-supplied digit
/// classes. Built once per session and shared by every evaluation.
#[derive(Debug, Clone)]
pub struct FilterContext {
    pub seed: SeedContext,
    pub classes: DigitClasses,
}

/// A compiled action predicate. Returns true when the combination should
/// be eliminated. Pure: captures only values parsed out of the descriptor.
pub type ActionFn = Box<dyn Fn(&Combination, &FilterContext) -> bool + Send + Sync>;

/// Compiled trigger condition, evaluated against the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fires for every seed.
    Always,
    /// Fires when the seed digit-sum lies in the inclusive range.
    SeedSumIn(u32, u32),
    /// Fires when the seed holds the digit in any position.
    SeedContainsDigit(u8),
    /// Fires when two seed positions form the (canonical) pair.
    SeedContainsPair(u8, u8),
}

impl Trigger {
    pub fn is_active(&self, seed: &SeedContext) -> bool {
        match *self {
            Trigger::Always => true,
            Trigger::SeedSumIn(lo, hi) => seed.digit_sum >= lo && seed.digit_sum <= hi,
            Trigger::SeedContainsDigit(d) => seed.contains_digit(d),
            Trigger::SeedContainsPair(a, b) => seed.contains_pair(a, b),
        }
    }
}

static COND_ALWAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:always|any|unconditional|none|-)$").unwrap());
static COND_SEED_SUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bseed\s+sum\b").unwrap());
static COND_SEED_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bseed\s+contains\s+(?:the\s+)?pair\s*(\d)\s*,?\s*(\d)").unwrap()
});
static COND_SEED_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bseed\s+contains\s+(?:digit\s+)?(\d)\b").unwrap());

/// Compile a condition string into a trigger. `None` means unrecognized.
pub(crate) fn parse_trigger(condition: &str) -> Option<Trigger> {
    let condition = condition.trim();
    if condition.is_empty() || COND_ALWAYS.is_match(condition) {
        return Some(Trigger::Always);
    }
    if COND_SEED_SUM.is_match(condition) {
        let (lo, hi) = patterns::parse_range(condition)?;
        return Some(Trigger::SeedSumIn(lo, hi));
    }
    if let Some(caps) = COND_SEED_PAIR.captures(condition) {
        let a: u8 = caps[1].parse().ok()?;
        let b: u8 = caps[2].parse().ok()?;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        return Some(Trigger::SeedContainsPair(lo, hi));
    }
    if let Some(caps) = COND_SEED_DIGIT.captures(condition) {
        let d: u8 = caps[1].parse().ok()?;
        return Some(Trigger::SeedContainsDigit(d));
    }
    None
}

/// A descriptor plus its compiled trigger and action.
pub struct CompiledFilter {
    descriptor: FilterDescriptor,
    family: &'static str,
    trigger: Trigger,
    action: ActionFn,
}

impl CompiledFilter {
    /// Returns the name of this filter (for ranking/logging)
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Which pattern family recognized the action.
    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn descriptor(&self) -> &FilterDescriptor {
        &self.descriptor
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// True if this filter eliminates the combination under the context.
    ///
    /// An inactive trigger eliminates nothing.
    pub fn eliminates(&self, combo: &Combination, ctx: &FilterContext) -> bool {
        self.trigger.is_active(&ctx.seed) && (self.action)(combo, ctx)
    }
}

/// One entry of the pattern lookup table: a family name and a stateless
/// constructor that either recognizes the descriptor's action or declines.
#[derive(Clone, Copy)]
pub struct PatternRule {
    pub family: &'static str,
    pub compile: fn(&FilterDescriptor) -> Option<ActionFn>,
}

/// A descriptor the compiler had to exclude, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileDiagnostic {
    pub name: String,
    pub reason: String,
}

impl std::fmt::Display for CompileDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "filter '{}': {}", self.name, self.reason)
    }
}

/// Result of compiling a descriptor batch.
pub struct CompileOutcome {
    pub filters: Vec<CompiledFilter>,
    pub diagnostics: Vec<CompileDiagnostic>,
}

/// The built-in pattern families, most specific first. First match wins.
fn default_pattern_table() -> Vec<PatternRule> {
    vec![
        PatternRule { family: "sum-range", compile: patterns::sum_range::compile },
        PatternRule { family: "shape", compile: patterns::shape::compile },
        PatternRule { family: "digit-class", compile: patterns::digit_class::compile },
        PatternRule { family: "position", compile: patterns::position::compile },
        PatternRule { family: "mirror", compile: patterns::mirror::compile },
        PatternRule { family: "consecutive-run", compile: patterns::consecutive::compile },
        PatternRule { family: "trap", compile: patterns::trap::compile },
        PatternRule { family: "containment", compile: patterns::containment::compile },
    ]
}

/// Table-driven descriptor compiler.
pub struct RuleCompiler {
    table: Vec<PatternRule>,
}

impl RuleCompiler {
    /// Compiler with the built-in pattern table.
    pub fn new() -> Self {
        Self {
            table: default_pattern_table(),
        }
    }

    /// Register an additional pattern family (builder pattern).
    ///
    /// This is the extension point for rule families that exist in bulk
    /// in descriptor sources but are not part of the built-in table: new
    /// constructors slot in without touching the compiler core. Appended
    /// rules are tried after the built-ins.
    pub fn with_rule(mut self, rule: PatternRule) -> Self {
        self.table.push(rule);
        self
    }

    /// Compile a descriptor batch into filters plus exclusion diagnostics.
    pub fn compile(&self, descriptors: &[FilterDescriptor]) -> CompileOutcome {
        let mut filters = Vec::new();
        let mut diagnostics = Vec::new();

        for descriptor in descriptors {
            let Some(trigger) = parse_trigger(&descriptor.condition) else {
                let diagnostic = CompileDiagnostic {
                    name: descriptor.name.clone(),
                    reason: format!("unrecognized condition pattern: '{}'", descriptor.condition),
                };
                warn!("Excluding {}", diagnostic);
                diagnostics.push(diagnostic);
                continue;
            };

            match self.recognize(descriptor) {
                Some((family, action)) => filters.push(CompiledFilter {
                    descriptor: descriptor.clone(),
                    family,
                    trigger,
                    action,
                }),
                None => {
                    let diagnostic = CompileDiagnostic {
                        name: descriptor.name.clone(),
                        reason: format!("unrecognized action pattern: '{}'", descriptor.action),
                    };
                    warn!("Excluding {}", diagnostic);
                    diagnostics.push(diagnostic);
                }
            }
        }

        CompileOutcome {
            filters,
            diagnostics,
        }
    }

    fn recognize(&self, descriptor: &FilterDescriptor) -> Option<(&'static str, ActionFn)> {
        for rule in &self.table {
            if let Some(action) = (rule.compile)(descriptor) {
                return Some((rule.family, action));
            }
        }
        None
    }
}

impl Default for RuleCompiler {
    fn default() -> Self {
        Self::new()
    }
}
