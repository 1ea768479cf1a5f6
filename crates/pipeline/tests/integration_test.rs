//! Integration tests for the pipeline.
//!
//! These tests run the full path — generation, core stage, compilation,
//! ranking, sequential application — the way a session drives it.

use filter_defs::{DescriptorCatalog, DigitClasses};
use generator::{GenerationMethod, Seed, build_seed_context, generate};
use pipeline::{
    CandidatePool, CoreFilterStage, EliminationPipeline, FilterContext, RuleCompiler,
};

const FILTER_SOURCE: &str = "\
# integration batch
No quints :: shape :: always :: eliminate quints
No quads :: shape :: always :: eliminate quads
Sum window :: sum :: seed sum <= 12 :: keep sum between 12 and 25
Hot trap :: trap :: always :: eliminate combos with no hot digits
Run of four :: structure :: always :: eliminate combos with a run of 4 consecutive digits
Broken :: misc :: always :: reticulate splines
";

fn build_stage() -> (EliminationPipeline, CandidatePool, FilterContext, usize) {
    let seed = Seed::parse("10000").unwrap();

    let mut pool =
        CandidatePool::from_combinations(generate(&seed, GenerationMethod::SingleDigitExpansion));
    let core_removed = CoreFilterStage::new(&seed).apply(&mut pool);

    let catalog = DescriptorCatalog::from_source("integration", FILTER_SOURCE).unwrap();
    let outcome = RuleCompiler::new().compile(catalog.descriptors());
    // "Broken" is the only descriptor that fails to compile.
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].name, "Broken");

    let ctx = FilterContext {
        seed: build_seed_context(&seed),
        classes: DigitClasses::from_inputs("0,1", "", ""),
    };

    (EliminationPipeline::new(outcome.filters), pool, ctx, core_removed)
}

#[test]
fn test_core_stage_trims_single_digit_pool() {
    let (_, pool, _, core_removed) = build_stage();

    // The single-digit expansion is wider than the pair intersection.
    assert!(core_removed > 0);
    assert!(!pool.is_empty());

    // Everything that survived embeds a seed pair: (0,0), (0,1) or (1,1)
    // for seed "10000" means at least two of {0, 1} across the digits.
    for combo in pool.iter() {
        let counts = combo.counts();
        let zero_one = counts[0] as u32 + counts[1] as u32;
        assert!(zero_one >= 2, "{} survived without a seed pair", combo);
    }
}

#[test]
fn test_ranking_is_ascending_and_complete() {
    let (pipeline, pool, ctx, _) = build_stage();

    let ranking = pipeline.rank(&pool, &ctx);
    assert_eq!(ranking.len(), 5);
    for window in ranking.windows(2) {
        assert!(window[0].would_eliminate <= window[1].would_eliminate);
    }
}

#[test]
fn test_sum_window_example() {
    // Seed "10000" has digit sum 1, so the "seed sum <= 12" trigger fires.
    let (pipeline, pool, ctx, _) = build_stage();

    let sum_filter = pipeline.get("Sum window").unwrap();
    let eliminate =
        |s: &str| sum_filter.eliminates(&generator::Combination::parse(s).unwrap(), &ctx);

    assert!(eliminate("00000")); // sum 0
    assert!(eliminate("55000")); // sum 10
    assert!(eliminate("99999")); // sum 45
    assert!(!eliminate("23450")); // sum 14, inside the keep window

    // And via the pool: "00011" (sum 2) is present after the core stage
    // and would be removed by this filter.
    assert!(pool.contains(&generator::Combination::parse("00011").unwrap()));
    let preview = pipeline.preview("Sum window", &pool, &ctx).unwrap();
    assert!(preview > 0);
}

#[test]
fn test_sequential_application_matches_previews() {
    let (pipeline, mut pool, ctx, _) = build_stage();
    let names = ["No quints", "No quads", "Run of four", "Sum window", "Hot trap"];

    let mut last_size = pool.len();
    for name in names {
        let previewed = pipeline.preview(name, &pool, &ctx).unwrap();
        let record = pipeline.apply(name, &mut pool, &ctx).unwrap();

        assert_eq!(previewed, record.eliminated, "preview mismatch for {}", name);
        assert_eq!(record.pool_before, last_size);
        assert!(record.pool_after <= record.pool_before);
        last_size = record.pool_after;
    }

    // Re-applying the whole chain removes nothing further.
    for name in names {
        let record = pipeline.apply(name, &mut pool, &ctx).unwrap();
        assert_eq!(record.eliminated, 0, "{} was not idempotent", name);
    }
}

#[test]
fn test_trap_filter_uses_supplied_classes() {
    let (pipeline, pool, ctx, _) = build_stage();

    // Hot digits are 0 and 1; after the core stage every combination
    // holds at least two of them, so the trap removes nothing.
    let preview = pipeline.preview("Hot trap", &pool, &ctx).unwrap();
    assert_eq!(preview, 0);

    // Without supplied hot digits the filter is inert by design.
    let inert_ctx = FilterContext {
        seed: ctx.seed.clone(),
        classes: DigitClasses::default(),
    };
    let preview = pipeline.preview("Hot trap", &pool, &inert_ctx).unwrap();
    assert_eq!(preview, 0);
}
