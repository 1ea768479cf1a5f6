//! Pipeline for filtering a seed-generated candidate pool.
//!
//! This crate provides:
//! - The `PercentileGate` trait and the unconditional core filter stage
//! - The rule compiler turning filter descriptors into executable predicates
//! - The elimination pipeline: ranking, preview, and sequential application
//!
//! ## Architecture
//! The pipeline processes a pool in stages:
//! 1. The core stage trims the generated pool to the seed intersection
//!    (after the injectable percentile gate)
//! 2. The compiler resolves descriptor text against a pattern table, once
//! 3. The elimination pipeline ranks the compiled filters by
//!    aggressiveness and applies the selected ones in sequence
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{CandidatePool, CoreFilterStage, EliminationPipeline, FilterContext, RuleCompiler};
//!
//! let mut pool = CandidatePool::from_combinations(generated);
//! CoreFilterStage::new(&seed).apply(&mut pool);
//!
//! let outcome = RuleCompiler::new().compile(catalog.descriptors());
//! let pipeline = EliminationPipeline::new(outcome.filters);
//!
//! for row in pipeline.rank(&pool, &ctx) {
//!     println!("{} would eliminate {}", row.name, row.would_eliminate);
//! }
//! let record = pipeline.apply("No quads", &mut pool, &ctx)?;
//! ```

pub mod traits;
pub mod pool;
pub mod core_stage;
pub mod compiler;
pub mod patterns;
pub mod elimination;

// Re-export main types
pub use traits::{AlwaysKeep, PercentileGate};
pub use pool::CandidatePool;
pub use core_stage::CoreFilterStage;
pub use compiler::{
    ActionFn, CompileDiagnostic, CompileOutcome, CompiledFilter, FilterContext, PatternRule,
    RuleCompiler, Trigger,
};
pub use patterns::shape::Shape;
pub use elimination::{EliminationPipeline, EliminationRecord, FilterRanking};
