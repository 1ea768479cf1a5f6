//! The elimination pipeline: ranking, preview, and sequential application
//! of compiled filters over a candidate pool.
//!
//! Three operations, all name-keyed:
//! 1. `rank` — read-only elimination counts against a reference pool,
//!    sorted least-aggressive-first. This is the default application
//!    order.
//! 2. `preview` — read-only count against the current pool; equals what
//!    an immediate `apply` would remove.
//! 3. `apply` — removes matches from the pool and returns an
//!    [`EliminationRecord`]. The pool only ever shrinks.

use crate::compiler::{CompiledFilter, FilterContext};
use crate::pool::CandidatePool;
use anyhow::{Result, bail};
use generator::Combination;
use tracing::debug;

/// What one filter application did to the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliminationRecord {
    pub filter: String,
    pub eliminated: usize,
    pub pool_before: usize,
    pub pool_after: usize,
}

/// One row of the static ranking: a filter and how many combinations it
/// would eliminate from the reference pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRanking {
    pub name: String,
    pub would_eliminate: usize,
}

/// An ordered set of compiled filters over one session's pool.
pub struct EliminationPipeline {
    filters: Vec<CompiledFilter>,
}

impl EliminationPipeline {
    pub fn new(filters: Vec<CompiledFilter>) -> Self {
        Self { filters }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The compiled filters, in descriptor order.
    pub fn filters(&self) -> &[CompiledFilter] {
        &self.filters
    }

    /// Look up a compiled filter by name.
    pub fn get(&self, name: &str) -> Option<&CompiledFilter> {
        self.filters.iter().find(|f| f.name() == name)
    }

    /// Elimination counts against `pool`, least aggressive first.
    ///
    /// Read-only: the pool is untouched. The sort is stable, so filters
    /// with equal counts keep their descriptor order and the ranking is
    /// reproducible run over run.
    pub fn rank(&self, pool: &CandidatePool, ctx: &FilterContext) -> Vec<FilterRanking> {
        let mut ranking: Vec<FilterRanking> = self
            .filters
            .iter()
            .map(|filter| FilterRanking {
                name: filter.name().to_string(),
                would_eliminate: count_eliminations(filter, pool, ctx),
            })
            .collect();
        ranking.sort_by_key(|r| r.would_eliminate);
        ranking
    }

    /// How many combinations `name` would remove from `pool` right now.
    pub fn preview(&self, name: &str, pool: &CandidatePool, ctx: &FilterContext) -> Result<usize> {
        let Some(filter) = self.get(name) else {
            bail!("unknown filter: {}", name);
        };
        Ok(count_eliminations(filter, pool, ctx))
    }

    /// Apply `name` to the pool, removing every match.
    pub fn apply(
        &self,
        name: &str,
        pool: &mut CandidatePool,
        ctx: &FilterContext,
    ) -> Result<EliminationRecord> {
        let Some(filter) = self.get(name) else {
            bail!("unknown filter: {}", name);
        };

        let pool_before = pool.len();
        debug!("Applying filter: {} (input count: {})", filter.name(), pool_before);

        pool.retain(|combo: &Combination| !filter.eliminates(combo, ctx));

        let pool_after = pool.len();
        debug!("Filter applied: {} (output count: {})", filter.name(), pool_after);

        Ok(EliminationRecord {
            filter: name.to_string(),
            eliminated: pool_before - pool_after,
            pool_before,
            pool_after,
        })
    }
}

fn count_eliminations(filter: &CompiledFilter, pool: &CandidatePool, ctx: &FilterContext) -> usize {
    pool.iter().filter(|combo| filter.eliminates(combo, ctx)).count()
}
