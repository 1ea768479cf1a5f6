//! # Sieve Session
//!
//! This module coordinates the entire elimination pipeline for one seed:
//! 1. Parse the seed (anything malformed is the valid "no seed" state)
//! 2. Generate the raw pool with the selected method
//! 3. Apply the unconditional core filter stage
//! 4. Compile the descriptor catalog into executable filters, once
//! 5. Compute the static least-to-most-aggressive ranking
//! 6. Preview/apply selected filters against the shrinking pool
//! 7. Optionally reorder survivors through the external trap ranker
//!
//! The session is an explicit value owning exactly one candidate pool and
//! its ordered elimination records; there is no ambient state. Changing
//! the seed or the method means building a new session.

use anyhow::{Result, bail};
use tracing::{info, warn};

use filter_defs::{DescriptorCatalog, DigitClasses};
use generator::{GenerationMethod, Seed, build_seed_context, generate};
use pipeline::{
    AlwaysKeep, CandidatePool, CompileDiagnostic, CoreFilterStage, EliminationPipeline,
    EliminationRecord, FilterContext, FilterRanking, PercentileGate, RuleCompiler,
};
use rank_client::TrapRankerClient;

/// Inputs for one session.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    /// Seed text as entered; validated by the session.
    pub seed: String,
    /// Which expansion method builds the raw pool.
    pub method: GenerationMethod,
    /// Optional hot/cold/due digit classes for trap filters.
    pub classes: DigitClasses,
}

/// One seed's sieve session: the pool, the compiled filters, the cached
/// ranking, and everything applied so far.
pub struct Session {
    method: GenerationMethod,
    ctx: Option<FilterContext>,
    pool: CandidatePool,
    base_size: usize,
    pipeline: EliminationPipeline,
    ranking: Vec<FilterRanking>,
    diagnostics: Vec<CompileDiagnostic>,
    records: Vec<EliminationRecord>,
    ranker: Option<TrapRankerClient>,
}

impl Session {
    /// Build a session with the baseline always-keep percentile gate.
    pub fn new(request: SessionRequest, catalog: &DescriptorCatalog) -> Self {
        Self::with_gate(request, catalog, AlwaysKeep)
    }

    /// Build a session with an injected percentile gate.
    pub fn with_gate(
        request: SessionRequest,
        catalog: &DescriptorCatalog,
        gate: impl PercentileGate + 'static,
    ) -> Self {
        // Compile once; the filters are reused for every later call.
        let outcome = RuleCompiler::new().compile(catalog.descriptors());
        info!(
            "Compiled {} filters ({} descriptors excluded)",
            outcome.filters.len(),
            outcome.diagnostics.len()
        );
        let pipeline = EliminationPipeline::new(outcome.filters);

        let Some(seed) = Seed::parse(&request.seed) else {
            if !request.seed.trim().is_empty() {
                warn!("'{}' is not a 5-digit seed; session is empty", request.seed);
            }
            let ranking = pipeline
                .filters()
                .iter()
                .map(|f| FilterRanking {
                    name: f.name().to_string(),
                    would_eliminate: 0,
                })
                .collect();
            return Self {
                method: request.method,
                ctx: None,
                pool: CandidatePool::new(),
                base_size: 0,
                pipeline,
                ranking,
                diagnostics: outcome.diagnostics,
                records: Vec::new(),
                ranker: None,
            };
        };

        // Generate the raw pool
        let mut pool = CandidatePool::from_combinations(generate(&seed, request.method));
        info!("Generated {} raw combinations for seed {}", pool.len(), seed);

        // Core filter stage
        let stage = CoreFilterStage::with_gate(&seed, gate);
        let removed = stage.apply(&mut pool);
        info!(
            "Core filter stage (gate: {}) removed {}, base pool is {}",
            stage.gate_name(),
            removed,
            pool.len()
        );

        let ctx = FilterContext {
            seed: build_seed_context(&seed),
            classes: request.classes,
        };

        // Static ranking against the untouched base pool, cached for the
        // session; recomputing would yield the same order.
        let ranking = pipeline.rank(&pool, &ctx);
        info!("Ranked {} filters against the base pool", ranking.len());

        Self {
            method: request.method,
            base_size: pool.len(),
            ctx: Some(ctx),
            pool,
            pipeline,
            ranking,
            diagnostics: outcome.diagnostics,
            records: Vec::new(),
            ranker: None,
        }
    }

    /// The parsed seed, if the session has one.
    pub fn seed(&self) -> Option<Seed> {
        self.ctx.as_ref().map(|ctx| ctx.seed.seed)
    }

    pub fn method(&self) -> GenerationMethod {
        self.method
    }

    /// Base pool size after the core stage, before any manual filter.
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// The current (shrinking) candidate pool.
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Static ranking, least aggressive first, computed against the base
    /// pool at construction.
    pub fn ranking(&self) -> &[FilterRanking] {
        &self.ranking
    }

    /// Descriptors the compiler had to exclude.
    pub fn diagnostics(&self) -> &[CompileDiagnostic] {
        &self.diagnostics
    }

    /// Every filter application so far, in order.
    pub fn records(&self) -> &[EliminationRecord] {
        &self.records
    }

    /// How many combinations `name` would remove from the current pool.
    pub fn preview(&self, name: &str) -> Result<usize> {
        match &self.ctx {
            Some(ctx) => self.pipeline.preview(name, &self.pool, ctx),
            None => {
                if self.pipeline.get(name).is_none() {
                    bail!("unknown filter: {}", name);
                }
                Ok(0)
            }
        }
    }

    /// Apply `name` to the current pool and record the result.
    pub fn apply(&mut self, name: &str) -> Result<EliminationRecord> {
        let record = match &self.ctx {
            Some(ctx) => self.pipeline.apply(name, &mut self.pool, ctx)?,
            None => {
                if self.pipeline.get(name).is_none() {
                    bail!("unknown filter: {}", name);
                }
                EliminationRecord {
                    filter: name.to_string(),
                    eliminated: 0,
                    pool_before: 0,
                    pool_after: 0,
                }
            }
        };
        info!(
            "Applied {}: eliminated {}, {} remaining",
            record.filter, record.eliminated, record.pool_after
        );
        self.records.push(record.clone());
        Ok(record)
    }

    /// Apply every compiled filter in ranked order.
    pub fn apply_ranked(&mut self) -> Result<Vec<EliminationRecord>> {
        let names: Vec<String> = self.ranking.iter().map(|r| r.name.clone()).collect();
        let mut applied = Vec::with_capacity(names.len());
        for name in names {
            applied.push(self.apply(&name)?);
        }
        Ok(applied)
    }

    /// Attach the external trap ranker.
    ///
    /// This boundary never aborts a session: a failed connection is
    /// logged and the session simply stays unranked.
    pub async fn connect_ranker(&mut self, addr: &str) {
        match TrapRankerClient::connect(addr.to_string()).await {
            Ok(client) => {
                info!("Trap ranker attached at {}", client.service_address());
                self.ranker = Some(client);
            }
            Err(e) => {
                warn!("Trap ranker unavailable, continuing unranked: {}", e);
                self.ranker = None;
            }
        }
    }

    pub fn has_ranker(&self) -> bool {
        self.ranker.is_some()
    }

    /// The survivors, ranked by the external hook when one is attached
    /// and healthy, in canonical order otherwise.
    pub async fn final_output(&mut self) -> Vec<String> {
        let survivors = self.pool.to_strings();

        let Some(client) = &self.ranker else {
            return survivors;
        };

        let seed_text = self
            .ctx
            .as_ref()
            .map(|ctx| ctx.seed.seed.to_string())
            .unwrap_or_default();

        let mut client = client.clone();
        match client.rank(&seed_text, &survivors).await {
            Ok(ranked) => {
                info!("Trap ranker ordered {} survivors", ranked.len());
                ranked
            }
            Err(e) => {
                warn!("Trap ranker failed, returning unranked pool: {}", e);
                survivors
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use generator::Combination;
    use rank_client::trapranking::trap_ranker_server::{TrapRanker, TrapRankerServer};
    use rank_client::trapranking::{RankRequest, RankResponse};
    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::transport::Server;
    use tonic::{Request, Response, Status};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    const FILTER_SOURCE: &str = "\
No quints :: shape :: always :: eliminate quints
No quads :: shape :: always :: eliminate quads
Sum window :: sum :: seed sum <= 12 :: keep sum between 2 and 30
Broken rule :: misc :: always :: reverse the polarity
";

    fn test_catalog() -> DescriptorCatalog {
        DescriptorCatalog::from_source("test", FILTER_SOURCE).unwrap()
    }

    fn test_request(seed: &str) -> SessionRequest {
        SessionRequest {
            seed: seed.to_string(),
            method: GenerationMethod::DigitPairExpansion,
            classes: DigitClasses::default(),
        }
    }

    fn small_session() -> Session {
        // Tiny catalog so ranking/apply tests stay readable.
        Session::new(test_request("11234"), &test_catalog())
    }

    // ============================================================================
    // Mock Trap-Ranking Services
    // ============================================================================

    /// Mock ranker that returns the combinations reversed — a valid
    /// permutation with a recognizable order.
    #[derive(Default)]
    struct ReversingRanker;

    #[tonic::async_trait]
    impl TrapRanker for ReversingRanker {
        async fn rank_combinations(
            &self,
            request: Request<RankRequest>,
        ) -> Result<Response<RankResponse>, Status> {
            let mut ranked = request.into_inner().combinations;
            ranked.reverse();
            Ok(Response::new(RankResponse { ranked }))
        }
    }

    /// Mock ranker that returns garbage that is not a permutation.
    #[derive(Default)]
    struct GarbageRanker;

    #[tonic::async_trait]
    impl TrapRanker for GarbageRanker {
        async fn rank_combinations(
            &self,
            request: Request<RankRequest>,
        ) -> Result<Response<RankResponse>, Status> {
            let len = request.into_inner().combinations.len();
            Ok(Response::new(RankResponse {
                ranked: vec!["99999".to_string(); len],
            }))
        }
    }

    /// Start a mock ranking service on a random port.
    async fn start_mock_ranker<S>(service: S) -> (String, tokio::task::JoinHandle<()>)
    where
        S: TrapRanker,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock ranking service");

        let addr = listener.local_addr().expect("Failed to get local address");
        let service = TrapRankerServer::new(service);

        let handle = tokio::spawn(async move {
            Server::builder()
                .add_service(service)
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Mock ranking service failed");
        });

        (format!("http://{}", addr), handle)
    }

    // ============================================================================
    // Session Construction and Pipeline
    // ============================================================================

    #[test]
    fn test_base_pool_is_pair_intersection() {
        let session = small_session();
        let seed = Seed::parse("11234").unwrap();

        let pair_size = generate(&seed, GenerationMethod::DigitPairExpansion).len();
        assert_eq!(session.base_size(), pair_size);
        assert_eq!(session.pool().len(), pair_size);
        assert_eq!(session.seed(), Some(seed));
    }

    #[test]
    fn test_single_digit_method_still_shrinks_to_intersection() {
        let request = SessionRequest {
            seed: "11234".to_string(),
            method: GenerationMethod::SingleDigitExpansion,
            classes: DigitClasses::default(),
        };
        let session = Session::new(request, &test_catalog());

        let seed = Seed::parse("11234").unwrap();
        let pair_size = generate(&seed, GenerationMethod::DigitPairExpansion).len();
        assert_eq!(session.base_size(), pair_size);
    }

    #[test]
    fn test_ranking_is_ascending_and_excludes_broken() {
        let session = small_session();

        assert_eq!(session.ranking().len(), 3);
        for window in session.ranking().windows(2) {
            assert!(window[0].would_eliminate <= window[1].would_eliminate);
        }

        assert_eq!(session.diagnostics().len(), 1);
        assert_eq!(session.diagnostics()[0].name, "Broken rule");
    }

    #[test]
    fn test_preview_matches_apply_and_is_recorded() {
        let mut session = small_session();

        let previewed = session.preview("No quads").unwrap();
        let record = session.apply("No quads").unwrap();

        assert_eq!(previewed, record.eliminated);
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0], record);
        assert_eq!(session.pool().len(), record.pool_after);

        // Immediate reapplication removes nothing more.
        let again = session.apply("No quads").unwrap();
        assert_eq!(again.eliminated, 0);
    }

    #[test]
    fn test_apply_ranked_walks_least_aggressive_first() {
        let mut session = small_session();
        let order: Vec<String> = session.ranking().iter().map(|r| r.name.clone()).collect();

        let records = session.apply_ranked().unwrap();

        let applied: Vec<String> = records.iter().map(|r| r.filter.clone()).collect();
        assert_eq!(applied, order);

        // Monotonic shrinkage across the chain.
        for window in records.windows(2) {
            assert_eq!(window[0].pool_after, window[1].pool_before);
        }
        assert_eq!(session.records().len(), records.len());
    }

    #[test]
    fn test_unknown_filter_errors() {
        let mut session = small_session();
        assert!(session.preview("No such rule").is_err());
        assert!(session.apply("No such rule").is_err());
    }

    // ============================================================================
    // No-Seed Sessions
    // ============================================================================

    #[test]
    fn test_malformed_seed_is_empty_noop_session() {
        let mut session = Session::new(test_request("12x45"), &test_catalog());

        assert_eq!(session.seed(), None);
        assert!(session.pool().is_empty());
        assert_eq!(session.base_size(), 0);
        assert!(session.ranking().iter().all(|r| r.would_eliminate == 0));

        // Known filters still answer; they just do nothing.
        assert_eq!(session.preview("No quads").unwrap(), 0);
        let record = session.apply("No quads").unwrap();
        assert_eq!(record.eliminated, 0);
        assert!(session.preview("No such rule").is_err());
    }

    #[tokio::test]
    async fn test_no_seed_final_output_is_empty() {
        let mut session = Session::new(test_request(""), &test_catalog());
        assert!(session.final_output().await.is_empty());
    }

    // ============================================================================
    // Ranking Hook Boundary
    // ============================================================================

    #[tokio::test]
    async fn test_final_output_without_ranker_is_canonical_order() {
        let mut session = small_session();
        let output = session.final_output().await;

        assert_eq!(output.len(), session.pool().len());
        let mut sorted = output.clone();
        sorted.sort();
        assert_eq!(output, sorted);
    }

    #[tokio::test]
    async fn test_final_output_uses_healthy_ranker() {
        let (addr, handle) = start_mock_ranker(ReversingRanker).await;

        let mut session = small_session();
        session.connect_ranker(&addr).await;
        assert!(session.has_ranker());

        let unranked = session.pool().to_strings();
        let output = session.final_output().await;

        let mut reversed = unranked;
        reversed.reverse();
        assert_eq!(output, reversed);

        handle.abort();
    }

    #[tokio::test]
    async fn test_final_output_falls_back_on_bad_response() {
        let (addr, handle) = start_mock_ranker(GarbageRanker).await;

        let mut session = small_session();
        session.connect_ranker(&addr).await;
        assert!(session.has_ranker());

        let output = session.final_output().await;
        assert_eq!(output, session.pool().to_strings());

        handle.abort();
    }

    #[tokio::test]
    async fn test_unreachable_ranker_degrades_to_unranked() {
        let mut session = small_session();

        // Nothing listens here; the connection fails and the session
        // continues unranked.
        session.connect_ranker("http://127.0.0.1:9").await;
        assert!(!session.has_ranker());

        let output = session.final_output().await;
        assert_eq!(output, session.pool().to_strings());
    }

    // ============================================================================
    // End-to-End Sanity
    // ============================================================================

    #[test]
    fn test_session_survivors_are_canonical() {
        let mut session = small_session();
        session.apply_ranked().unwrap();

        for combo in session.pool().iter() {
            assert_eq!(
                Combination::parse(&combo.to_string()),
                Some(*combo),
                "pool held a non-canonical entry"
            );
        }
    }
}
