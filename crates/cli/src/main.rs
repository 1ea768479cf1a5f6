use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use filter_defs::{DescriptorCatalog, DigitClasses};
use generator::{GenerationMethod, Seed, generate};
use session::{Session, SessionRequest};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// BoxSieve - seeded 5-digit combination sieve
#[derive(Parser)]
#[command(name = "boxsieve")]
#[command(about = "Derive and narrow 5-digit box combinations from a seed", long_about = None)]
struct Cli {
    /// Path to the filter descriptor file
    #[arg(short, long, default_value = "data/filters.txt")]
    filters: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the candidate pool for a seed
    Generate {
        /// 5-digit seed
        #[arg(long)]
        seed: String,

        /// Generation method: "single" or "pair"
        #[arg(long, default_value = "pair")]
        method: String,

        /// How many combinations to print
        #[arg(long, default_value = "10")]
        show: usize,
    },

    /// Show the compiled filters ranked least -> most aggressive
    Filters {
        /// 5-digit seed the ranking is computed against
        #[arg(long)]
        seed: String,

        /// Generation method: "single" or "pair"
        #[arg(long, default_value = "pair")]
        method: String,

        /// Hot digits (comma-separated)
        #[arg(long, default_value = "")]
        hot: String,

        /// Cold digits (comma-separated)
        #[arg(long, default_value = "")]
        cold: String,

        /// Due digits (comma-separated)
        #[arg(long, default_value = "")]
        due: String,
    },

    /// Run a session: generate, apply filters, report survivors
    Run {
        /// 5-digit seed
        #[arg(long)]
        seed: String,

        /// Generation method: "single" or "pair"
        #[arg(long, default_value = "pair")]
        method: String,

        /// Hot digits (comma-separated)
        #[arg(long, default_value = "")]
        hot: String,

        /// Cold digits (comma-separated)
        #[arg(long, default_value = "")]
        cold: String,

        /// Due digits (comma-separated)
        #[arg(long, default_value = "")]
        due: String,

        /// Apply a specific filter by name (repeatable, applied in order)
        #[arg(long = "apply")]
        apply: Vec<String>,

        /// Apply every compiled filter in ranked order
        #[arg(long)]
        apply_all: bool,

        /// Address of an external trap-ranking service
        #[arg(long)]
        ranker: Option<String>,

        /// Write records and survivors to a JSON file
        #[arg(long)]
        json: Option<PathBuf>,

        /// How many survivors to print
        #[arg(long, default_value = "20")]
        show: usize,
    },

    /// Time session construction across random seeds
    Benchmark {
        /// Number of sessions to build
        #[arg(long, default_value = "20")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Load the descriptor catalog once; sessions reuse it.
    let catalog = Arc::new(
        DescriptorCatalog::load_from_file(&cli.filters)
            .with_context(|| format!("Failed to load filters from {}", cli.filters.display()))?,
    );

    match cli.command {
        Commands::Generate { seed, method, show } => handle_generate(seed, method, show)?,
        Commands::Filters {
            seed,
            method,
            hot,
            cold,
            due,
        } => handle_filters(catalog, seed, method, hot, cold, due)?,
        Commands::Run {
            seed,
            method,
            hot,
            cold,
            due,
            apply,
            apply_all,
            ranker,
            json,
            show,
        } => {
            handle_run(
                catalog, seed, method, hot, cold, due, apply, apply_all, ranker, json, show,
            )
            .await?
        }
        Commands::Benchmark { requests } => handle_benchmark(catalog, requests)?,
    }

    Ok(())
}

/// Parse the generation method flag
fn parse_method(method: &str) -> Result<GenerationMethod> {
    match method.to_lowercase().as_str() {
        "single" | "1" | "1-digit" => Ok(GenerationMethod::SingleDigitExpansion),
        "pair" | "2" | "2-digit" => Ok(GenerationMethod::DigitPairExpansion),
        other => bail!("unknown method '{}' (expected 'single' or 'pair')", other),
    }
}

/// Handle the 'generate' command
fn handle_generate(seed: String, method: String, show: usize) -> Result<()> {
    let method = parse_method(&method)?;

    let Some(seed) = Seed::parse(&seed) else {
        println!("{} '{}' is not a 5-digit seed; pool is empty", "!".yellow(), seed);
        return Ok(());
    };

    let start = Instant::now();
    let pool = generate(&seed, method);
    println!(
        "{} Generated {} combinations for seed {} in {:?}",
        "✓".green(),
        pool.len(),
        seed,
        start.elapsed()
    );

    for combo in pool.iter().take(show) {
        println!("  {}", combo);
    }
    if pool.len() > show {
        println!("  ... and {} more", pool.len() - show);
    }
    Ok(())
}

/// Handle the 'filters' command
fn handle_filters(
    catalog: Arc<DescriptorCatalog>,
    seed: String,
    method: String,
    hot: String,
    cold: String,
    due: String,
) -> Result<()> {
    let request = SessionRequest {
        seed,
        method: parse_method(&method)?,
        classes: DigitClasses::from_inputs(&hot, &cold, &due),
    };
    let session = Session::new(request, &catalog);

    for diagnostic in catalog.diagnostics() {
        println!("{} skipped record: {}", "!".yellow(), diagnostic);
    }
    for diagnostic in session.diagnostics() {
        println!("{} excluded: {}", "!".yellow(), diagnostic);
    }

    println!(
        "{}",
        format!(
            "Filters against a base pool of {} (least -> most aggressive):",
            session.base_size()
        )
        .bold()
        .blue()
    );
    for (i, row) in session.ranking().iter().enumerate() {
        println!(
            "{}. {} — would eliminate {}",
            (i + 1).to_string().green(),
            row.name,
            row.would_eliminate
        );
    }
    Ok(())
}

/// Handle the 'run' command
async fn handle_run(
    catalog: Arc<DescriptorCatalog>,
    seed: String,
    method: String,
    hot: String,
    cold: String,
    due: String,
    apply: Vec<String>,
    apply_all: bool,
    ranker: Option<String>,
    json: Option<PathBuf>,
    show: usize,
) -> Result<()> {
    let method_label = method.clone();
    let request = SessionRequest {
        seed: seed.clone(),
        method: parse_method(&method)?,
        classes: DigitClasses::from_inputs(&hot, &cold, &due),
    };
    let mut session = Session::new(request, &catalog);

    for diagnostic in session.diagnostics() {
        println!("{} excluded: {}", "!".yellow(), diagnostic);
    }
    println!(
        "{} Base pool: {} combinations",
        "✓".green(),
        session.base_size()
    );

    if apply_all {
        session.apply_ranked()?;
    } else {
        for name in &apply {
            session.apply(name)?;
        }
    }

    for record in session.records() {
        println!(
            "{} {} — eliminated {}; remaining {}",
            "✓".green(),
            record.filter,
            record.eliminated,
            record.pool_after
        );
    }

    if let Some(addr) = &ranker {
        session.connect_ranker(addr).await;
    }
    let survivors = session.final_output().await;

    println!(
        "{}",
        format!("Final pool: {} combinations", survivors.len())
            .bold()
            .blue()
    );
    for combo in survivors.iter().take(show) {
        println!("  {}", combo);
    }
    if survivors.len() > show {
        println!("  ... and {} more", survivors.len() - show);
    }

    if let Some(path) = json {
        let records: Vec<serde_json::Value> = session
            .records()
            .iter()
            .map(|r| {
                serde_json::json!({
                    "filter": r.filter,
                    "eliminated": r.eliminated,
                    "pool_before": r.pool_before,
                    "pool_after": r.pool_after,
                })
            })
            .collect();
        let payload = serde_json::json!({
            "seed": seed,
            "method": method_label,
            "base_pool": session.base_size(),
            "records": records,
            "survivors": survivors,
        });
        std::fs::write(&path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Wrote session results to {}", "✓".green(), path.display());
    }

    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(catalog: Arc<DescriptorCatalog>, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("benchmark needs at least one request");
    }

    // Random 5-digit seeds, repeats allowed
    let seeds: Vec<String> = (0..requests)
        .map(|_| {
            (0..5)
                .map(|_| char::from(b'0' + rand::random::<u8>() % 10))
                .collect()
        })
        .collect();

    let mut timings = Vec::with_capacity(requests);
    let total_start = Instant::now();
    for seed in seeds {
        let request = SessionRequest {
            seed,
            method: GenerationMethod::DigitPairExpansion,
            classes: DigitClasses::default(),
        };
        let start = Instant::now();
        let session = Session::new(request, &catalog);
        // Keep the ranking from being optimized away
        let _ = session.ranking().len();
        timings.push(start.elapsed());
    }
    let total_time = total_start.elapsed();

    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} sessions/second", throughput);

    Ok(())
}
