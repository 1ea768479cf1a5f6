//! Simple test harness for the sieve session.
//!
//! This binary runs one end-to-end session: load descriptors, generate
//! from a fixed seed, rank, apply everything, and print the survivors.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use filter_defs::{DescriptorCatalog, DigitClasses};
use generator::GenerationMethod;
use session::{Session, SessionRequest};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,session=debug,pipeline=debug,generator=debug")
        .init();

    info!("Starting sieve session harness");

    info!("Loading filter descriptors...");
    let catalog = DescriptorCatalog::load_from_file(Path::new("data/filters.txt"))?;
    info!("Loaded {} descriptors", catalog.len());

    let request = SessionRequest {
        seed: "12345".to_string(),
        method: GenerationMethod::DigitPairExpansion,
        classes: DigitClasses::from_inputs("1,2,3", "8,9", "0"),
    };

    let mut session = Session::new(request, &catalog);
    info!("Base pool: {} combinations", session.base_size());

    info!("Filter ranking (least -> most aggressive):");
    for (i, row) in session.ranking().iter().enumerate() {
        info!("{}. {} - would eliminate {}", i + 1, row.name, row.would_eliminate);
    }

    let records = session.apply_ranked()?;
    for record in &records {
        info!(
            "{}: eliminated {}, {} -> {}",
            record.filter, record.eliminated, record.pool_before, record.pool_after
        );
    }

    // Point this at a live trap-ranking service to see ranked output.
    session.connect_ranker("http://localhost:50055").await;

    let output = session.final_output().await;
    info!("{} survivors", output.len());
    for combo in output.iter().take(20) {
        info!("  {}", combo);
    }

    Ok(())
}
