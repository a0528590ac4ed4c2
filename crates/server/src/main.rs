//! Simple test harness for the recommendation orchestrator.
//!
//! Loads a snapshot and prints recommendations for one user:
//!
//! ```text
//! server [DATA_DIR] [USER_ID]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_loader::DataIndex;
use server::{RecommendationOrchestrator, RecommendationResponse};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,pipeline=debug")),
        )
        .init();

    info!("Starting Wanderlust recommendation test harness");

    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| "data/sample".to_string()));

    info!("Loading data index from {}...", data_dir.display());
    let data_index = Arc::new(
        DataIndex::load_from_files(&data_dir)
            .with_context(|| format!("Failed to load snapshot from {}", data_dir.display()))?,
    );
    let user_id = match args.next() {
        Some(id) => id,
        None => data_index
            .get_all_user_ids()
            .first()
            .map(|id| id.to_string())
            .context("Snapshot has no users")?,
    };

    let orchestrator = RecommendationOrchestrator::new(data_index);

    info!("Getting recommendations for user {}", user_id);
    let recommendations = orchestrator.get_recommendations(user_id).await?;

    info!("Received {} recommendations:", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} ({}) - ${:.0} - Match: {}% [{}]",
            i + 1,
            rec.title,
            rec.location,
            rec.price,
            rec.match_score,
            rec.reason
        );
    }

    let response = RecommendationResponse::from(recommendations);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
