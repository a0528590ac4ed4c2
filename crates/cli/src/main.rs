use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use clustering::LocationClusterer;
use colored::Colorize;
use data_loader::{normalize_listings, DataIndex, ListingId, RecordId, UserId};
use pipeline::Recommendation;
use rand::seq::IndexedRandom;
use server::{RecommendationOrchestrator, RecommendationResponse, RecommendationTrace};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Wanderlust Recs - Listing Recommendation Engine
#[derive(Parser)]
#[command(name = "wanderlust-recs")]
#[command(about = "Listing recommendations from location clusters, wishlists and bookings", long_about = None)]
struct Cli {
    /// Directory holding users.json, listings.json and bookings.json
    #[arg(short, long, default_value = "data/sample", env = "WANDERLUST_DATA_DIR")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get listing recommendations for a user
    Recommend {
        /// User ID (24-character hex ObjectId)
        #[arg(long)]
        user_id: String,

        /// Print the {"recommendations": [...]} JSON envelope instead of a table
        #[arg(long)]
        json: bool,

        /// Show clusters and preferences behind the result
        #[arg(long)]
        explain: bool,

        /// Seed location clustering for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show user profile, wishlist and bookings
    User {
        /// User ID to display
        #[arg(long)]
        user_id: String,
    },

    /// Search listings by title or location
    Search {
        /// Case-insensitive substring to match
        #[arg(long)]
        query: String,
    },

    /// Show the location cluster of every listing
    Clusters {
        /// Seed location clustering for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let data_index = Arc::new(
        DataIndex::load_from_files(&cli.data_dir)
            .with_context(|| format!("Failed to load snapshot from {}", cli.data_dir.display()))?,
    );
    let (users, listings, bookings) = data_index.counts();
    eprintln!(
        "{} Loaded {} users, {} listings, {} bookings in {:?}",
        "✓".green(),
        users,
        listings,
        bookings,
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            json,
            explain,
            seed,
        } => handle_recommend(data_index, &user_id, json, explain, seed)?,
        Commands::User { user_id } => handle_user(&data_index, &user_id)?,
        Commands::Search { query } => handle_search(&data_index, &query),
        Commands::Clusters { seed } => handle_clusters(data_index, seed)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(data_index, requests, concurrent).await?,
    }

    Ok(())
}

fn build_orchestrator(data_index: Arc<DataIndex>, seed: Option<u64>) -> RecommendationOrchestrator {
    let orchestrator = RecommendationOrchestrator::new(data_index);
    match seed {
        Some(seed) => orchestrator.with_clusterer(LocationClusterer::new().with_seed(seed)),
        None => orchestrator,
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    data_index: Arc<DataIndex>,
    user_id: &str,
    json: bool,
    explain: bool,
    seed: Option<u64>,
) -> Result<()> {
    let orchestrator = build_orchestrator(data_index, seed);
    let trace = orchestrator.trace(user_id)?;
    let recommendations = trace
        .as_ref()
        .map(|t| t.recommendations.clone())
        .unwrap_or_default();

    if json {
        let response = RecommendationResponse::from(recommendations);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("{}", format!("No recommendations for '{}'", user_id).yellow());
        return Ok(());
    }

    print_recommendations(&recommendations);
    if explain {
        if let Some(trace) = &trace {
            print_explanation(trace);
        }
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(data_index: &DataIndex, user_id: &str) -> Result<()> {
    let user_id = RecordId::parse_object_id(user_id)?;
    let user = data_index
        .get_user(&user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    let listings = normalize_listings(data_index.raw_listings());
    let describe = |id: &ListingId| {
        listings
            .iter()
            .find(|l| &l.id == id)
            .map(|l| format!("{} ({})", l.title, l.location))
            .unwrap_or_else(|| format!("{} (not in catalog)", id).dimmed().to_string())
    };

    println!("{}", format!("User ID: {}", user.id).bold().blue());
    println!("{}Username: {}", "• ".green(), user.username);
    println!("{}Email: {}", "• ".green(), user.email);

    println!("Wishlist ({}):", user.wishlist.len());
    for id in &user.wishlist {
        println!("  - {}", describe(id));
    }

    let bookings = data_index.get_user_bookings(&user_id);
    println!("Bookings ({}):", bookings.len());
    for booking in bookings {
        let dates = match (&booking.check_in, &booking.check_out) {
            (Some(check_in), Some(check_out)) => format!(" [{} → {}]", check_in, check_out),
            _ => String::new(),
        };
        println!("  - {}{}", describe(&booking.listing), dates);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(data_index: &DataIndex, query: &str) {
    let query_lower = query.to_lowercase();
    let matches: Vec<_> = normalize_listings(data_index.raw_listings())
        .into_iter()
        .filter(|l| {
            l.title.to_lowercase().contains(&query_lower)
                || l.location.to_lowercase().contains(&query_lower)
        })
        .collect();

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    for listing in matches.iter().take(20) {
        println!(
            "{}: {} ({}) ${:.0}",
            listing.id,
            listing.title,
            listing.location,
            listing.price
        );
    }
    if matches.is_empty() {
        println!("  no listings match");
    }
}

/// Handle the 'clusters' command
fn handle_clusters(data_index: Arc<DataIndex>, seed: Option<u64>) -> Result<()> {
    let (listings, assignment) = build_orchestrator(data_index, seed).cluster_catalog()?;

    if assignment.is_fallback() {
        println!("{}", "Clustering not possible, all listings share cluster 0".yellow());
    }

    let mut by_cluster: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for listing in &listings {
        if let Some(label) = assignment.label_of(&listing.id) {
            let locations = by_cluster.entry(label).or_default();
            if !locations.contains(&listing.location.as_str()) {
                locations.push(&listing.location);
            }
        }
    }

    println!(
        "{}",
        format!("{} listings in {} clusters:", listings.len(), assignment.cluster_count())
            .bold()
            .blue()
    );
    for (label, locations) in by_cluster {
        println!("{} {}", format!("cluster {}:", label).green(), locations.join(", "));
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    data_index: Arc<DataIndex>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let known_users = data_index.get_all_user_ids();
    if known_users.is_empty() || requests == 0 {
        return Err(anyhow!("Benchmark needs at least one user and one request"));
    }

    let orchestrator = build_orchestrator(data_index, None);
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    // Random users from the snapshot
    let mut rng = rand::rng();
    let user_ids: Vec<UserId> = (0..requests)
        .filter_map(|_| known_users.choose(&mut rng).cloned())
        .collect();

    let wall_clock = Instant::now();
    let mut handles = vec![];
    for user in user_ids {
        let orchestrator = orchestrator.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            orchestrator.get_recommendations(user.to_string()).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation]) {
    println!("{}", "Recommended stays:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) ${:.0} - {}% match",
            (i + 1).to_string().green(),
            rec.title,
            rec.location,
            rec.price,
            rec.match_score
        );
        println!("   {}", rec.reason.as_str().dimmed());
    }
}

/// Print the clusters and preferences a result was computed from
fn print_explanation(trace: &RecommendationTrace) {
    let preferred = trace.context.preferred_clusters.as_slice();
    println!();
    println!("{}", "Why these stays:".bold().blue());
    if trace.assignment.is_fallback() {
        println!("• Clustering fell back to a single cluster");
    }
    println!(
        "• {} listings in {} location clusters",
        trace.listings.len(),
        trace.assignment.cluster_count()
    );
    println!(
        "• {} booked, {} wishlisted",
        trace.context.booked_listings.len(),
        trace.context.wishlist.len()
    );

    if preferred.is_empty() {
        println!("• No preferred clusters: no booked or wishlisted listing is in the catalog");
        return;
    }
    for label in preferred {
        let mut locations: Vec<&str> = trace
            .listings
            .iter()
            .filter(|l| trace.assignment.label_of(&l.id) == Some(*label))
            .map(|l| l.location.as_str())
            .collect();
        locations.sort_unstable();
        locations.dedup();
        println!("• Preferred cluster {}: {}", label, locations.join(", "));
    }
}
