//! Example: Cluster the sample catalog and detect a user's preferences
//!
//! Run with: cargo run --package clustering --example cluster_catalog
//!
//! This example shows how to:
//! 1. Load the sample snapshot
//! 2. Normalize the raw catalog
//! 3. Cluster listings by location
//! 4. Build a user context with preferred clusters

use clustering::{build_user_context, LocationClusterer};
use data_loader::{normalize_listings, DataIndex, RecordId};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info,clustering=debug")
        .init();

    println!("=== Wanderlust Location Clustering Example ===\n");

    let data_index = DataIndex::load_from_files(Path::new("data/sample"))?;
    let listings = normalize_listings(data_index.raw_listings());
    println!("Catalog: {} listings\n", listings.len());

    let start = Instant::now();
    let assignment = LocationClusterer::new().assign(&listings);
    println!(
        "Clustered into {} clusters in {:?} (fallback: {})",
        assignment.cluster_count(),
        start.elapsed(),
        assignment.is_fallback()
    );
    for listing in &listings {
        println!(
            "  [{}] {:<16} {}",
            assignment.label_of(&listing.id).unwrap_or_default(),
            listing.location,
            listing.title
        );
    }
    println!();

    let user_id: RecordId = "65a000000000000000000001".parse()?;
    let user = data_index.get_user(&user_id).expect("User not found");
    let context = build_user_context(user, data_index.get_user_bookings(&user_id), &assignment);
    println!("User {} ({})", user.username, user_id);
    println!("  Booked listings: {}", context.booked_listings.len());
    println!("  Wishlist: {}", context.wishlist.len());
    println!("  Preferred clusters: {:?}", context.preferred_clusters.as_slice());

    Ok(())
}
