use data_loader::{normalize_listings, DataIndex};
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data/sample");

    println!("Loading platform snapshot...\n");

    let start = Instant::now();
    let index = DataIndex::load_from_files(data_dir)
        .expect("Failed to load snapshot");
    let load_elapsed = start.elapsed();

    let start = Instant::now();
    let catalog = normalize_listings(index.raw_listings());
    let normalize_elapsed = start.elapsed();

    let (users, listings, bookings) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Load time: {:?}", load_elapsed);
    println!("Normalize time: {:?}", normalize_elapsed);
    println!("Users: {}", users);
    println!("Listings: {} ({} normalized)", listings, catalog.len());
    println!("Bookings: {}", bookings);
}
