//! DataIndex building and validation.
//!
//! Loads a snapshot directory into a [`DataIndex`]:
//! - Parse users, listings and bookings in parallel
//! - Build the per-user booking index
//! - Validate identifier uniqueness
//! - Report (but keep) dangling booking and wishlist references

use crate::error::{DataLoadError, Result};
use crate::normalizer::normalize_listings;
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

impl DataIndex {
    /// Load a snapshot from a directory holding users.json, listings.json and bookings.json
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading platform snapshot from {:?}", data_dir);

        let users_path = data_dir.join("users.json");
        let listings_path = data_dir.join("listings.json");
        let bookings_path = data_dir.join("bookings.json");

        // Nested joins give three-way parallelism
        let ((users, listings), bookings) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_users(&users_path),
                    || parser::parse_listings(&listings_path),
                )
            },
            || parser::parse_bookings(&bookings_path),
        );

        let users = users?;
        let listings = listings?;
        let bookings = bookings?;

        info!(
            "Loaded {} users, {} listings, {} bookings",
            users.len(),
            listings.len(),
            bookings.len()
        );

        let mut index = DataIndex::new();
        index.validate_unique_users(&users)?;
        for user in users {
            index.insert_user(user);
        }
        for listing in listings {
            index.insert_listing(listing);
        }
        for booking in bookings {
            index.insert_booking(booking);
        }

        index.validate()?;
        Ok(index)
    }

    fn validate_unique_users(&self, users: &[User]) -> Result<()> {
        let mut seen = HashSet::with_capacity(users.len());
        for user in users {
            if !seen.insert(&user.id) {
                return Err(DataLoadError::ValidationError(format!(
                    "duplicate user id {}",
                    user.id
                )));
            }
        }
        Ok(())
    }

    /// Validate data integrity
    ///
    /// Listing identifiers must be unique within the catalog. Bookings and
    /// wishlists that point at listings missing from the catalog are allowed;
    /// they are skipped at recommendation time, so only their count is logged.
    pub fn validate(&self) -> Result<()> {
        let catalog = normalize_listings(&self.listings);
        let mut listing_ids: HashSet<&ListingId> = HashSet::with_capacity(catalog.len());
        for listing in &catalog {
            if !listing_ids.insert(&listing.id) {
                return Err(DataLoadError::ValidationError(format!(
                    "duplicate listing id {}",
                    listing.id
                )));
            }
        }

        let dangling_bookings = self
            .user_bookings
            .values()
            .flatten()
            .filter(|b| !listing_ids.contains(&b.listing))
            .count();
        let dangling_wishlist = self
            .users
            .values()
            .flat_map(|u| u.wishlist.iter())
            .filter(|id| !listing_ids.contains(id))
            .count();
        let unknown_users = self
            .user_bookings
            .keys()
            .filter(|id| !self.users.contains_key(*id))
            .count();

        debug!(
            dangling_bookings,
            dangling_wishlist, unknown_users, "Snapshot reference check complete"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn sample_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/sample")
    }

    #[test]
    fn test_load_sample_snapshot() {
        let index = DataIndex::load_from_files(&sample_dir()).unwrap();
        let (users, listings, bookings) = index.counts();

        assert_eq!(users, 3);
        assert_eq!(listings, 12);
        assert_eq!(bookings, 4);
    }

    #[test]
    fn test_missing_directory() {
        let result = DataIndex::load_from_files(Path::new("/no/such/snapshot"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_duplicate_listing_ids_rejected() {
        let mut index = DataIndex::new();
        index.insert_listing(json!({"_id": "65b000000000000000000001"}));
        index.insert_listing(json!({"_id": {"$oid": "65B000000000000000000001"}}));

        assert!(matches!(
            index.validate(),
            Err(DataLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_dangling_references_are_accepted() {
        let mut index = DataIndex::new();
        index.insert_listing(json!({"_id": "65b000000000000000000001"}));
        index.insert_user(User {
            id: RecordId::new("65a000000000000000000001"),
            email: String::new(),
            username: String::new(),
            wishlist: vec![RecordId::new("65b0000000000000000000ff")],
        });
        index.insert_booking(Booking {
            listing: RecordId::new("65b0000000000000000000fe"),
            user: RecordId::new("65a000000000000000000001"),
            check_in: None,
            check_out: None,
        });

        assert!(index.validate().is_ok());
    }
}
