//! # Data Loader Crate
//!
//! This crate handles the platform snapshot the recommendation core reads from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RecordId, Listing, User, Booking, DataIndex)
//! - **parser**: Parse the snapshot's JSON files
//! - **index**: Build and validate a DataIndex from a snapshot directory
//! - **normalizer**: Clean raw listing records into `Listing`s
//! - **source**: The `DataSource` trait the core fetches through
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{normalize_listings, DataIndex, DataSource, RecordId};
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data/sample"))?;
//!
//! let user_id: RecordId = "65a000000000000000000001".parse()?;
//! let user = index.fetch_user(&user_id)?;
//! let catalog = normalize_listings(&index.fetch_all_listings()?);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod normalizer;
pub mod source;

pub use error::{DataLoadError, Result};
pub use normalizer::{normalize_listing, normalize_listings};
pub use source::DataSource;
pub use types::{
    // Identifiers
    RecordId,
    UserId,
    ListingId,
    // Core types
    Listing,
    User,
    Booking,
    DataIndex,
    // Serialization
    serialize_price,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_index_creation() {
        let index = DataIndex::new();
        assert_eq!(index.counts(), (0, 0, 0));
    }

    #[test]
    fn test_insert_and_normalize_listing() {
        let mut index = DataIndex::new();
        index.insert_listing(json!({
            "_id": "65b000000000000000000001",
            "title": "Mountain Retreat",
            "location": "Aspen",
            "price": 1000
        }));

        let catalog = normalize_listings(index.raw_listings());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].location, "Aspen");
    }

    #[test]
    fn test_empty_queries() {
        let index = DataIndex::new();
        let missing = RecordId::new("65a0000000000000000000ff");

        assert!(index.get_user(&missing).is_none());
        assert!(index.get_user_bookings(&missing).is_empty());
        assert!(index.raw_listings().is_empty());
        assert!(index.get_all_user_ids().is_empty());
    }
}
