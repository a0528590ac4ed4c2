//! Core domain types for the booking platform snapshot.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `RecordId` and the `UserId` / `ListingId` aliases
//! - Normalized `Listing` records
//! - `User` and `Booking` records as read from the snapshot
//! - `DataIndex`, the in-memory store backing the `DataSource` trait

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Identifiers
// =============================================================================

/// Length of a hex-encoded document ObjectId.
pub const OBJECT_ID_LEN: usize = 24;

/// Canonical string form of a record identifier.
///
/// Raw identifiers show up as plain strings, as extended-JSON objects
/// (`{"$oid": "..."}`) or as numbers. All of them collapse to a single string
/// here; hex ObjectIds are lowercased so lookups compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

/// Identifier of a platform user
pub type UserId = RecordId;

/// Identifier of a listing in the catalog
pub type ListingId = RecordId;

impl RecordId {
    /// Wrap an identifier string, canonicalizing ObjectId-shaped values.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if is_object_id(trimmed) {
            Self(trimmed.to_ascii_lowercase())
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Strict parse: only 24-character hex ObjectIds are accepted.
    pub fn parse_object_id(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if is_object_id(trimmed) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(DataLoadError::InvalidId {
                value: raw.to_string(),
            })
        }
    }

    /// Canonical identifier from a raw JSON value, if it holds one.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::new(s.as_str())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            serde_json::Value::Object(map) => map.get("$oid").and_then(Self::from_json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_object_id(s: &str) -> bool {
    s.len() == OBJECT_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl FromStr for RecordId {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_object_id(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("not a record identifier: {}", value)))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Largest magnitude below which every whole f64 is an exact integer
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Serialize a price the way it is stored: whole prices as integers, others as floats.
pub fn serialize_price<S: Serializer>(
    price: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < EXACT_INTEGER_LIMIT {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// A listing after normalization.
///
/// Every field has a usable value; see [`crate::normalizer`] for the defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: ListingId,
    pub location: String,
    pub title: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    /// Image URL
    #[serde(rename = "image")]
    pub image_url: String,
}

// =============================================================================
// Users and bookings
// =============================================================================

/// A platform user as stored in the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    /// Wishlisted listings, in the order they were added
    #[serde(default)]
    pub wishlist: Vec<ListingId>,
}

/// A past booking of one listing by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub listing: ListingId,
    pub user: UserId,
    #[serde(rename = "checkIn", default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(rename = "checkOut", default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
}

// =============================================================================
// DataIndex - In-Memory Snapshot
// =============================================================================

/// Read-only snapshot of users, bookings and the raw listing catalog.
///
/// Raw listings are kept as JSON so the normalizer sees exactly what the
/// store handed out, in catalog order.
#[derive(Debug, Default)]
pub struct DataIndex {
    pub(crate) users: HashMap<UserId, User>,
    /// Raw listing records, in catalog order
    pub(crate) listings: Vec<serde_json::Value>,
    /// Bookings grouped by the user who made them, in file order
    pub(crate) user_bookings: HashMap<UserId, Vec<Booking>>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a user by ID
    pub fn get_user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Get all bookings made by a user
    ///
    /// Returns an empty slice if the user has no bookings
    pub fn get_user_bookings(&self, user_id: &UserId) -> &[Booking] {
        self.user_bookings
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Raw listing records in catalog order
    pub fn raw_listings(&self) -> &[serde_json::Value] {
        &self.listings
    }

    /// All user IDs, sorted for stable output
    pub fn get_all_user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.users.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Insert a user into the index
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Append a raw listing record to the catalog
    pub fn insert_listing(&mut self, listing: serde_json::Value) {
        self.listings.push(listing);
    }

    /// Insert a booking under its user
    pub fn insert_booking(&mut self, booking: Booking) {
        self.user_bookings
            .entry(booking.user.clone())
            .or_default()
            .push(booking);
    }

    /// Get counts for debugging/validation: (users, listings, bookings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_bookings = self.user_bookings.values().map(|v| v.len()).sum();
        (self.users.len(), self.listings.len(), total_bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_prices_serialize_as_integers() {
        let listing = |price: f64| Listing {
            id: RecordId::new("65b000000000000000000001"),
            location: String::new(),
            title: String::new(),
            price,
            image_url: String::new(),
        };

        assert!(serde_json::to_string(&listing(1500.0))
            .unwrap()
            .contains("\"price\":1500,"));
        assert_eq!(serde_json::to_value(listing(1500.0)).unwrap()["price"], json!(1500));
        assert_eq!(serde_json::to_value(listing(0.0)).unwrap()["price"], json!(0));
        assert_eq!(serde_json::to_value(listing(99.5)).unwrap()["price"], json!(99.5));
    }

    #[test]
    fn test_object_id_is_lowercased() {
        let id = RecordId::new("65A1F0C2B3D4E5F60718293A");
        assert_eq!(id.as_str(), "65a1f0c2b3d4e5f60718293a");
    }

    #[test]
    fn test_parse_object_id_rejects_garbage() {
        assert!(RecordId::parse_object_id("not-an-id").is_err());
        assert!(RecordId::parse_object_id("65a1f0c2b3d4e5f60718293").is_err()); // 23 chars
        assert!("65a1f0c2b3d4e5f60718293a".parse::<RecordId>().is_ok());
    }

    #[test]
    fn test_from_json_shapes() {
        let plain = RecordId::from_json(&json!("65a1f0c2b3d4e5f60718293a"));
        let extended = RecordId::from_json(&json!({"$oid": "65A1F0C2B3D4E5F60718293A"}));
        assert_eq!(plain, extended);

        assert_eq!(RecordId::from_json(&json!(42)).unwrap().as_str(), "42");
        assert!(RecordId::from_json(&json!(null)).is_none());
        assert!(RecordId::from_json(&json!("  ")).is_none());
    }

    #[test]
    fn test_user_deserializes_extended_json() {
        let user: User = serde_json::from_value(json!({
            "_id": {"$oid": "65a1f0c2b3d4e5f60718293a"},
            "email": "a@example.com",
            "wishlist": [{"$oid": "65b000000000000000000001"}, "65b000000000000000000002"]
        }))
        .unwrap();

        assert_eq!(user.id.as_str(), "65a1f0c2b3d4e5f60718293a");
        assert_eq!(user.wishlist.len(), 2);
        assert_eq!(user.username, "");
    }

    #[test]
    fn test_bookings_grouped_by_user() {
        let mut index = DataIndex::new();
        let user = RecordId::new("65a1f0c2b3d4e5f60718293a");
        index.insert_booking(Booking {
            listing: RecordId::new("65b000000000000000000001"),
            user: user.clone(),
            check_in: None,
            check_out: None,
        });

        assert_eq!(index.get_user_bookings(&user).len(), 1);
        assert!(index.get_user_bookings(&RecordId::new("other")).is_empty());
        assert_eq!(index.counts(), (0, 0, 1));
    }
}
