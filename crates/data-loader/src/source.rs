//! The data-access seam of the recommendation core.
//!
//! The core never reaches into a global database handle; everything it reads
//! comes through a [`DataSource`] handed to it by the caller.

use crate::error::Result;
use crate::types::{Booking, DataIndex, User, UserId};

/// Read-only access to users, bookings and the raw catalog.
///
/// `Send + Sync` so one source can serve concurrent requests.
pub trait DataSource: Send + Sync {
    /// Look up a user; `Ok(None)` when no such user exists.
    fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// All bookings made by a user, oldest first.
    fn fetch_bookings(&self, user_id: &UserId) -> Result<Vec<Booking>>;

    /// Every listing in the catalog as raw records, in catalog order.
    fn fetch_all_listings(&self) -> Result<Vec<serde_json::Value>>;
}

impl DataSource for DataIndex {
    fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>> {
        Ok(self.get_user(user_id).cloned())
    }

    fn fetch_bookings(&self, user_id: &UserId) -> Result<Vec<Booking>> {
        Ok(self.get_user_bookings(user_id).to_vec())
    }

    fn fetch_all_listings(&self) -> Result<Vec<serde_json::Value>> {
        Ok(self.raw_listings().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;
    use serde_json::json;

    #[test]
    fn test_data_index_as_source() {
        let mut index = DataIndex::new();
        let user_id = RecordId::new("65a000000000000000000001");
        index.insert_user(User {
            id: user_id.clone(),
            email: "guest@example.com".to_string(),
            username: "guest".to_string(),
            wishlist: vec![],
        });
        index.insert_listing(json!({"_id": "65b000000000000000000001", "title": "Loft"}));

        let source: &dyn DataSource = &index;
        assert!(source.fetch_user(&user_id).unwrap().is_some());
        assert!(source.fetch_user(&RecordId::new("65a0000000000000000000ff")).unwrap().is_none());
        assert!(source.fetch_bookings(&user_id).unwrap().is_empty());
        assert_eq!(source.fetch_all_listings().unwrap().len(), 1);
    }
}
