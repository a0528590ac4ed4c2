//! Boost for listings on the user's wishlist.

use crate::traits::Boost;
use crate::types::Reason;
use clustering::{ClusterLabel, UserContext};
use data_loader::Listing;

/// Adds 30 points to wishlisted listings.
///
/// Uses the wishlist HashSet in UserContext for O(1) lookups.
pub struct WishlistBoost;

impl WishlistBoost {
    pub const POINTS: u32 = 30;
}

impl Boost for WishlistBoost {
    fn name(&self) -> &str {
        "WishlistBoost"
    }

    fn points(&self) -> u32 {
        Self::POINTS
    }

    fn reason(&self) -> Reason {
        Reason::Wishlist
    }

    fn applies(
        &self,
        listing: &Listing,
        _cluster: Option<ClusterLabel>,
        context: &UserContext,
    ) -> bool {
        context.has_wishlisted(&listing.id)
    }
}
