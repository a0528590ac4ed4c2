//! Boost for listings the user has booked before.

use crate::traits::Boost;
use crate::types::Reason;
use clustering::{ClusterLabel, UserContext};
use data_loader::Listing;

/// Adds 20 points to listings found in the user's booking history.
pub struct PreviouslyBookedBoost;

impl PreviouslyBookedBoost {
    pub const POINTS: u32 = 20;
}

impl Boost for PreviouslyBookedBoost {
    fn name(&self) -> &str {
        "PreviouslyBookedBoost"
    }

    fn points(&self) -> u32 {
        Self::POINTS
    }

    fn reason(&self) -> Reason {
        Reason::PreviouslyBooked
    }

    fn applies(
        &self,
        listing: &Listing,
        _cluster: Option<ClusterLabel>,
        context: &UserContext,
    ) -> bool {
        context.has_booked(&listing.id)
    }
}
