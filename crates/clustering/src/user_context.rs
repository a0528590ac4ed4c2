//! Helper functions to build a UserContext from a user's history
//!
//! Gathers what scoring needs to know about one user up front:
//! - Listings the user booked (as a set, for O(1) lookups)
//! - Listings on the user's wishlist
//! - The user's preferred location clusters

use crate::location::{ClusterAssignment, ClusterLabel};
use data_loader::{Booking, ListingId, User, UserId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Maximum number of preferred clusters kept per user
pub const MAX_PREFERRED_CLUSTERS: usize = 2;

/// A user's preferred clusters, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSet(Vec<ClusterLabel>);

impl PreferenceSet {
    pub fn contains(&self, label: ClusterLabel) -> bool {
        self.0.contains(&label)
    }

    pub fn as_slice(&self) -> &[ClusterLabel] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything scoring needs to know about the requesting user.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: UserId,
    pub booked_listings: HashSet<ListingId>,
    pub wishlist: HashSet<ListingId>,
    pub preferred_clusters: PreferenceSet,
}

impl UserContext {
    /// An empty context: no history, no preferences
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            booked_listings: HashSet::new(),
            wishlist: HashSet::new(),
            preferred_clusters: PreferenceSet::default(),
        }
    }

    pub fn has_booked(&self, listing_id: &ListingId) -> bool {
        self.booked_listings.contains(listing_id)
    }

    pub fn has_wishlisted(&self, listing_id: &ListingId) -> bool {
        self.wishlist.contains(listing_id)
    }

    pub fn prefers(&self, label: ClusterLabel) -> bool {
        self.preferred_clusters.contains(label)
    }
}

/// Build a UserContext for a user against the current cluster assignment
///
/// Liked listings are the booked listings (in booking order) followed by the
/// wishlist. Each occurrence counts toward its cluster's tally.
pub fn build_user_context(
    user: &User,
    bookings: &[Booking],
    assignment: &ClusterAssignment,
) -> UserContext {
    let liked = bookings
        .iter()
        .map(|b| &b.listing)
        .chain(user.wishlist.iter());
    let preferred_clusters = detect_preferred_clusters(liked, assignment);

    debug!(
        user_id = %user.id,
        bookings = bookings.len(),
        wishlist = user.wishlist.len(),
        preferred = ?preferred_clusters.as_slice(),
        "Built user context"
    );

    UserContext {
        user_id: user.id.clone(),
        booked_listings: bookings.iter().map(|b| b.listing.clone()).collect(),
        wishlist: user.wishlist.iter().cloned().collect(),
        preferred_clusters,
    }
}

/// Find the (at most two) clusters a user's liked listings fall into most often
///
/// ## Algorithm
/// 1. Resolve each liked listing to its cluster, skipping unknown listings
/// 2. Count occurrences per cluster, remembering first appearance
/// 3. Sort by count DESC, then first appearance ASC
/// 4. Keep the top [`MAX_PREFERRED_CLUSTERS`]
pub fn detect_preferred_clusters<'a>(
    liked: impl IntoIterator<Item = &'a ListingId>,
    assignment: &ClusterAssignment,
) -> PreferenceSet {
    // label -> (count, first seen position)
    let mut tally: HashMap<ClusterLabel, (u32, usize)> = HashMap::new();
    let mut position = 0;
    for listing_id in liked {
        let Some(label) = assignment.label_of(listing_id) else {
            continue;
        };
        tally.entry(label).or_insert((0, position)).0 += 1;
        position += 1;
    }

    let mut ranked: Vec<(ClusterLabel, (u32, usize))> = tally.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));

    PreferenceSet(
        ranked
            .into_iter()
            .take(MAX_PREFERRED_CLUSTERS)
            .map(|(label, _)| label)
            .collect(),
    )
}
