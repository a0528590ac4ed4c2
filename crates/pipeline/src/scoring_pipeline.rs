//! The ScoringPipeline applies an ordered list of boosts to every listing.
//!
//! Each listing starts as a draft recommendation (score 0, popular-listing
//! reason). Boosts run in order; every one that applies adds its points and
//! overwrites the reason. A listing left at 0 gets the baseline score, and
//! every score is capped.

use crate::boosts::{PreferredClusterBoost, PreviouslyBookedBoost, WishlistBoost};
use crate::traits::Boost;
use crate::types::{Recommendation, BASELINE_SCORE, MAX_MATCH_SCORE};
use clustering::{ClusterAssignment, UserContext};
use data_loader::Listing;

/// Chains boosts together into a scoring pass.
///
/// ## Usage
/// ```ignore
/// let pipeline = ScoringPipeline::new()
///     .add_boost(PreferredClusterBoost)
///     .add_boost(WishlistBoost)
///     .add_boost(PreviouslyBookedBoost);
///
/// let scored = pipeline.score(&listings, &assignment, &context);
/// ```
pub struct ScoringPipeline {
    boosts: Vec<Box<dyn Boost>>,
}

impl ScoringPipeline {
    /// Create a new empty ScoringPipeline.
    pub fn new() -> Self {
        Self { boosts: Vec::new() }
    }

    /// The production pipeline: preferred cluster, then wishlist, then previously booked.
    pub fn standard() -> Self {
        Self::new()
            .add_boost(PreferredClusterBoost)
            .add_boost(WishlistBoost)
            .add_boost(PreviouslyBookedBoost)
    }

    /// Add a boost to the end of the pipeline (builder pattern).
    pub fn add_boost(mut self, boost: impl Boost + 'static) -> Self {
        self.boosts.push(Box::new(boost));
        self
    }

    /// Names of the boosts, in application order
    pub fn boost_names(&self) -> Vec<&str> {
        self.boosts.iter().map(|b| b.name()).collect()
    }

    /// Score every listing, in catalog order.
    ///
    /// # Returns
    /// One recommendation per listing; not yet sorted or truncated
    pub fn score(
        &self,
        listings: &[Listing],
        assignment: &ClusterAssignment,
        context: &UserContext,
    ) -> Vec<Recommendation> {
        let scored: Vec<Recommendation> = listings
            .iter()
            .map(|listing| self.score_listing(listing, assignment, context))
            .collect();

        tracing::debug!(
            "Scored {} listings with {} boosts",
            scored.len(),
            self.boosts.len()
        );
        scored
    }

    /// Score a single listing.
    pub fn score_listing(
        &self,
        listing: &Listing,
        assignment: &ClusterAssignment,
        context: &UserContext,
    ) -> Recommendation {
        let cluster = assignment.label_of(&listing.id);
        let mut draft = Recommendation::draft(listing);

        for boost in &self.boosts {
            if boost.applies(listing, cluster, context) {
                draft.match_score += boost.points();
                draft.reason = boost.reason();
                tracing::trace!("{} applied to {}", boost.name(), listing.id);
            }
        }

        if draft.match_score == 0 {
            draft.match_score = BASELINE_SCORE;
        }
        draft.match_score = draft.match_score.min(MAX_MATCH_SCORE);
        draft
    }
}

impl Default for ScoringPipeline {
    fn default() -> Self {
        Self::new()
    }
}
