//! Ranking and selection of scored listings.

use crate::types::Recommendation;

/// Sort by match score (highest first) and keep the top `limit`.
///
/// The sort is stable: listings with equal scores keep their catalog order.
pub fn rank_and_select(mut scored: Vec<Recommendation>, limit: usize) -> Vec<Recommendation> {
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(limit);
    scored
}
