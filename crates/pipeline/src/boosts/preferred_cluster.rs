//! Boost for listings in one of the user's preferred location clusters.

use crate::traits::Boost;
use crate::types::Reason;
use clustering::{ClusterLabel, UserContext};
use data_loader::Listing;

/// Adds 50 points to listings whose cluster is among the user's preferred ones.
pub struct PreferredClusterBoost;

impl PreferredClusterBoost {
    pub const POINTS: u32 = 50;
}

impl Boost for PreferredClusterBoost {
    fn name(&self) -> &str {
        "PreferredClusterBoost"
    }

    fn points(&self) -> u32 {
        Self::POINTS
    }

    fn reason(&self) -> Reason {
        Reason::PreferredLocation
    }

    fn applies(
        &self,
        _listing: &Listing,
        cluster: Option<ClusterLabel>,
        context: &UserContext,
    ) -> bool {
        cluster.is_some_and(|label| context.prefers(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boosts::test_support::{context, listing};
    use clustering::{PreferenceSet, detect_preferred_clusters, LocationClusterer};

    #[test]
    fn test_applies_to_preferred_cluster_only() {
        let mut context = context();
        let catalog = vec![listing("a")];
        let assignment = LocationClusterer::new().assign(&catalog);
        context.preferred_clusters = detect_preferred_clusters(&[catalog[0].id.clone()], &assignment);

        let boost = PreferredClusterBoost;
        assert!(boost.applies(&catalog[0], Some(0), &context));
        assert!(!boost.applies(&catalog[0], Some(3), &context));
        assert!(!boost.applies(&catalog[0], None, &context));
    }

    #[test]
    fn test_no_preferences_never_applies() {
        let mut context = context();
        context.preferred_clusters = PreferenceSet::default();
        assert!(!PreferredClusterBoost.applies(&listing("a"), Some(0), &context));
    }
}
