//! # Recommendation Orchestrator
//!
//! This module coordinates the entire recommendation pipeline:
//! 1. Resolve the user (invalid or unknown id means no recommendations)
//! 2. Fetch the user's bookings and the full catalog
//! 3. Normalize the catalog
//! 4. Cluster listings by location
//! 5. Detect the user's preferred clusters
//! 6. Score every listing, then rank and keep the top 8
//!
//! Every request recomputes everything from the snapshot; nothing is cached
//! between calls.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, instrument};

use clustering::{build_user_context, ClusterAssignment, LocationClusterer, UserContext};
use data_loader::{normalize_listings, DataSource, Listing, RecordId};
use pipeline::{rank_and_select, Recommendation, ScoringPipeline, DEFAULT_RECOMMENDATION_LIMIT};

/// JSON envelope for a recommendation result: `{"recommendations": [...]}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
}

impl From<Vec<Recommendation>> for RecommendationResponse {
    fn from(recommendations: Vec<Recommendation>) -> Self {
        Self { recommendations }
    }
}

/// Everything one request computed, kept for explaining the result
#[derive(Debug, Clone)]
pub struct RecommendationTrace {
    pub listings: Vec<Listing>,
    pub assignment: ClusterAssignment,
    pub context: UserContext,
    pub recommendations: Vec<Recommendation>,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    source: Arc<dyn DataSource>,
    clusterer: LocationClusterer,
    scoring: Arc<ScoringPipeline>,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator reading from `source`, with the standard boosts
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            clusterer: LocationClusterer::new(),
            scoring: Arc::new(ScoringPipeline::standard()),
        }
    }

    /// Replace the location clusterer (e.g. a seeded one for reproducible runs)
    pub fn with_clusterer(mut self, clusterer: LocationClusterer) -> Self {
        self.clusterer = clusterer;
        self
    }

    /// Main entry point: Get recommendations for a user
    ///
    /// # Returns
    /// At most 8 recommendations, highest score first. An invalid or unknown
    /// user id and an empty catalog both give an empty vector; only failures
    /// of the data source are errors.
    pub fn recommend(&self, user_id: &str) -> Result<Vec<Recommendation>> {
        Ok(self
            .trace(user_id)?
            .map(|trace| trace.recommendations)
            .unwrap_or_default())
    }

    /// Run the pipeline and keep the intermediate results.
    ///
    /// `Ok(None)` in every case where [`recommend`](Self::recommend) returns
    /// an empty vector without scoring.
    #[instrument(skip(self))]
    pub fn trace(&self, user_id: &str) -> Result<Option<RecommendationTrace>> {
        let start_time = Instant::now();

        let Ok(user_id) = RecordId::parse_object_id(user_id) else {
            debug!("Not a valid user id");
            return Ok(None);
        };

        let Some(user) = self
            .source
            .fetch_user(&user_id)
            .context("Failed to fetch user")?
        else {
            debug!("User not found");
            return Ok(None);
        };

        let bookings = self
            .source
            .fetch_bookings(&user_id)
            .context("Failed to fetch bookings")?;

        let raw_listings = self
            .source
            .fetch_all_listings()
            .context("Failed to fetch listings")?;
        if raw_listings.is_empty() {
            debug!("Catalog is empty");
            return Ok(None);
        }

        let listings = normalize_listings(&raw_listings);
        let assignment = self.clusterer.assign(&listings);
        let context = build_user_context(&user, &bookings, &assignment);
        debug!(
            listings = listings.len(),
            clusters = assignment.cluster_count(),
            preferred = ?context.preferred_clusters.as_slice(),
            "Prepared scoring inputs"
        );

        let scored = self.scoring.score(&listings, &assignment, &context);
        let recommendations = rank_and_select(scored, DEFAULT_RECOMMENDATION_LIMIT);

        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );

        Ok(Some(RecommendationTrace {
            listings,
            assignment,
            context,
            recommendations,
        }))
    }

    /// Async entry point for concurrent callers.
    ///
    /// The pipeline is CPU-bound, so it runs on the blocking thread pool.
    pub async fn get_recommendations(
        &self,
        user_id: impl Into<String>,
    ) -> Result<Vec<Recommendation>> {
        let orchestrator = self.clone();
        let user_id = user_id.into();
        tokio::task::spawn_blocking(move || orchestrator.recommend(&user_id))
            .await
            .context("Recommendation task panicked")?
    }

    /// Normalize and cluster the whole catalog
    pub fn cluster_catalog(&self) -> Result<(Vec<Listing>, ClusterAssignment)> {
        let raw_listings = self
            .source
            .fetch_all_listings()
            .context("Failed to fetch listings")?;
        let listings = normalize_listings(&raw_listings);
        let assignment = self.clusterer.assign(&listings);
        Ok((listings, assignment))
    }
}
