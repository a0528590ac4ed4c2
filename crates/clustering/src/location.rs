//! Location clustering of the listing catalog.
//!
//! Listings are one-hot encoded by location and partitioned with K-Means.
//! When clustering cannot run (empty catalog, a single location, or any
//! numerical failure) every listing lands in cluster 0 instead.

use crate::encoding::LocationEncoder;
use crate::error::{ClusteringError, Result};
use data_loader::{Listing, ListingId};
use linfa::DatasetBase;
use linfa::traits::{Fit, Predict};
use linfa_clustering::KMeans;
use rand_xoshiro::Xoshiro256Plus;
use rand_xoshiro::rand_core::SeedableRng;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Number of location clusters
pub const DEFAULT_CLUSTER_COUNT: usize = 5;

/// K-Means initializations per request
pub const DEFAULT_N_INIT: usize = 10;

/// Lloyd iterations per initialization
pub const DEFAULT_MAX_ITERATIONS: u64 = 300;

/// Centroid movement below which a run has converged
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Cluster label, in `0..cluster_count`
pub type ClusterLabel = usize;

/// Cluster label of every listing in one catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct ClusterAssignment {
    labels: HashMap<ListingId, ClusterLabel>,
    cluster_count: usize,
    fallback: bool,
}

impl ClusterAssignment {
    /// The fallback assignment: every listing in cluster 0.
    pub fn single_cluster(listings: &[Listing]) -> Self {
        Self {
            labels: listings.iter().map(|l| (l.id.clone(), 0)).collect(),
            cluster_count: usize::from(!listings.is_empty()),
            fallback: true,
        }
    }

    /// Cluster of a listing; `None` for identifiers outside the catalog.
    pub fn label_of(&self, listing_id: &ListingId) -> Option<ClusterLabel> {
        self.labels.get(listing_id).copied()
    }

    /// Number of clusters labels were drawn from (at most [`DEFAULT_CLUSTER_COUNT`]).
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Whether this is the single-cluster fallback
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Groups listings into location clusters.
///
/// The cluster count and K-Means settings are fixed; only the random seed
/// can be set, for reproducible runs.
#[derive(Debug, Clone)]
pub struct LocationClusterer {
    n_clusters: usize,
    n_init: usize,
    max_iterations: u64,
    seed: Option<u64>,
}

impl LocationClusterer {
    pub fn new() -> Self {
        Self {
            n_clusters: DEFAULT_CLUSTER_COUNT,
            n_init: DEFAULT_N_INIT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }

    /// Seed the K-Means random number generator (default: a fresh random seed per call)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cluster the catalog, falling back to a single cluster on any failure.
    #[instrument(skip_all, fields(listings = listings.len()))]
    pub fn assign(&self, listings: &[Listing]) -> ClusterAssignment {
        match self.try_assign(listings) {
            Ok(assignment) => assignment,
            Err(ClusteringError::EmptyInput) => {
                debug!("Empty catalog, nothing to cluster");
                ClusterAssignment::single_cluster(listings)
            }
            Err(ClusteringError::Degenerate(reason)) => {
                debug!("Using single cluster: {}", reason);
                ClusterAssignment::single_cluster(listings)
            }
            Err(e) => {
                warn!("Location clustering failed, using single cluster: {}", e);
                ClusterAssignment::single_cluster(listings)
            }
        }
    }

    /// Cluster the catalog, reporting why clustering could not run.
    pub fn try_assign(&self, listings: &[Listing]) -> Result<ClusterAssignment> {
        if listings.is_empty() {
            return Err(ClusteringError::EmptyInput);
        }

        let encoder = LocationEncoder::fit(listings);
        let distinct = encoder.dimension();
        if distinct < 2 {
            return Err(ClusteringError::Degenerate(
                "all listings share one location".to_string(),
            ));
        }

        let k = self.n_clusters.min(distinct);
        let seed = self.seed.unwrap_or_else(rand::random);
        let dataset = DatasetBase::from(encoder.transform(listings));

        let model = KMeans::params_with_rng(k, Xoshiro256Plus::seed_from_u64(seed))
            .n_runs(self.n_init)
            .max_n_iterations(self.max_iterations)
            .tolerance(DEFAULT_TOLERANCE)
            .fit(&dataset)
            .map_err(|e| ClusteringError::Fit(e.to_string()))?;
        let predicted = model.predict(dataset.records());

        if predicted.len() != listings.len() {
            return Err(ClusteringError::ShapeMismatch {
                rows: predicted.len(),
                listings: listings.len(),
            });
        }

        debug!(
            k,
            distinct_locations = distinct,
            seed,
            "Clustered catalog by location"
        );

        let labels = listings
            .iter()
            .zip(predicted.iter())
            .map(|(listing, &label)| (listing.id.clone(), label))
            .collect();

        Ok(ClusterAssignment {
            labels,
            cluster_count: k,
            fallback: false,
        })
    }
}

impl Default for LocationClusterer {
    fn default() -> Self {
        Self::new()
    }
}
