//! Error types for the clustering crate.
//!
//! These never reach the recommendation caller: [`crate::LocationClusterer`]
//! turns every one of them into the single-cluster fallback.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusteringError {
    /// Nothing to cluster
    #[error("Cannot cluster an empty dataset")]
    EmptyInput,

    /// Feature matrix does not match the catalog
    #[error("Feature matrix has {rows} rows for {listings} listings")]
    ShapeMismatch { rows: usize, listings: usize },

    /// Feature space carries no information to split on
    #[error("Degenerate feature space: {0}")]
    Degenerate(String),

    /// K-Means fit rejected the data or its parameters
    #[error("K-Means fit failed: {0}")]
    Fit(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ClusteringError>;
