//! Core traits for the scoring pipeline.
//!
//! This module defines the Boost trait: one personalization signal that
//! adds points to a listing and may replace its reason.

use crate::types::Reason;
use clustering::{ClusterLabel, UserContext};
use data_loader::Listing;

/// A single scoring signal.
///
/// All boosts must implement this trait to be used in the ScoringPipeline.
///
/// ## Design Note
/// - Points from every applying boost add up
/// - The reason of the last applying boost wins, so order matters
/// - `Send + Sync` allows a pipeline to be shared across concurrent requests
pub trait Boost: Send + Sync {
    /// Returns the name of this boost (for logging/debugging)
    fn name(&self) -> &str;

    /// Points added when the boost applies
    fn points(&self) -> u32;

    /// Reason recorded when the boost applies
    fn reason(&self) -> Reason;

    /// Whether the boost applies to a listing.
    ///
    /// # Arguments
    /// * `listing` - The listing being scored
    /// * `cluster` - Its location cluster, if it has one
    /// * `context` - The requesting user's history and preferences
    fn applies(
        &self,
        listing: &Listing,
        cluster: Option<ClusterLabel>,
        context: &UserContext,
    ) -> bool;
}
