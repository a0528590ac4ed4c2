//! Scoring and ranking of listings for one user.
//!
//! This crate provides:
//! - Boost trait and implementations for the personalization signals
//! - ScoringPipeline for applying boosts in a fixed order
//! - rank_and_select for the final ordering and cut-off
//!
//! ## Architecture
//! The pipeline processes the catalog in stages:
//! 1. Every listing becomes a draft recommendation (score 0)
//! 2. Boosts add points and set the reason (preferred cluster, wishlist, booked)
//! 3. Unboosted listings get the baseline score; all scores are capped
//! 4. Recommendations are stably sorted by score and truncated
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{rank_and_select, ScoringPipeline, DEFAULT_RECOMMENDATION_LIMIT};
//!
//! let scored = ScoringPipeline::standard().score(&listings, &assignment, &context);
//! let top = rank_and_select(scored, DEFAULT_RECOMMENDATION_LIMIT);
//! ```

pub mod traits;
pub mod boosts;
pub mod scoring_pipeline;
pub mod ranking;
pub mod types;

// Re-export main types
pub use traits::Boost;
pub use scoring_pipeline::ScoringPipeline;
pub use ranking::rank_and_select;
pub use types::{
    Reason, Recommendation, BASELINE_SCORE, DEFAULT_RECOMMENDATION_LIMIT, MAX_MATCH_SCORE,
};
