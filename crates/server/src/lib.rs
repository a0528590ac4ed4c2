//! Server crate for the Wanderlust recommendation engine.
//!
//! This crate contains the orchestrator that coordinates all components
//! of the recommendation pipeline.

pub mod orchestrator;

pub use orchestrator::{RecommendationOrchestrator, RecommendationResponse, RecommendationTrace};
