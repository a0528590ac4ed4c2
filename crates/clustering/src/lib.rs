//! # Clustering Crate
//!
//! Location clustering of the catalog and per-user preference detection.
//!
//! ## Components
//!
//! ### Location Clusterer
//! - `LocationEncoder`: one-hot encodes each listing's location
//! - `LocationClusterer`: fits linfa's K-Means over the encoded catalog
//!   and falls back to a single cluster whenever clustering is not possible
//!
//! ### Preference Detector
//! - `build_user_context`: booked set, wishlist set and the user's
//!   (at most two) preferred clusters
//!
//! ## Example Usage
//!
//! ```ignore
//! use clustering::{build_user_context, LocationClusterer};
//! use data_loader::normalize_listings;
//!
//! let listings = normalize_listings(&raw_catalog);
//! let assignment = LocationClusterer::new().assign(&listings);
//! let context = build_user_context(&user, &bookings, &assignment);
//! ```
//!
//! Every call clusters from scratch; nothing is cached between requests.

pub mod encoding;
pub mod error;
pub mod location;
pub mod user_context;

pub use encoding::LocationEncoder;
pub use error::{ClusteringError, Result};
pub use location::{
    ClusterAssignment, ClusterLabel, LocationClusterer, DEFAULT_CLUSTER_COUNT,
    DEFAULT_MAX_ITERATIONS, DEFAULT_N_INIT, DEFAULT_TOLERANCE,
};
pub use user_context::{
    build_user_context, detect_preferred_clusters, PreferenceSet, UserContext,
    MAX_PREFERRED_CLUSTERS,
};
