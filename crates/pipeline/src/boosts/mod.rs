//! Boost implementations for the scoring pipeline.
//!
//! The standard pipeline applies them in this order:
//! preferred cluster, wishlist, previously booked.

pub mod preferred_cluster;
pub mod previously_booked;
pub mod wishlist;

pub use preferred_cluster::PreferredClusterBoost;
pub use previously_booked::PreviouslyBookedBoost;
pub use wishlist::WishlistBoost;
