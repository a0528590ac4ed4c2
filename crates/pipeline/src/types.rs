//! Output types of the scoring pipeline.

use data_loader::{Listing, ListingId};
use serde::Serialize;
use std::fmt;

/// Score given to listings no boost applied to
pub const BASELINE_SCORE: u32 = 60;

/// Upper bound on any match score
pub const MAX_MATCH_SCORE: u32 = 98;

/// Number of recommendations returned per request
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 8;

/// Why a listing was recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reason {
    #[serde(rename = "Popular listing on platform")]
    Popular,
    #[serde(rename = "Similar to your preferred locations")]
    PreferredLocation,
    #[serde(rename = "From your wishlist")]
    Wishlist,
    #[serde(rename = "Previously booked location")]
    PreviouslyBooked,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Popular => "Popular listing on platform",
            Reason::PreferredLocation => "Similar to your preferred locations",
            Reason::Wishlist => "From your wishlist",
            Reason::PreviouslyBooked => "Previously booked location",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored listing, as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "_id")]
    pub listing_id: ListingId,
    pub title: String,
    pub location: String,
    #[serde(serialize_with = "data_loader::serialize_price")]
    pub price: f64,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    pub reason: Reason,
}

impl Recommendation {
    /// Unscored recommendation for a listing: score 0, popular-listing reason.
    pub fn draft(listing: &Listing) -> Self {
        Self {
            listing_id: listing.id.clone(),
            title: listing.title.clone(),
            location: listing.location.clone(),
            price: listing.price,
            image_url: listing.image_url.clone(),
            match_score: 0,
            reason: Reason::Popular,
        }
    }
}
