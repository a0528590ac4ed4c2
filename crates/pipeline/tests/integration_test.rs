//! Integration tests for the pipeline.
//!
//! These tests verify that clustering, preference detection, scoring and
//! ranking work together in realistic scenarios.

use clustering::{build_user_context, ClusterAssignment, LocationClusterer, UserContext};
use data_loader::{Booking, Listing, RecordId, User};
use pipeline::{
    rank_and_select, Reason, Recommendation, ScoringPipeline, DEFAULT_RECOMMENDATION_LIMIT,
    MAX_MATCH_SCORE,
};

const USER: &str = "65a000000000000000000001";

fn listing(id: &str, location: &str) -> Listing {
    Listing {
        id: RecordId::new(id),
        location: location.to_string(),
        title: format!("Stay in {}", location),
        price: 150.0,
        image_url: format!("https://img.example/{}.jpg", id),
    }
}

fn user(wishlist: &[&str]) -> User {
    User {
        id: RecordId::new(USER),
        email: "ana@example.com".to_string(),
        username: "ana".to_string(),
        wishlist: wishlist.iter().map(|s| RecordId::new(*s)).collect(),
    }
}

fn booking(listing: &str) -> Booking {
    Booking {
        listing: RecordId::new(listing),
        user: RecordId::new(USER),
        check_in: None,
        check_out: None,
    }
}

fn create_test_catalog() -> Vec<Listing> {
    vec![
        listing("malibu-1", "Malibu"),
        listing("nyc-1", "New York City"),
        listing("aspen-1", "Aspen"),
        listing("florence-1", "Florence"),
        listing("malibu-2", "Malibu"),
        listing("portland-1", "Portland"),
        listing("aspen-2", "Aspen"),
        listing("cancun-1", "Cancun"),
        listing("tahoe-1", "Lake Tahoe"),
        listing("nyc-2", "New York City"),
        listing("phuket-1", "Phuket"),
    ]
}

/// Run the four stages end to end for one user
fn recommend(
    listings: &[Listing],
    user: &User,
    bookings: &[Booking],
    seed: u64,
) -> (Vec<Recommendation>, ClusterAssignment, UserContext) {
    let assignment = LocationClusterer::new().with_seed(seed).assign(listings);
    let context = build_user_context(user, bookings, &assignment);
    let scored = ScoringPipeline::standard().score(listings, &assignment, &context);
    (
        rank_and_select(scored, DEFAULT_RECOMMENDATION_LIMIT),
        assignment,
        context,
    )
}

#[test]
fn test_single_listing_no_history_is_popular() {
    let listings = vec![listing("only-1", "Malibu")];
    let (recs, _, _) = recommend(&listings, &user(&[]), &[], 1);

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].listing_id.as_str(), "only-1");
    assert_eq!(recs[0].match_score, 60);
    assert_eq!(recs[0].reason, Reason::Popular);
    assert_eq!(recs[0].reason.as_str(), "Popular listing on platform");
}

#[test]
fn test_wishlisted_listing_gets_wishlist_reason() {
    let listings = create_test_catalog();
    let (recs, _, _) = recommend(&listings, &user(&["florence-1"]), &[], 7);

    let florence = recs
        .iter()
        .find(|r| r.listing_id.as_str() == "florence-1")
        .expect("wishlisted listing should be recommended");
    assert!(florence.match_score >= 30);
    assert_eq!(florence.reason, Reason::Wishlist);
    assert_eq!(florence.reason.as_str(), "From your wishlist");
    // Wishlisted listing's cluster is preferred as well
    assert_eq!(recs[0].listing_id.as_str(), "florence-1");
    assert_eq!(florence.match_score, 80);
}

#[test]
fn test_every_signal_caps_at_max() {
    let listings = create_test_catalog();
    let (recs, _, _) = recommend(
        &listings,
        &user(&["aspen-1"]),
        &[booking("aspen-1")],
        3,
    );

    assert_eq!(recs[0].listing_id.as_str(), "aspen-1");
    assert_eq!(recs[0].match_score, MAX_MATCH_SCORE);
    assert_eq!(recs[0].reason, Reason::PreviouslyBooked);
    assert_eq!(recs[0].reason.as_str(), "Previously booked location");
}

#[test]
fn test_empty_catalog_gives_nothing() {
    let (recs, assignment, context) = recommend(&[], &user(&["aspen-1"]), &[booking("x")], 1);
    assert!(recs.is_empty());
    assert!(assignment.is_empty());
    assert!(context.preferred_clusters.is_empty());
}

#[test]
fn test_single_location_catalog_still_scores() {
    let listings: Vec<Listing> = (0..10)
        .map(|i| listing(&format!("malibu-{}", i), "Malibu"))
        .collect();
    let (recs, assignment, _) = recommend(&listings, &user(&["malibu-3"]), &[], 9);

    assert!(assignment.is_fallback());
    assert_eq!(recs.len(), DEFAULT_RECOMMENDATION_LIMIT);
    // Wishlisted listing first, the rest share the preferred cluster
    assert_eq!(recs[0].listing_id.as_str(), "malibu-3");
    assert_eq!(recs[0].match_score, 80);
    for rec in &recs[1..] {
        assert_eq!(rec.match_score, 50);
        assert_eq!(rec.reason, Reason::PreferredLocation);
    }
}

#[test]
fn test_same_location_shares_preference() {
    let listings = create_test_catalog();
    let (recs, assignment, context) = recommend(&listings, &user(&[]), &[booking("nyc-1")], 11);

    assert_eq!(context.preferred_clusters.len(), 1);
    assert_eq!(recs[0].listing_id.as_str(), "nyc-1");
    assert_eq!(recs[0].match_score, 70);

    // Unranked: the other NYC stay gets the cluster boost only
    let scored = ScoringPipeline::standard().score(&listings, &assignment, &context);
    let nyc2 = scored
        .iter()
        .find(|r| r.listing_id.as_str() == "nyc-2")
        .expect("every catalog listing is scored");
    assert_eq!(nyc2.match_score, 50);
    assert_eq!(nyc2.reason, Reason::PreferredLocation);

    // Ranked: unboosted listings (60) sort above cluster-only ones (50)
    let full = rank_and_select(scored, usize::MAX);
    let nyc2_rank = full
        .iter()
        .position(|r| r.listing_id.as_str() == "nyc-2")
        .expect("nothing is truncated");
    for rec in &full[nyc2_rank..] {
        assert!(rec.match_score <= 50);
    }
    let baseline = full.iter().filter(|r| r.match_score == 60).count();
    assert!(nyc2_rank > baseline);
    if baseline >= DEFAULT_RECOMMENDATION_LIMIT - 1 {
        assert!(recs.iter().all(|r| r.listing_id.as_str() != "nyc-2"));
    }
}

#[test]
fn test_dangling_history_is_ignored() {
    let listings = create_test_catalog();
    let (recs, _, context) = recommend(
        &listings,
        &user(&["65b0000000000000000000ff"]),
        &[booking("65b0000000000000000000fe")],
        5,
    );

    assert!(context.preferred_clusters.is_empty());
    assert_eq!(recs.len(), DEFAULT_RECOMMENDATION_LIMIT);
    for rec in &recs {
        assert_eq!(rec.match_score, 60);
    }
    // All tied: catalog order preserved
    let ids: Vec<&str> = recs.iter().map(|r| r.listing_id.as_str()).collect();
    let expected: Vec<&str> = listings[..8].iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_output_invariants() {
    let listings = create_test_catalog();
    let (recs, _, _) = recommend(
        &listings,
        &user(&["phuket-1", "malibu-2"]),
        &[booking("malibu-1"), booking("cancun-1")],
        13,
    );

    assert_eq!(recs.len(), DEFAULT_RECOMMENDATION_LIMIT.min(listings.len()));
    for rec in &recs {
        assert!(listings.iter().any(|l| l.id == rec.listing_id));
        assert!(rec.match_score <= MAX_MATCH_SCORE);
    }
    for pair in recs.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
}

#[test]
fn test_fixed_seed_is_repeatable() {
    let listings = create_test_catalog();
    let wishlist = user(&["tahoe-1", "nyc-2"]);
    let bookings = [booking("portland-1")];

    let (first, _, _) = recommend(&listings, &wishlist, &bookings, 42);
    let (second, _, _) = recommend(&listings, &wishlist, &bookings, 42);
    assert_eq!(first, second);
}
