//! Catalog normalization.
//!
//! Turns raw listing records of arbitrary shape into [`Listing`]s. Absent or
//! wrong-typed optional fields fall back to defaults; nothing here fails.

use crate::types::{Listing, RecordId};
use serde_json::Value;

/// Normalize a raw catalog. Output has the same length and order as the input.
pub fn normalize_listings(raw: &[Value]) -> Vec<Listing> {
    raw.iter()
        .enumerate()
        .map(|(position, record)| normalize_listing(record, position))
        .collect()
}

/// Normalize one raw record found at `position` in the catalog.
///
/// A record without a usable `_id` is identified as `#<position>`.
pub fn normalize_listing(record: &Value, position: usize) -> Listing {
    let id = record
        .get("_id")
        .and_then(RecordId::from_json)
        .unwrap_or_else(|| RecordId::new(format!("#{}", position)));

    Listing {
        id,
        location: string_field(record, "location"),
        title: string_field(record, "title"),
        price: record.get("price").and_then(Value::as_f64).unwrap_or(0.0),
        image_url: image_url(record.get("image")),
    }
}

fn string_field(record: &Value, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The image is either a bare URL or an uploaded-file object carrying `url`.
fn image_url(image: Option<&Value>) -> String {
    match image {
        Some(Value::Object(map)) => map
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(Value::String(url)) => url.clone(),
        _ => String::new(),
    }
}
