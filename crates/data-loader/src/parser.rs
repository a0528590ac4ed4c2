//! Parser for snapshot data files.
//!
//! A snapshot directory holds three JSON arrays, as written by `mongoexport --jsonArray`:
//! - users.json: `{_id, email, username, wishlist: [listingId]}`
//! - listings.json: raw listing documents (kept as JSON, normalized later)
//! - bookings.json: `{_id, listing, user, checkIn, checkOut}`
//!
//! Identifiers may be plain strings or `{"$oid": ...}` objects.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a file holding a single top-level JSON array
fn read_json_array(path: &Path) -> Result<Vec<Value>> {
    let file = file_name(path);
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|source| DataLoadError::JsonError {
        file: file.clone(),
        source,
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(DataLoadError::ParseError {
            file,
            record: 0,
            reason: format!("expected a JSON array, found {}", json_kind(&other)),
        }),
    }
}

/// Deserialize each record, reporting the position of the first bad one
fn parse_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = file_name(path);
    read_json_array(path)?
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            serde_json::from_value(record).map_err(|e| DataLoadError::ParseError {
                file: file.clone(),
                record: idx,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Parse the users.json file
pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    parse_records(path)
}

/// Parse the bookings.json file
pub fn parse_bookings(path: &Path) -> Result<Vec<Booking>> {
    parse_records(path)
}

/// Parse the listings.json file
///
/// Listings are only checked to be JSON objects; field-level cleanup is the
/// normalizer's job.
pub fn parse_listings(path: &Path) -> Result<Vec<Value>> {
    let file = file_name(path);
    let records = read_json_array(path)?;
    for (idx, record) in records.iter().enumerate() {
        if !record.is_object() {
            return Err(DataLoadError::ParseError {
                file,
                record: idx,
                reason: format!("expected an object, found {}", json_kind(record)),
            });
        }
    }
    Ok(records)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
