//! JSON output formatting for udo.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::json;

use crate::core::{Bucket, DueToken};
use crate::error::UdoError;
use crate::todo::Todo;

/// Format the bucketed list as JSON. Empty buckets are omitted.
///
/// # Errors
///
/// Returns `UdoError::Parse` if JSON serialization fails.
pub fn format_buckets_json(buckets: &[Bucket<Todo>]) -> Result<String, UdoError> {
    let buckets: Vec<_> = buckets
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| {
            json!({
                "name": b.name,
                "count": b.items.len(),
                "items": b.items
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&json!({ "buckets": buckets }))?)
}

/// Format a resolved due token as JSON.
///
/// # Errors
///
/// Returns `UdoError::Parse` if JSON serialization fails.
pub fn format_due_json(token: DueToken, due: NaiveDateTime) -> Result<String, UdoError> {
    let output = json!({
        "category": token.category(),
        "token": token.to_string(),
        "due": due
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `UdoError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, UdoError> {
    Ok(serde_json::to_string_pretty(value)?)
}
