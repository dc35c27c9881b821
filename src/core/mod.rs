//! Core due-date logic for udo.
//!
//! This module turns informal due tokens into end-of-period timestamps and
//! groups stored tasks into named time windows for display.

pub mod bucket;
mod datetime;
mod due;
mod traits;

pub use bucket::{bucketize, Bucket, BucketName, Window};
pub use datetime::{DueCalculator, Offset, ReferenceInstant};
pub use due::{canonicalize, resolve, Canonical, DueToken, FIRST_YEAR, LAST_YEAR};
pub use traits::Schedulable;

use chrono::NaiveDateTime;

use crate::error::DueError;

/// Resolve a raw due string straight to a timestamp against `reference`.
///
/// # Errors
///
/// Returns a [`DueError`] if the token is unknown or cannot be resolved.
pub fn resolve_due(raw: &str, reference: ReferenceInstant) -> Result<NaiveDateTime, DueError> {
    let token = resolve(raw)?;
    DueCalculator::new(reference).due(token)
}
