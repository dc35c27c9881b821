//! Shared traits for scheduled items.

use chrono::NaiveDateTime;

/// Trait for items that carry a resolved due date.
///
/// The bucketizer groups anything implementing this trait, so it never needs
/// to know about the storage row type.
pub trait Schedulable {
    /// The resolved due date (last second of the due period).
    fn due(&self) -> NaiveDateTime;

    /// Whether the item has been completed.
    fn is_done(&self) -> bool;
}
