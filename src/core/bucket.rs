//! Grouping of scheduled items into named time windows.
//!
//! Buckets are evaluated independently: an item lands in every bucket whose
//! window contains its due date, so "this year" and a calendar month bucket
//! may both list the same task. Windows are open at both ends, except the
//! calendar month windows, which include their upper bound so that a task due
//! at the last second of the month is listed under it.

use std::fmt;

use chrono::{Days, Month, Months, NaiveDateTime};
use serde::{Serialize, Serializer};

use super::datetime::{DueCalculator, ReferenceInstant};
use super::traits::Schedulable;
use crate::error::DueError;

/// Name of a display bucket, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketName {
    ThisYear,
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
    ThisMonth,
    ThisWeek,
    Tomorrow,
    Today,
    Outdated,
}

impl BucketName {
    /// Every bucket in the order it is emitted.
    pub const ALL: [Self; 18] = [
        Self::ThisYear,
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
        Self::ThisMonth,
        Self::ThisWeek,
        Self::Tomorrow,
        Self::Today,
        Self::Outdated,
    ];

    /// The display name the presentation layer depends on.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisYear => "this year",
            Self::January => "january",
            Self::February => "february",
            Self::March => "march",
            Self::April => "april",
            Self::May => "may",
            Self::June => "june",
            Self::July => "july",
            Self::August => "august",
            Self::September => "september",
            Self::October => "october",
            Self::November => "november",
            Self::December => "december",
            Self::ThisMonth => "this month",
            Self::ThisWeek => "this week",
            Self::Tomorrow => "tomorrow",
            Self::Today => "today",
            Self::Outdated => "outdated",
        }
    }

    /// The calendar month of a month bucket.
    #[must_use]
    pub const fn month(self) -> Option<Month> {
        match self {
            Self::January => Some(Month::January),
            Self::February => Some(Month::February),
            Self::March => Some(Month::March),
            Self::April => Some(Month::April),
            Self::May => Some(Month::May),
            Self::June => Some(Month::June),
            Self::July => Some(Month::July),
            Self::August => Some(Month::August),
            Self::September => Some(Month::September),
            Self::October => Some(Month::October),
            Self::November => Some(Month::November),
            Self::December => Some(Month::December),
            Self::ThisYear
            | Self::ThisMonth
            | Self::ThisWeek
            | Self::Tomorrow
            | Self::Today
            | Self::Outdated => None,
        }
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BucketName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Time range a bucket covers. The lower bound is always exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub lower: NaiveDateTime,
    pub upper: NaiveDateTime,
    pub upper_inclusive: bool,
}

impl Window {
    const fn open(lower: NaiveDateTime, upper: NaiveDateTime) -> Self {
        Self {
            lower,
            upper,
            upper_inclusive: false,
        }
    }

    /// Check whether `due` falls inside the window.
    #[must_use]
    pub fn contains(&self, due: NaiveDateTime) -> bool {
        let below_upper = if self.upper_inclusive {
            due <= self.upper
        } else {
            due < self.upper
        };
        self.lower < due && below_upper
    }
}

/// A named bucket and the items that fall into it.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket<T> {
    pub name: BucketName,
    pub items: Vec<T>,
}

impl<T> Bucket<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn plus_days(at: NaiveDateTime, days: u64) -> Result<NaiveDateTime, DueError> {
    at.checked_add_days(Days::new(days)).ok_or(DueError::OutOfRange)
}

fn plus_months(at: NaiveDateTime, months: u32) -> Result<NaiveDateTime, DueError> {
    at.checked_add_months(Months::new(months))
        .ok_or(DueError::OutOfRange)
}

/// Compute the window of one bucket relative to `now`.
///
/// # Errors
///
/// Returns [`DueError::OutOfRange`] if a boundary cannot be represented.
pub fn window(name: BucketName, now: ReferenceInstant) -> Result<Window, DueError> {
    let at = now.at();
    let window = match name {
        BucketName::ThisYear => Window::open(plus_months(at, 1)?, plus_months(at, 12)?),
        BucketName::ThisMonth => Window::open(plus_days(at, 7)?, plus_months(at, 1)?),
        BucketName::ThisWeek => Window::open(plus_days(at, 2)?, plus_days(at, 7)?),
        BucketName::Tomorrow => Window::open(plus_days(at, 1)?, plus_days(at, 2)?),
        BucketName::Today => Window::open(at, plus_days(at, 1)?),
        BucketName::Outdated => {
            let five_years_ago = at
                .checked_sub_months(Months::new(60))
                .ok_or(DueError::OutOfRange)?;
            Window::open(five_years_ago, at)
        },
        month_bucket => {
            let month = month_bucket.month().ok_or(DueError::OutOfRange)?;
            let calc = DueCalculator::new(now);
            Window {
                lower: calc.due_month(month.pred())?,
                upper: calc.due_month(month)?,
                upper_inclusive: true,
            }
        },
    };
    Ok(window)
}

/// Group `items` into all eighteen buckets, in emission order.
///
/// Completed items are dropped first unless `include_completed` is set.
/// Empty buckets are kept so the caller sees a stable layout; renderers skip
/// them.
///
/// # Errors
///
/// Returns [`DueError::OutOfRange`] if a boundary cannot be represented.
pub fn bucketize<T>(
    items: &[T],
    now: ReferenceInstant,
    include_completed: bool,
) -> Result<Vec<Bucket<T>>, DueError>
where
    T: Schedulable + Clone,
{
    let candidates: Vec<&T> = items
        .iter()
        .filter(|item| include_completed || !item.is_done())
        .collect();

    BucketName::ALL
        .iter()
        .map(|&name| {
            let window = window(name, now)?;
            let items = candidates
                .iter()
                .filter(|item| window.contains(item.due()))
                .map(|item| (*item).clone())
                .collect();
            Ok(Bucket { name, items })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        due: NaiveDateTime,
        done: bool,
    }

    impl Schedulable for Item {
        fn due(&self) -> NaiveDateTime {
            self.due
        }

        fn is_done(&self) -> bool {
            self.done
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn now() -> ReferenceInstant {
        ReferenceInstant::new(at(2024, 3, 15, 10, 30, 0))
    }

    fn item(id: u32, due: NaiveDateTime) -> Item {
        Item {
            id,
            due,
            done: false,
        }
    }

    fn ids_in(buckets: &[Bucket<Item>], name: BucketName) -> Vec<u32> {
        buckets
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.items.iter().map(|i| i.id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_emission_order_and_names() {
        let buckets = bucketize::<Item>(&[], now(), false).unwrap();
        let names: Vec<&str> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names.len(), 18);
        assert_eq!(names[0], "this year");
        assert_eq!(names[1], "january");
        assert_eq!(names[12], "december");
        assert_eq!(
            &names[13..],
            &["this month", "this week", "tomorrow", "today", "outdated"]
        );
        assert!(buckets.iter().all(Bucket::is_empty));
    }

    #[test]
    fn test_due_today_lands_in_today_only() {
        let calc = DueCalculator::new(now());
        let items = [item(1, calc.due_today().unwrap())];
        let buckets = bucketize(&items, now(), false).unwrap();

        assert_eq!(ids_in(&buckets, BucketName::Today), vec![1]);
        assert!(ids_in(&buckets, BucketName::Outdated).is_empty());
        assert!(ids_in(&buckets, BucketName::Tomorrow).is_empty());
    }

    #[test]
    fn test_lower_bound_is_strict() {
        let now_at = now().at();
        let items = [item(1, now_at - Duration::seconds(1)), item(2, now_at)];
        let buckets = bucketize(&items, now(), false).unwrap();

        assert_eq!(ids_in(&buckets, BucketName::Outdated), vec![1]);
        assert!(ids_in(&buckets, BucketName::Today).is_empty());
    }

    #[test]
    fn test_tomorrow_and_this_week() {
        let calc = DueCalculator::new(now());
        let items = [
            item(1, calc.due_tomorrow().unwrap()),
            item(2, at(2024, 3, 19, 23, 59, 59)),
        ];
        let buckets = bucketize(&items, now(), false).unwrap();

        assert_eq!(ids_in(&buckets, BucketName::Tomorrow), vec![1]);
        assert_eq!(ids_in(&buckets, BucketName::ThisWeek), vec![2]);
    }

    #[test]
    fn test_month_bucket_includes_end_of_month() {
        let calc = DueCalculator::new(now());
        let items = [
            item(1, calc.due_month(Month::April).unwrap()),
            item(2, calc.due_month(Month::January).unwrap()),
        ];
        let buckets = bucketize(&items, now(), false).unwrap();

        assert_eq!(ids_in(&buckets, BucketName::April), vec![1]);
        assert_eq!(ids_in(&buckets, BucketName::January), vec![2]);
        // April is also more than a month away, so it shows up in "this year".
        assert_eq!(ids_in(&buckets, BucketName::ThisYear), vec![1, 2]);
    }

    #[test]
    fn test_current_month_bucket_is_empty() {
        let calc = DueCalculator::new(now());
        let items = [item(1, calc.due_this_month().unwrap())];
        let buckets = bucketize(&items, now(), false).unwrap();

        assert!(ids_in(&buckets, BucketName::March).is_empty());
        assert_eq!(ids_in(&buckets, BucketName::ThisMonth), vec![1]);
    }

    #[test]
    fn test_completed_items_filtered() {
        let calc = DueCalculator::new(now());
        let due = calc.due_today().unwrap();
        let items = [
            item(1, due),
            Item {
                id: 2,
                due,
                done: true,
            },
        ];

        let open = bucketize(&items, now(), false).unwrap();
        assert_eq!(ids_in(&open, BucketName::Today), vec![1]);

        let all = bucketize(&items, now(), true).unwrap();
        assert_eq!(ids_in(&all, BucketName::Today), vec![1, 2]);
    }

    #[test]
    fn test_older_than_five_years_is_dropped() {
        let items = [item(1, at(2019, 3, 1, 0, 0, 0))];
        let buckets = bucketize(&items, now(), true).unwrap();
        assert!(buckets.iter().all(Bucket::is_empty));
    }

    #[test]
    fn test_window_contains() {
        let lower = at(2024, 1, 1, 0, 0, 0);
        let upper = at(2024, 1, 31, 23, 59, 59);
        let open = Window::open(lower, upper);
        let closed = Window {
            upper_inclusive: true,
            ..open
        };

        assert!(!open.contains(lower));
        assert!(!open.contains(upper));
        assert!(closed.contains(upper));
        assert!(open.contains(at(2024, 1, 15, 12, 0, 0)));
    }
}
