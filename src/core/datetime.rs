//! Due-date calculation.
//!
//! Every due date is the *last second* of some calendar period: end of a day,
//! end of a month, end of a year. All of them are produced by one primitive,
//! [`DueCalculator::period_end`], which builds a midnight base from the
//! reference instant, optionally snaps it to the first of the month and/or
//! January, adds an offset and steps back one second.
//!
//! The reference instant is captured once and passed in explicitly, so a
//! single resolution never observes the clock twice.

use chrono::{Datelike, Days, Duration, Local, Month, Months, NaiveDate, NaiveDateTime, Weekday};
use tracing::debug;

use super::due::DueToken;
use crate::error::DueError;

/// A snapshot of "now", decomposed the way the calculator needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceInstant {
    at: NaiveDateTime,
    day: u32,
    weekday: u32,
    month: u32,
    year: i32,
}

impl ReferenceInstant {
    /// Capture a reference instant from an explicit timestamp.
    #[must_use]
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            at,
            day: at.day(),
            weekday: at.weekday().num_days_from_sunday(),
            month: at.month(),
            year: at.year().rem_euclid(100),
        }
    }

    /// Capture the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// The full timestamp this instant was captured from.
    #[must_use]
    pub const fn at(&self) -> NaiveDateTime {
        self.at
    }

    /// Day of month, 1-31.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Day of week, 0 = Sunday through 6 = Saturday.
    #[must_use]
    pub const fn weekday(&self) -> u32 {
        self.weekday
    }

    /// Month, 1-12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Two-digit year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The two-digit year expanded into the 2000s.
    #[must_use]
    pub const fn full_year(&self) -> i32 {
        2000 + self.year
    }
}

impl From<NaiveDateTime> for ReferenceInstant {
    fn from(at: NaiveDateTime) -> Self {
        Self::new(at)
    }
}

/// Amount added to the base date before stepping back one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    Days(u32),
    Months(u32),
    Years(u32),
}

/// Computes end-of-period timestamps relative to a [`ReferenceInstant`].
#[derive(Debug, Clone, Copy)]
pub struct DueCalculator {
    reference: ReferenceInstant,
}

impl DueCalculator {
    #[must_use]
    pub const fn new(reference: ReferenceInstant) -> Self {
        Self { reference }
    }

    #[must_use]
    pub const fn reference(&self) -> ReferenceInstant {
        self.reference
    }

    /// Resolve a token to its end-of-period timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::YearElapsed`] for a year before the current one and
    /// [`DueError::OutOfRange`] if calendar arithmetic overflows.
    pub fn due(&self, token: DueToken) -> Result<NaiveDateTime, DueError> {
        let due = match token {
            DueToken::Today => self.due_today(),
            DueToken::Tomorrow => self.due_tomorrow(),
            DueToken::Weekday(weekday) => self.due_weekday(weekday),
            DueToken::ThisWeek => self.due_weekday(Weekday::Sun),
            DueToken::Month(month) => self.due_month(month),
            DueToken::ThisMonth => self.due_this_month(),
            DueToken::DayOfMonth(day) => self.due_day_of_month(day),
            DueToken::Year(year) => self.due_year(year),
            DueToken::ThisYear => self.due_this_year(),
        }?;
        debug!(%token, reference = %self.reference.at, %due, "resolved due date");
        Ok(due)
    }

    /// The shared calendar primitive.
    ///
    /// Builds midnight of the reference date, resets the day to 1 when
    /// `align_day` is set and the month to January when `align_month` is set,
    /// adds `offset` and subtracts one second.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::OutOfRange`] if the result cannot be represented.
    pub fn period_end(
        &self,
        offset: Offset,
        align_day: bool,
        align_month: bool,
    ) -> Result<NaiveDateTime, DueError> {
        let r = &self.reference;
        let mut base = NaiveDate::from_ymd_opt(r.full_year(), r.month, r.day)
            .ok_or(DueError::OutOfRange)?;
        if align_day {
            base = base.with_day(1).ok_or(DueError::OutOfRange)?;
        }
        if align_month {
            base = base.with_month(1).ok_or(DueError::OutOfRange)?;
        }

        let shifted = match offset {
            Offset::Days(n) => base.checked_add_days(Days::new(u64::from(n))),
            Offset::Months(n) => base.checked_add_months(Months::new(n)),
            Offset::Years(n) => n
                .checked_mul(12)
                .and_then(|months| base.checked_add_months(Months::new(months))),
        }
        .ok_or(DueError::OutOfRange)?;

        shifted
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.checked_sub_signed(Duration::seconds(1)))
            .ok_or(DueError::OutOfRange)
    }

    /// End of the current day.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::OutOfRange`] on calendar overflow.
    pub fn due_today(&self) -> Result<NaiveDateTime, DueError> {
        self.period_end(Offset::Days(1), false, false)
    }

    /// End of tomorrow.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::OutOfRange`] on calendar overflow.
    pub fn due_tomorrow(&self) -> Result<NaiveDateTime, DueError> {
        self.period_end(Offset::Days(2), false, false)
    }

    /// End of the next occurrence of `target`, never today.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::OutOfRange`] on calendar overflow.
    pub fn due_weekday(&self, target: Weekday) -> Result<NaiveDateTime, DueError> {
        // Monday = 1 .. Sunday = 7 against a Sunday = 0 reference.
        let target = target.number_from_monday();
        let today = self.reference.weekday;
        let diff = if target > today {
            target - today + 1
        } else {
            7 - (today - target) + 1
        };
        self.period_end(Offset::Days(diff), false, false)
    }

    /// End of the last day of `target`, this year if it has not passed yet,
    /// otherwise next year.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::OutOfRange`] on calendar overflow.
    pub fn due_month(&self, target: Month) -> Result<NaiveDateTime, DueError> {
        self.due_month_number(target.number_from_month())
    }

    /// End of the current month.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::OutOfRange`] on calendar overflow.
    pub fn due_this_month(&self) -> Result<NaiveDateTime, DueError> {
        self.due_month_number(self.reference.month)
    }

    fn due_month_number(&self, target: u32) -> Result<NaiveDateTime, DueError> {
        let current = self.reference.month;
        let diff = if target >= current {
            target - current + 1
        } else {
            12 - (current - target) + 1
        };
        self.period_end(Offset::Months(diff), true, false)
    }

    /// End of the next day numbered `target`.
    ///
    /// A day still ahead in the current month resolves in this month. A day
    /// that has already passed rolls over: the reference moves to the first
    /// second of next month and the same day is resolved from there.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::OutOfRange`] for a day outside 1-31 or on calendar
    /// overflow.
    pub fn due_day_of_month(&self, target: u32) -> Result<NaiveDateTime, DueError> {
        if !(1..=31).contains(&target) {
            return Err(DueError::OutOfRange);
        }

        let today = self.reference.day;
        if target >= today {
            return self.period_end(Offset::Days(target - today + 1), false, false);
        }

        let next_month = self
            .due_this_month()?
            .checked_add_signed(Duration::seconds(1))
            .ok_or(DueError::OutOfRange)?;
        Self::new(ReferenceInstant::new(next_month)).due_day_of_month(target)
    }

    /// End of December 31st of `year` (a full four-digit year).
    ///
    /// # Errors
    ///
    /// Returns [`DueError::YearElapsed`] if `year` is before the current year.
    pub fn due_year(&self, year: i32) -> Result<NaiveDateTime, DueError> {
        let current = self.reference.full_year();
        if year < current {
            return Err(DueError::YearElapsed(year));
        }
        let diff = u32::try_from(year - current + 1).map_err(|_| DueError::OutOfRange)?;
        self.period_end(Offset::Years(diff), true, true)
    }

    /// End of the current year.
    ///
    /// # Errors
    ///
    /// Returns [`DueError::OutOfRange`] on calendar overflow.
    pub fn due_this_year(&self) -> Result<NaiveDateTime, DueError> {
        self.due_year(self.reference.full_year())
    }
}

impl Default for DueCalculator {
    fn default() -> Self {
        Self::new(ReferenceInstant::now())
    }
}
