//! Due-date token resolution.
//!
//! Resolution happens in two stages. A raw alias ("Tuesday", "tm", "2030")
//! is first normalized to a [`Canonical`] code, and the code is then mapped
//! onto a [`DueToken`] category. Many aliases share one code, and every code
//! maps to exactly one category.
//!
//! Aliases are case-sensitive.

use std::fmt;

use chrono::{Month, Weekday};

use crate::error::DueError;

/// First year accepted as a four-digit year token.
pub const FIRST_YEAR: i32 = 2023;
/// Last year accepted as a four-digit year token.
pub const LAST_YEAR: i32 = 2040;

/// A resolved due-date category with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueToken {
    /// No due date given also lands here.
    #[default]
    Today,
    Tomorrow,
    Weekday(Weekday),
    ThisWeek,
    Month(Month),
    ThisMonth,
    DayOfMonth(u32),
    Year(i32),
    ThisYear,
}

impl DueToken {
    /// Short name of the category, without its value.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Weekday(_) => "weekday",
            Self::ThisWeek => "this week",
            Self::Month(_) => "month",
            Self::ThisMonth => "this month",
            Self::DayOfMonth(_) => "day of month",
            Self::Year(_) => "year",
            Self::ThisYear => "this year",
        }
    }
}

impl fmt::Display for DueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekday(day) => write!(f, "{} ({day})", self.category()),
            Self::Month(month) => write!(f, "{} ({})", self.category(), month.name()),
            Self::DayOfMonth(day) => write!(f, "{} ({day:02})", self.category()),
            Self::Year(year) => write!(f, "{} ({year})", self.category()),
            _ => f.write_str(self.category()),
        }
    }
}

/// Canonical short code an alias normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonical {
    Today,
    Tomorrow,
    Week,
    Month,
    Year,
    Day(Weekday),
    MonthName(Month),
    Date(u32),
    YearNumber(i32),
}

impl From<Canonical> for DueToken {
    fn from(code: Canonical) -> Self {
        match code {
            Canonical::Today => Self::Today,
            Canonical::Tomorrow => Self::Tomorrow,
            Canonical::Week => Self::ThisWeek,
            Canonical::Month => Self::ThisMonth,
            Canonical::Year => Self::ThisYear,
            Canonical::Day(weekday) => Self::Weekday(weekday),
            Canonical::MonthName(month) => Self::Month(month),
            Canonical::Date(day) => Self::DayOfMonth(day),
            Canonical::YearNumber(year) => Self::Year(year),
        }
    }
}

/// Word aliases. Numeric aliases are matched by [`numeric_alias`].
const ALIASES: &[(&str, Canonical)] = &[
    ("now", Canonical::Today),
    ("day", Canonical::Today),
    ("today", Canonical::Today),
    ("td", Canonical::Today),
    ("tomorrow", Canonical::Tomorrow),
    ("tm", Canonical::Tomorrow),
    ("week", Canonical::Week),
    ("wk", Canonical::Week),
    ("month", Canonical::Month),
    ("mn", Canonical::Month),
    ("year", Canonical::Year),
    ("Monday", Canonical::Day(Weekday::Mon)),
    ("monday", Canonical::Day(Weekday::Mon)),
    ("mon", Canonical::Day(Weekday::Mon)),
    ("Tuesday", Canonical::Day(Weekday::Tue)),
    ("tuesday", Canonical::Day(Weekday::Tue)),
    ("tue", Canonical::Day(Weekday::Tue)),
    ("Wednesday", Canonical::Day(Weekday::Wed)),
    ("wednesday", Canonical::Day(Weekday::Wed)),
    ("wed", Canonical::Day(Weekday::Wed)),
    ("Thursday", Canonical::Day(Weekday::Thu)),
    ("thursday", Canonical::Day(Weekday::Thu)),
    ("thu", Canonical::Day(Weekday::Thu)),
    ("Friday", Canonical::Day(Weekday::Fri)),
    ("friday", Canonical::Day(Weekday::Fri)),
    ("fri", Canonical::Day(Weekday::Fri)),
    ("Saturday", Canonical::Day(Weekday::Sat)),
    ("saturday", Canonical::Day(Weekday::Sat)),
    ("sat", Canonical::Day(Weekday::Sat)),
    ("Sunday", Canonical::Day(Weekday::Sun)),
    ("sunday", Canonical::Day(Weekday::Sun)),
    ("sun", Canonical::Day(Weekday::Sun)),
    ("January", Canonical::MonthName(Month::January)),
    ("january", Canonical::MonthName(Month::January)),
    ("jan", Canonical::MonthName(Month::January)),
    ("February", Canonical::MonthName(Month::February)),
    ("february", Canonical::MonthName(Month::February)),
    ("feb", Canonical::MonthName(Month::February)),
    ("March", Canonical::MonthName(Month::March)),
    ("march", Canonical::MonthName(Month::March)),
    ("mar", Canonical::MonthName(Month::March)),
    ("April", Canonical::MonthName(Month::April)),
    ("april", Canonical::MonthName(Month::April)),
    ("apr", Canonical::MonthName(Month::April)),
    ("May", Canonical::MonthName(Month::May)),
    ("may", Canonical::MonthName(Month::May)),
    ("June", Canonical::MonthName(Month::June)),
    ("june", Canonical::MonthName(Month::June)),
    ("Jun", Canonical::MonthName(Month::June)),
    ("jun", Canonical::MonthName(Month::June)),
    ("July", Canonical::MonthName(Month::July)),
    ("july", Canonical::MonthName(Month::July)),
    ("jul", Canonical::MonthName(Month::July)),
    ("August", Canonical::MonthName(Month::August)),
    ("august", Canonical::MonthName(Month::August)),
    ("aug", Canonical::MonthName(Month::August)),
    ("September", Canonical::MonthName(Month::September)),
    ("september", Canonical::MonthName(Month::September)),
    ("sep", Canonical::MonthName(Month::September)),
    ("October", Canonical::MonthName(Month::October)),
    ("october", Canonical::MonthName(Month::October)),
    ("oct", Canonical::MonthName(Month::October)),
    ("November", Canonical::MonthName(Month::November)),
    ("november", Canonical::MonthName(Month::November)),
    ("nov", Canonical::MonthName(Month::November)),
    ("December", Canonical::MonthName(Month::December)),
    ("december", Canonical::MonthName(Month::December)),
    ("dec", Canonical::MonthName(Month::December)),
];

/// Two-digit days "01".."31" and four-digit years in `FIRST_YEAR..=LAST_YEAR`.
fn numeric_alias(raw: &str) -> Option<Canonical> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match raw.len() {
        2 => raw
            .parse::<u32>()
            .ok()
            .filter(|day| (1..=31).contains(day))
            .map(Canonical::Date),
        4 => raw
            .parse::<i32>()
            .ok()
            .filter(|year| (FIRST_YEAR..=LAST_YEAR).contains(year))
            .map(Canonical::YearNumber),
        _ => None,
    }
}

/// Stage one: normalize a raw alias to its canonical code.
#[must_use]
pub fn canonicalize(raw: &str) -> Option<Canonical> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, code)| *code)
        .or_else(|| numeric_alias(raw))
}

/// Resolve a raw due string to its token.
///
/// # Errors
///
/// Returns [`DueError::InvalidToken`] if `raw` is not an accepted alias.
pub fn resolve(raw: &str) -> Result<DueToken, DueError> {
    canonicalize(raw)
        .map(DueToken::from)
        .ok_or_else(|| DueError::InvalidToken(raw.to_string()))
}

/// All accepted word aliases, in table order.
#[cfg(test)]
fn word_aliases() -> impl Iterator<Item = &'static str> {
    ALIASES.iter().map(|(alias, _)| *alias)
}
