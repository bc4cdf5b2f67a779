//! Calendar core: Gregorian/Hijri conversion and month grid generation.
//!
//! Everything in this module is pure. Gregorian dates are plain
//! [`chrono::NaiveDate`] values; Hijri dates are the approximate
//! [`HijriDate`] triples produced by the linear conversion in [`hijri`].

pub mod grid;
pub mod hijri;

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub use grid::{
    build_gregorian_month, build_hijri_month, build_month, DayCell, MonthGrid, DAYS_PER_WEEK,
};
pub use hijri::{gregorian_to_hijri, hijri_month_length, hijri_to_gregorian, HijriDate};

/// Calendar system used to lay out the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    /// Solar civil calendar
    #[default]
    Gregorian,
    /// Approximate lunar Hijri calendar
    Hijri,
}

impl CalendarType {
    /// Identifier used in persisted state and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Hijri => "hijri",
        }
    }

    /// The other calendar system.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Gregorian => Self::Hijri,
            Self::Hijri => Self::Gregorian,
        }
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gregorian" => Ok(Self::Gregorian),
            "hijri" => Ok(Self::Hijri),
            other => anyhow::bail!("Unknown calendar type '{other}' (expected gregorian or hijri)"),
        }
    }
}

/// Resolves a possibly out-of-range `(year, month, day)` triple to a date.
///
/// Months outside `1..=12` carry into neighbouring years and days outside the
/// month (including `0` and negative values) carry into neighbouring months,
/// the same way a host date constructor rolls values over. Results beyond the
/// range chrono can represent saturate to [`NaiveDate::MIN`] / [`NaiveDate::MAX`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timelyo::calendar::rollover_date;
///
/// // Day 0 is the last day of the previous month
/// assert_eq!(rollover_date(2024, 3, 0), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// // Month 13 is January of the next year
/// assert_eq!(rollover_date(2023, 13, 1), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// ```
#[must_use]
pub fn rollover_date(year: i32, month: i32, day: i32) -> NaiveDate {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let norm_year = months.div_euclid(12);
    let norm_month = months.rem_euclid(12) + 1;

    let first = i32::try_from(norm_year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, norm_month as u32, 1));

    let Some(first) = first else {
        return saturate(norm_year < i64::from(NaiveDate::MIN.year()));
    };

    first
        .checked_add_signed(Duration::days(i64::from(day) - 1))
        .unwrap_or_else(|| saturate(day < 1))
}

fn saturate(below: bool) -> NaiveDate {
    if below {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    }
}

/// Weekday index of `date` with Sunday as `0` and Saturday as `6`.
#[must_use]
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Canonical `YYYY-MM-DD` key for a Gregorian date.
///
/// Marked dates are always keyed by this string, whichever calendar is shown.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parses a `YYYY-MM-DD` date as accepted on the command line.
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}
