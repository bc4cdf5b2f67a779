//! Approximate Gregorian <-> Hijri conversion.
//!
//! The conversion is a fixed linear scaling in each direction, not a lunar
//! table. The two directions use independent approximations and are not exact
//! inverses: a date sent through both conversions usually comes back as a
//! different date.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::rollover_date;

/// Ratio of Hijri years to Gregorian years.
const YEAR_RATIO: f64 = 1.030684;

/// Ratio used for both month and day scaling.
const MONTH_DAY_RATIO: f64 = 0.970224;

/// Gregorian year in which the Hijri era starts.
const EPOCH_YEAR: i32 = 622;

/// Hijri month lengths, Muharram first. Alternates 30/29 regardless of year.
const MONTH_LENGTHS: [u32; 12] = [30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29];

/// An approximate Hijri date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HijriDate {
    /// Hijri year (AH)
    pub year: i32,
    /// Month, `1..=12`
    pub month: u32,
    /// Day, `1..=30`
    pub day: u32,
}

impl HijriDate {
    /// Creates a Hijri date from its components without validation.
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Gregorian date this Hijri date maps to.
    #[must_use]
    pub fn to_gregorian(&self) -> NaiveDate {
        hijri_to_gregorian(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for HijriDate {
    fn from(date: NaiveDate) -> Self {
        gregorian_to_hijri(date)
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Converts a Gregorian date to an approximate Hijri date.
///
/// The result always has a month in `1..=12` and a day in `1..=30`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timelyo::calendar::{gregorian_to_hijri, HijriDate};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(gregorian_to_hijri(date), HijriDate::new(1445, 2, 14));
/// ```
#[must_use]
pub fn gregorian_to_hijri(date: NaiveDate) -> HijriDate {
    let g_year = f64::from(date.year());
    let g_month = f64::from(date.month());
    let g_day = f64::from(date.day());

    let mut year = ((g_year - f64::from(EPOCH_YEAR)) * YEAR_RATIO + 0.5).floor() as i32;
    let mut month = ((g_month - 1.0) * MONTH_DAY_RATIO + 1.0).floor() as i32;
    let day = (g_day * MONTH_DAY_RATIO).floor() as i32;

    if month > 12 {
        month -= 12;
        year += 1;
    }
    if month < 1 {
        month += 12;
        year -= 1;
    }

    // Clamp only; this is not a month-length check.
    let day = day.clamp(1, 30);

    HijriDate {
        year,
        month: month as u32,
        day: day as u32,
    }
}

/// Converts an approximate Hijri date to a Gregorian date.
///
/// The scaled components are not normalized before being resolved: a month
/// or day past the end rolls over into the following month or year (see
/// [`rollover_date`]).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timelyo::calendar::hijri_to_gregorian;
///
/// assert_eq!(
///     hijri_to_gregorian(1446, 9, 1),
///     NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()
/// );
/// ```
#[must_use]
pub fn hijri_to_gregorian(year: i32, month: u32, day: u32) -> NaiveDate {
    let g_year = ((f64::from(year) - 1.0) / YEAR_RATIO + f64::from(EPOCH_YEAR)).floor() as i32;
    let g_month = ((f64::from(month) - 1.0) / MONTH_DAY_RATIO + 1.0).floor() as i32;
    let g_day = (f64::from(day) / MONTH_DAY_RATIO).floor() as i32;

    rollover_date(g_year, g_month, g_day)
}

/// Number of days in a Hijri month.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
#[must_use]
pub fn hijri_month_length(month: u32) -> u32 {
    assert!(
        (1..=12).contains(&month),
        "Hijri month {month} not in 1..=12"
    );
    MONTH_LENGTHS[(month - 1) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_gregorian_to_hijri_worked_example() {
        // (2024 - 622) * 1.030684 + 0.5 = 1445.52
        assert_eq!(gregorian_to_hijri(ymd(2024, 3, 15)), HijriDate::new(1445, 2, 14));
    }

    #[test]
    fn test_gregorian_to_hijri_clamps_day() {
        // 1 * 0.970224 floors to 0 and is clamped up
        assert_eq!(gregorian_to_hijri(ymd(2024, 1, 1)).day, 1);
        // 31 * 0.970224 = 30.08 floors to 30
        assert_eq!(gregorian_to_hijri(ymd(2024, 1, 31)).day, 30);
        assert_eq!(gregorian_to_hijri(ymd(2024, 1, 30)).day, 29);
    }

    #[test]
    fn test_gregorian_to_hijri_month_scaling() {
        assert_eq!(gregorian_to_hijri(ymd(2024, 1, 10)).month, 1);
        assert_eq!(gregorian_to_hijri(ymd(2024, 12, 10)).month, 11);
    }

    #[test]
    fn test_gregorian_to_hijri_stays_in_range() {
        let mut date = ymd(1900, 1, 1);
        let end = ymd(2100, 12, 31);
        while date <= end {
            let h = gregorian_to_hijri(date);
            assert!((1..=12).contains(&h.month), "{date} -> {h}");
            assert!((1..=30).contains(&h.day), "{date} -> {h}");
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_hijri_to_gregorian_basic() {
        assert_eq!(hijri_to_gregorian(1446, 9, 1), ymd(2023, 9, 1));
        assert_eq!(hijri_to_gregorian(1446, 9, 30), ymd(2023, 9, 30));
        assert_eq!(hijri_to_gregorian(1446, 1, 15), ymd(2023, 1, 15));
    }

    #[test]
    fn test_hijri_to_gregorian_rolls_over_short_month() {
        // Safar 29 scales to February 29th, which 2023 does not have
        assert_eq!(hijri_to_gregorian(1446, 2, 29), ymd(2023, 3, 1));
    }

    #[test]
    fn test_hijri_to_gregorian_extreme_years_saturate() {
        assert_eq!(hijri_to_gregorian(i32::MIN, 1, 1), NaiveDate::MIN);
        assert_eq!(hijri_to_gregorian(i32::MAX, 1, 1), NaiveDate::MAX);
    }

    #[test]
    fn test_round_trip_is_not_identity() {
        // Month and day survive for January 1st, the year does not
        let original = ymd(2024, 1, 1);
        let back = gregorian_to_hijri(original).to_gregorian();
        assert_eq!((back.month(), back.day()), (1, 1));
        assert_ne!(back, original);
        assert_eq!(back.year(), 2023);

        // Mid-March comes back in February
        let original = ymd(2024, 3, 15);
        let back = gregorian_to_hijri(original).to_gregorian();
        assert_eq!(back, ymd(2023, 2, 14));
    }

    #[test]
    fn test_round_trip_month_day_sometimes_preserved() {
        let dates = [ymd(2024, 1, 1), ymd(2024, 3, 15), ymd(2010, 2, 1), ymd(2030, 7, 20)];
        let preserved: Vec<bool> = dates
            .iter()
            .map(|d| {
                let back = gregorian_to_hijri(*d).to_gregorian();
                back.month() == d.month() && back.day() == d.day()
            })
            .collect();
        assert!(preserved.iter().any(|p| *p));
        assert!(preserved.iter().any(|p| !*p));
    }

    #[test]
    fn test_hijri_month_length_alternates() {
        for month in [1, 3, 5, 7, 9, 11] {
            assert_eq!(hijri_month_length(month), 30, "month {month}");
        }
        for month in [2, 4, 6, 8, 10, 12] {
            assert_eq!(hijri_month_length(month), 29, "month {month}");
        }
    }

    #[test]
    #[should_panic(expected = "not in 1..=12")]
    fn test_hijri_month_length_rejects_zero() {
        let _ = hijri_month_length(0);
    }

    #[test]
    #[should_panic(expected = "not in 1..=12")]
    fn test_hijri_month_length_rejects_thirteen() {
        let _ = hijri_month_length(13);
    }

    #[test]
    fn test_from_naive_date() {
        let h: HijriDate = ymd(2024, 3, 15).into();
        assert_eq!(h.to_string(), "1445-02-14");
    }
}
