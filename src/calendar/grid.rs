//! Month grid generation for a 7-column (Sunday first) calendar view.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::hijri::{hijri_month_length, hijri_to_gregorian};
use super::{rollover_date, weekday_index, CalendarType};

/// Number of columns in a month grid.
pub const DAYS_PER_WEEK: usize = 7;

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DayCell {
    /// Padding before the first day so it lines up under its weekday
    Blank,
    /// A real day of the month
    Day {
        /// Day number in the grid's own calendar
        day: u32,
        /// Gregorian date used to address the cell (selection, marking)
        date: NaiveDate,
    },
}

impl DayCell {
    /// Returns `true` for padding cells.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Gregorian date of the cell, `None` for padding.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day { date, .. } => Some(*date),
        }
    }

    /// Day number shown in the cell, `None` for padding.
    #[must_use]
    pub const fn day(&self) -> Option<u32> {
        match self {
            Self::Blank => None,
            Self::Day { day, .. } => Some(*day),
        }
    }
}

/// Ordered cells for one displayed month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    /// Calendar the grid is laid out in
    pub calendar: CalendarType,
    /// Year in `calendar`
    pub year: i32,
    /// Month in `calendar`, `1..=12`
    pub month: u32,
    /// Leading blanks followed by one cell per day
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Number of padding cells before the first day.
    #[must_use]
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_blank()).count()
    }

    /// Number of real day cells.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_blank()).count()
    }

    /// Cells split into weeks. The last week may be shorter than seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Index of the cell holding `date`, if it is on this grid.
    #[must_use]
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.cells.iter().position(|c| c.date() == Some(date))
    }

    /// First real day of the grid.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.cells.iter().find_map(DayCell::date)
    }

    /// Last real day of the grid.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.cells.iter().rev().find_map(DayCell::date)
    }
}

/// Builds the grid for a Gregorian month.
///
/// A `month` outside `1..=12` rolls over into the neighbouring year; the
/// returned grid carries the resolved year and month.
///
/// # Examples
///
/// ```
/// use timelyo::calendar::build_gregorian_month;
///
/// let grid = build_gregorian_month(2024, 2);
/// assert_eq!(grid.leading_blanks(), 4); // 2024-02-01 is a Thursday
/// assert_eq!(grid.day_count(), 29);
/// ```
#[must_use]
pub fn build_gregorian_month(year: i32, month: i32) -> MonthGrid {
    let first = rollover_date(year, month, 1);
    let (year, month) = (first.year(), first.month());
    // Day 0 of the next month is the last day of this one
    let days_in_month = rollover_date(year, month as i32 + 1, 0).day();

    let blanks = weekday_index(first) as usize;
    let mut cells = Vec::with_capacity(blanks + days_in_month as usize);
    cells.extend(std::iter::repeat(DayCell::Blank).take(blanks));
    cells.extend(
        (1..=days_in_month)
            .filter_map(|d| first.with_day(d))
            .map(|date| DayCell::Day { day: date.day(), date }),
    );

    MonthGrid {
        calendar: CalendarType::Gregorian,
        year,
        month,
        cells,
    }
}

/// Builds the grid for a Hijri month.
///
/// Each day cell carries the Gregorian date of that Hijri day, so selection
/// and marking work the same in both calendars.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
#[must_use]
pub fn build_hijri_month(year: i32, month: u32) -> MonthGrid {
    let days_in_month = hijri_month_length(month);
    let first = hijri_to_gregorian(year, month, 1);

    let blanks = weekday_index(first) as usize;
    let mut cells = Vec::with_capacity(blanks + days_in_month as usize);
    cells.extend(std::iter::repeat(DayCell::Blank).take(blanks));
    cells.extend((1..=days_in_month).map(|day| DayCell::Day {
        day,
        date: hijri_to_gregorian(year, month, day),
    }));

    MonthGrid {
        calendar: CalendarType::Hijri,
        year,
        month,
        cells,
    }
}

/// Builds the grid for `year`/`month` in the given calendar.
///
/// # Panics
///
/// Panics for a Hijri `month` outside `1..=12`.
#[must_use]
pub fn build_month(calendar: CalendarType, year: i32, month: u32) -> MonthGrid {
    match calendar {
        CalendarType::Gregorian => build_gregorian_month(year, month as i32),
        CalendarType::Hijri => build_hijri_month(year, month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_gregorian_leap_february() {
        let grid = build_gregorian_month(2024, 2);
        assert_eq!(grid.leading_blanks(), 4);
        assert_eq!(grid.day_count(), 29);
        assert_eq!(grid.cells.len(), 33);
        assert_eq!(grid.first_date(), Some(ymd(2024, 2, 1)));
        assert_eq!(grid.last_date(), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_gregorian_common_february() {
        let grid = build_gregorian_month(2023, 2);
        // 2023-02-01 is a Wednesday
        assert_eq!(grid.leading_blanks(), 3);
        assert_eq!(grid.day_count(), 28);
    }

    #[test]
    fn test_gregorian_month_starting_sunday_has_no_blanks() {
        // 2024-09-01 is a Sunday
        let grid = build_gregorian_month(2024, 9);
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.day_count(), 30);
    }

    #[test]
    fn test_gregorian_days_are_consecutive() {
        let grid = build_gregorian_month(2024, 12);
        let dates: Vec<NaiveDate> = grid.cells.iter().filter_map(DayCell::date).collect();
        assert_eq!(dates.len(), 31);
        for pair in dates.windows(2) {
            assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }
        for (i, cell) in grid.cells.iter().skip(grid.leading_blanks()).enumerate() {
            assert_eq!(cell.day(), Some(i as u32 + 1));
        }
    }

    #[test]
    fn test_gregorian_month_rolls_over() {
        let grid = build_gregorian_month(2023, 13);
        assert_eq!((grid.year, grid.month), (2024, 1));
        assert_eq!(grid.day_count(), 31);
    }

    #[test]
    fn test_gregorian_last_representable_month_keeps_last_day() {
        let grid = build_gregorian_month(262142, 12);
        assert_eq!(grid.day_count(), 31);
        assert_eq!(grid.last_date(), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_hijri_day_count_matches_month_length() {
        for year in [1, 1300, 1445, 1446, 1500] {
            for month in 1..=12 {
                let grid = build_hijri_month(year, month);
                assert_eq!(
                    grid.day_count(),
                    hijri_month_length(month) as usize,
                    "{year}/{month}"
                );
            }
        }
    }

    #[test]
    fn test_hijri_leading_blanks_follow_first_day() {
        // Hijri 1446/9/1 maps to 2023-09-01, a Friday
        let grid = build_hijri_month(1446, 9);
        assert_eq!(grid.leading_blanks(), 5);
        assert_eq!(grid.first_date(), Some(ymd(2023, 9, 1)));
        assert_eq!(grid.calendar, CalendarType::Hijri);
    }

    #[test]
    fn test_hijri_cells_carry_gregorian_dates() {
        let grid = build_hijri_month(1446, 2);
        let last = grid.cells.last().unwrap();
        assert_eq!(last.day(), Some(29));
        // February 29th 2023 does not exist and rolls over
        assert_eq!(last.date(), Some(ymd(2023, 3, 1)));
    }

    #[test]
    fn test_weeks_chunks_by_seven() {
        let grid = build_gregorian_month(2024, 2);
        let weeks: Vec<&[DayCell]> = grid.weeks().collect();
        assert_eq!(weeks.len(), 5);
        assert!(weeks[..4].iter().all(|w| w.len() == DAYS_PER_WEEK));
        assert_eq!(weeks[4].len(), 5);
    }

    #[test]
    fn test_position_of() {
        let grid = build_gregorian_month(2024, 2);
        assert_eq!(grid.position_of(ymd(2024, 2, 1)), Some(4));
        assert_eq!(grid.position_of(ymd(2024, 3, 1)), None);
    }

    #[test]
    fn test_build_month_dispatch() {
        assert_eq!(
            build_month(CalendarType::Gregorian, 2024, 2),
            build_gregorian_month(2024, 2)
        );
        assert_eq!(build_month(CalendarType::Hijri, 1446, 9), build_hijri_month(1446, 9));
    }
}
