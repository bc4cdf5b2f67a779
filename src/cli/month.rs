//! Month grid command.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use crate::calendar::{build_month, CalendarType, DayCell, MonthGrid};
use crate::cli::common::{print_json, CliError, CliResult};
use crate::locale::{format_number, weekdays_short, Language};
use crate::tui::CalendarView;

/// Width of one printed grid column.
const CELL_WIDTH: usize = 5;

/// Print the grid for one month
#[derive(Debug, Clone, Args)]
pub struct MonthArgs {
    /// Year in the selected calendar
    #[arg(value_name = "YEAR", allow_negative_numbers = true)]
    pub year: i32,

    /// Month number (1-12)
    #[arg(value_name = "MONTH")]
    pub month: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct MonthOutput<'a> {
    title: String,
    #[serde(flatten)]
    grid: &'a MonthGrid,
}

impl MonthArgs {
    /// Execute the month command
    pub fn execute(&self, calendar: CalendarType, language: Language) -> CliResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(CliError::validation(format!(
                "Month must be between 1 and 12, got {}",
                self.month
            )));
        }

        if calendar == CalendarType::Gregorian
            && NaiveDate::from_ymd_opt(self.year, self.month, 1).is_none()
        {
            return Err(CliError::validation(format!(
                "Year {} is outside the supported range",
                self.year
            )));
        }

        let grid = build_month(calendar, self.year, self.month);

        if self.json {
            print_json(&MonthOutput {
                title: CalendarView::title(&grid, language),
                grid: &grid,
            })?;
        } else {
            for line in render_text(&grid, language) {
                println!("{}", line.trim_end());
            }
        }
        Ok(())
    }
}

/// Plain-text rendition: title, weekday header, one line per week.
pub fn render_text(grid: &MonthGrid, language: Language) -> Vec<String> {
    let mut header: Vec<&str> = weekdays_short(language).to_vec();
    if language.is_rtl() {
        header.reverse();
    }

    let mut lines = vec![
        CalendarView::title(grid, language),
        header
            .iter()
            .map(|name| format!("{name:>CELL_WIDTH$}"))
            .collect(),
    ];

    for row in CalendarView::display_rows(grid, language) {
        lines.push(
            row.iter()
                .map(|cell| match cell {
                    DayCell::Blank => " ".repeat(CELL_WIDTH),
                    DayCell::Day { day, .. } => {
                        format!("{:>CELL_WIDTH$}", format_number(i64::from(*day), language))
                    }
                })
                .collect(),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_gregorian_month;

    #[test]
    fn test_render_text_february_2024() {
        let lines = render_text(&build_gregorian_month(2024, 2), Language::En);
        assert_eq!(lines[0], "February 2024");
        assert_eq!(lines[1], "  Sun  Mon  Tue  Wed  Thu  Fri  Sat");
        // Thursday the 1st
        assert_eq!(lines[2].trim_end(), "                        1    2    3");
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[6].trim().ends_with("29"));
    }

    #[test]
    fn test_render_text_arabic_is_mirrored() {
        let lines = render_text(&build_gregorian_month(2024, 2), Language::Ar);
        assert_eq!(lines[0], "فبراير ٢٠٢٤");
        // Saturday comes first on a mirrored row, the 1st is fifth from the left
        assert!(lines[2].starts_with("    ٣    ٢    ١"));
    }

    #[test]
    fn test_execute_rejects_bad_month() {
        let args = MonthArgs {
            year: 2024,
            month: 13,
            json: false,
        };
        let err = args
            .execute(CalendarType::Gregorian, Language::En)
            .unwrap_err();
        assert_eq!(err.exit_code().code(), 1);
    }

    #[test]
    fn test_execute_rejects_unrepresentable_gregorian_year() {
        let args = MonthArgs {
            year: 262_143,
            month: 1,
            json: false,
        };
        let err = args
            .execute(CalendarType::Gregorian, Language::En)
            .unwrap_err();
        assert_eq!(err.exit_code().code(), 1);
    }
}
