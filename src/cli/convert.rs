//! Date conversion command.

use clap::Args;
use serde::Serialize;

use crate::calendar::{date_key, gregorian_to_hijri, parse_date, HijriDate};
use crate::cli::common::{print_json, CliError, CliResult};

/// Convert a date between the Gregorian and Hijri calendars
#[derive(Debug, Clone, Args)]
#[command(group(
    clap::ArgGroup::new("direction")
        .required(true)
        .args(["to_hijri", "to_gregorian"])
))]
pub struct ConvertArgs {
    /// Gregorian date to convert (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to_hijri: Option<String>,

    /// Hijri date to convert (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to_gregorian: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ConversionResult {
    gregorian: String,
    hijri: HijriDate,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        let result = match (&self.to_hijri, &self.to_gregorian) {
            (Some(input), None) => {
                let date = parse_date(input).map_err(|e| CliError::validation(e.to_string()))?;
                ConversionResult {
                    gregorian: date_key(date),
                    hijri: gregorian_to_hijri(date),
                }
            }
            (None, Some(input)) => {
                let hijri = parse_hijri(input)?;
                ConversionResult {
                    gregorian: date_key(hijri.to_gregorian()),
                    hijri,
                }
            }
            _ => {
                return Err(CliError::validation(
                    "Exactly one of --to-hijri or --to-gregorian is required",
                ))
            }
        };

        if self.json {
            print_json(&result)?;
        } else if self.to_hijri.is_some() {
            println!("{}", result.hijri);
        } else {
            println!("{}", result.gregorian);
        }
        Ok(())
    }
}

/// Parses a Hijri `YYYY-MM-DD` date. Months must be `1..=12`, days `1..=30`.
pub fn parse_hijri(s: &str) -> CliResult<HijriDate> {
    let invalid = || CliError::validation(format!("Invalid Hijri date '{s}' (expected YYYY-MM-DD)"));

    let mut parts = s.trim().splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(CliError::validation(format!(
            "Hijri month must be between 1 and 12, got {month}"
        )));
    }
    if !(1..=30).contains(&day) {
        return Err(CliError::validation(format!(
            "Hijri day must be between 1 and 30, got {day}"
        )));
    }

    Ok(HijriDate::new(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hijri() {
        assert_eq!(parse_hijri("1446-09-01").unwrap(), HijriDate::new(1446, 9, 1));
        // Day 30 of an even month is accepted and rolls over on conversion
        assert_eq!(parse_hijri("1446-02-30").unwrap(), HijriDate::new(1446, 2, 30));
    }

    #[test]
    fn test_parse_hijri_rejects_bad_input() {
        for input in ["1446-13-01", "1446-00-10", "1446-01-31", "1446-01", "abc", "1446-1-x"] {
            let err = parse_hijri(input).unwrap_err();
            assert_eq!(err.exit_code().code(), 1, "{input}");
        }
    }

    #[test]
    fn test_parsed_date_rolls_over() {
        let hijri = parse_hijri("1446-02-29").unwrap();
        assert_eq!(date_key(hijri.to_gregorian()), "2023-03-01");
    }
}
