//! Marked dates commands.

use std::path::Path;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};

use crate::calendar::{date_key, gregorian_to_hijri, parse_date, HijriDate};
use crate::cli::common::{print_json, CliError, CliResult};
use crate::constants::KEY_MARKED_DATES;
use crate::session::{Effect, SessionEvent, SessionState};
use crate::storage::{persist, JsonFileStore, KeyValueStore, MarkedDates, Preferences};

/// List, toggle or clear marked dates
#[derive(Debug, Clone, Args)]
pub struct MarksArgs {
    /// Marks operation to run
    #[command(subcommand)]
    pub command: MarksCommand,
}

/// Marked dates subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum MarksCommand {
    /// List marked dates in ascending order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a date, or unmark it if already marked
    Toggle {
        /// Gregorian date (YYYY-MM-DD)
        #[arg(value_name = "DATE")]
        date: String,
    },
    /// Remove every marked date
    Clear,
}

#[derive(Debug, Serialize)]
struct MarkedEntry {
    date: String,
    hijri: HijriDate,
}

impl MarksArgs {
    /// Execute the marks command against the state file at `state_file`
    pub fn execute(&self, state_file: &Path, today: NaiveDate) -> CliResult<()> {
        let mut store = JsonFileStore::open(state_file)
            .map_err(|e| CliError::io(format!("Failed to open state file: {e:#}")))?;
        let prefs = Preferences::load(&store);

        match &self.command {
            MarksCommand::List { json } => {
                let entries = marked_entries(&prefs.marked);
                if *json {
                    print_json(&entries)?;
                } else {
                    for entry in entries {
                        println!("{}  {}", entry.date, entry.hijri);
                    }
                }
            }
            MarksCommand::Toggle { date } => {
                let date = parse_date(date).map_err(|e| CliError::validation(e.to_string()))?;
                let session = SessionState::new(today, prefs);
                let (session, _) = session.update(SessionEvent::SelectDate(date));
                let (session, effects) = session.update(SessionEvent::ToggleMark);

                for Effect::Persist(entry) in &effects {
                    persist(&mut store, entry)
                        .map_err(|e| CliError::io(format!("Failed to save marked dates: {e:#}")))?;
                }

                let verb = if session.is_selected_marked() {
                    "Marked"
                } else {
                    "Unmarked"
                };
                println!("{verb} {}", date_key(date));
            }
            MarksCommand::Clear => {
                let count = prefs.marked.len();
                store
                    .remove(KEY_MARKED_DATES)
                    .map_err(|e| CliError::io(format!("Failed to save marked dates: {e:#}")))?;
                debug!("Cleared {count} marked dates");
                println!("Cleared {count} marked dates");
            }
        }
        Ok(())
    }
}

fn marked_entries(marked: &MarkedDates) -> Vec<MarkedEntry> {
    marked
        .iter()
        .filter_map(|key| match parse_date(key) {
            Ok(date) => Some(MarkedEntry {
                date: key.to_string(),
                hijri: gregorian_to_hijri(date),
            }),
            Err(e) => {
                warn!("Skipping unreadable marked date: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn toggle(date: &str) -> MarksArgs {
        MarksArgs {
            command: MarksCommand::Toggle {
                date: date.to_string(),
            },
        }
    }

    #[test]
    fn test_toggle_twice_restores_empty_set() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        toggle("2024-03-20").execute(&path, today()).unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.get(KEY_MARKED_DATES).as_deref(),
            Some(r#"["2024-03-20"]"#)
        );

        toggle("2024-03-20").execute(&path, today()).unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(KEY_MARKED_DATES).as_deref(), Some("[]"));
    }

    #[test]
    fn test_toggle_rejects_bad_date() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        let err = toggle("2024-02-30").execute(&path, today()).unwrap_err();
        assert_eq!(err.exit_code().code(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn test_marked_entries_skip_garbage() {
        let marked: MarkedDates = ["2024-03-15".to_string(), "garbage".to_string()]
            .into_iter()
            .collect();
        let entries = marked_entries(&marked);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hijri, HijriDate::new(1445, 2, 14));
    }
}
