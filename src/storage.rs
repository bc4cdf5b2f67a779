//! Persisted session state.
//!
//! State is kept in an opaque string key/value store, one entry per value:
//! the marked-date set (a JSON array of `YYYY-MM-DD` keys), the language code
//! and the calendar type. Entries are read once at startup and each one is
//! written back whenever its in-memory value changes.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::calendar::{date_key, CalendarType};
use crate::constants::{KEY_CALENDAR_TYPE, KEY_LANGUAGE, KEY_MARKED_DATES};
use crate::locale::Language;
use crate::session::{Effect, PersistedEntry};

/// String key/value store backing persisted state.
pub trait KeyValueStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, used by tests and as a fallback when no file is usable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store kept as a JSON object of strings in a single file.
///
/// The whole file is read when the store is opened and rewritten on every
/// change using a temp file + rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store. A file that cannot be parsed is
    /// logged and treated as empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            debug!("State file {} not found, starting empty", path.display());
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .context(format!("Failed to read state file: {}", path.display()))?;

        let entries = match serde_json::from_str::<BTreeMap<String, String>>(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring malformed state file {}: {e}", path.display());
                BTreeMap::new()
            }
        };

        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context(format!(
                    "Failed to create state directory: {}",
                    parent.display()
                ))?;
            }
        }

        let content =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize state")?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp state file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp state file to: {}",
            self.path.display()
        ))?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Set of marked dates, keyed by canonical `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkedDates(BTreeSet<String>);

impl MarkedDates {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the persisted JSON array form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse marked dates")
    }

    /// Serializes to the persisted JSON array form.
    #[must_use]
    pub fn to_json(&self) -> String {
        // A set of strings always serializes
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// Whether `date` is marked.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date_key(date))
    }

    /// Marks `date` if unmarked, unmarks it otherwise. Returns the new state.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        let key = date_key(date);
        if self.0.remove(&key) {
            false
        } else {
            self.0.insert(key);
            true
        }
    }

    /// Number of marked dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Marked keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for MarkedDates {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Values restored from the store at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Marked dates
    pub marked: MarkedDates,
    /// Display language
    pub language: Language,
    /// Calendar shown in the grid
    pub calendar: CalendarType,
}

impl Preferences {
    /// Reads all entries from `store`.
    ///
    /// Missing or unreadable entries fall back to defaults: an empty marked
    /// set, English and the Gregorian calendar.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let marked = store
            .get(KEY_MARKED_DATES)
            .map(|raw| {
                MarkedDates::from_json(&raw).unwrap_or_else(|e| {
                    warn!("Discarding stored marked dates: {e:#}");
                    MarkedDates::new()
                })
            })
            .unwrap_or_default();

        let language = store
            .get(KEY_LANGUAGE)
            .and_then(|raw| {
                raw.parse()
                    .map_err(|e| warn!("Ignoring stored language: {e}"))
                    .ok()
            })
            .unwrap_or_default();

        let calendar = store
            .get(KEY_CALENDAR_TYPE)
            .and_then(|raw| {
                raw.parse()
                    .map_err(|e| warn!("Ignoring stored calendar type: {e}"))
                    .ok()
            })
            .unwrap_or_default();

        Self {
            marked,
            language,
            calendar,
        }
    }
}

/// Writes a single entry to the store.
pub fn persist(store: &mut dyn KeyValueStore, entry: &PersistedEntry) -> Result<()> {
    match entry {
        PersistedEntry::MarkedDates(marked) => store.set(KEY_MARKED_DATES, &marked.to_json()),
        PersistedEntry::Language(language) => store.set(KEY_LANGUAGE, language.code()),
        PersistedEntry::Calendar(calendar) => store.set(KEY_CALENDAR_TYPE, calendar.as_str()),
    }
}

/// Applies persistence effects, best effort.
///
/// A failed write is logged and otherwise ignored. Returns how many writes
/// failed.
pub fn apply_effects(store: &mut dyn KeyValueStore, effects: &[Effect]) -> usize {
    let mut failures = 0;
    for effect in effects {
        let Effect::Persist(entry) = effect;
        if let Err(e) = persist(store, entry) {
            warn!("Failed to persist {}: {e:#}", entry.key());
            failures += 1;
        } else {
            debug!("Persisted {}", entry.key());
        }
    }
    failures
}
