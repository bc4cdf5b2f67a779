//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the keys persisted state is stored under.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Timelyo";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "timelyo";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "Timelyo";

/// Storage key for the marked-date set.
pub const KEY_MARKED_DATES: &str = "timelyo-marked-dates";

/// Storage key for the display language.
pub const KEY_LANGUAGE: &str = "timelyo-language";

/// Storage key for the calendar type.
pub const KEY_CALENDAR_TYPE: &str = "timelyo-calendar-type";

/// Years offered before the current year in the year picker.
pub const YEARS_BEFORE: i32 = 100;

/// Years offered after the current year in the year picker.
pub const YEARS_AFTER: i32 = 10;
