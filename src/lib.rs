//! Timelyo library
//!
//! Dual Gregorian/Hijri calendar: approximate date conversion, month grid
//! layout, English/Arabic localization, marked-date persistence and the
//! terminal UI built on top of them.

// Module declarations
pub mod calendar;
pub mod cli;
pub mod config;
pub mod constants;
pub mod locale;
pub mod logging;
pub mod session;
pub mod shortcuts;
pub mod storage;
pub mod tui;
