//! CLI command handlers for Timelyo.
//!
//! Headless, scriptable access to the date conversion, month grid and marked
//! dates, for automation and testing.

pub mod common;
pub mod convert;
pub mod marks;
pub mod month;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use convert::ConvertArgs;
pub use marks::MarksArgs;
pub use month::MonthArgs;
