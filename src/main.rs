//! Timelyo - dual Gregorian/Hijri calendar for the terminal
//!
//! Without a subcommand the interactive calendar is launched. The `convert`,
//! `month` and `marks` subcommands run headless for scripting.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{error::ErrorKind, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use timelyo::calendar::CalendarType;
use timelyo::cli::{CliError, CliResult, ConvertArgs, ExitCode, MarksArgs, MonthArgs};
use timelyo::config::Config;
use timelyo::constants::APP_BINARY_NAME;
use timelyo::locale::Language;
use timelyo::session::{SessionEvent, SessionState};
use timelyo::storage::{JsonFileStore, Preferences};
use timelyo::{logging, tui};

/// Timelyo - dual Gregorian/Hijri calendar for the terminal
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Calendar to show (gregorian or hijri); saved as the new default
    #[arg(long, global = true, value_name = "CALENDAR")]
    calendar: Option<CalendarType>,

    /// Display language (en or ar); saved as the new default
    #[arg(long, global = true, value_name = "LANG")]
    language: Option<Language>,

    /// State file holding marked dates and preferences
    #[arg(long, global = true, value_name = "PATH")]
    state_file: Option<PathBuf>,

    /// Log file used while the calendar UI is running
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a date between calendars
    Convert(ConvertArgs),
    /// Print a month grid
    Month(MonthArgs),
    /// Manage marked dates
    Marks(MarksArgs),
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage errors are bad input like any other validation failure
            let _ = e.print();
            std::process::exit(ExitCode::ValidationError.code());
        }
    };

    if let Some(command) = &cli.command {
        logging::init(cli.verbose);
        if let Err(e) = run_command(&cli, command) {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code().code());
        }
        return Ok(());
    }

    run_calendar(&cli)
}

fn run_command(cli: &Cli, command: &Command) -> CliResult<()> {
    match command {
        Command::Convert(args) => args.execute(),
        Command::Month(args) => args.execute(
            cli.calendar.unwrap_or_default(),
            cli.language.unwrap_or_default(),
        ),
        Command::Marks(args) => {
            let state_file = match &cli.state_file {
                Some(path) => path.clone(),
                None => Config::load()
                    .and_then(|config| config.state_file_path())
                    .map_err(|e| CliError::io(format!("Failed to resolve state file: {e:#}")))?,
            };
            args.execute(&state_file, Local::now().date_naive())
        }
    }
}

/// Launches the interactive calendar.
fn run_calendar(cli: &Cli) -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {e:#}");
        Config::default()
    });

    let log_file = match &cli.log_file {
        Some(path) => path.clone(),
        None => Config::log_file_path()?,
    };
    if let Err(e) = logging::init_file(cli.verbose, &log_file) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let state_file = match &cli.state_file {
        Some(path) => path.clone(),
        None => config.state_file_path()?,
    };
    let store = JsonFileStore::open(&state_file)
        .with_context(|| format!("Failed to open state file: {}", state_file.display()))?;
    let prefs = Preferences::load(&store);
    info!("Loaded state from {}", state_file.display());

    let session = SessionState::new(Local::now().date_naive(), prefs);
    let mut app_state = tui::AppState::new(session, Box::new(store), config);
    match Config::config_file_path() {
        Ok(path) => app_state.config_path = Some(path),
        Err(e) => warn!("Theme changes will not be saved: {e:#}"),
    }

    // Command line overrides replace the stored preferences
    if let Some(calendar) = cli.calendar {
        app_state.apply(SessionEvent::SetCalendar(calendar));
    }
    if let Some(language) = cli.language {
        app_state.apply(SessionEvent::SetLanguage(language));
    }

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    result
}
