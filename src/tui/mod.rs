//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod calendar_view;
pub mod component;
pub mod details_panel;
pub mod handlers;
pub mod help_overlay;
pub mod status_bar;
pub mod theme;
pub mod year_picker;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, NaiveTime};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::calendar::MonthGrid;
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::locale::{format_clock, Text};
use crate::session::{SessionEvent, SessionState};
use crate::shortcuts::ShortcutRegistry;
use crate::storage::{apply_effects, KeyValueStore};

pub use calendar_view::CalendarView;
pub use component::Component;
pub use details_panel::DetailsPanel;
pub use help_overlay::HelpOverlay;
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use year_picker::YearPicker;

/// Width of the details panel.
const DETAILS_WIDTH: u16 = 34;

/// Popup types that can be displayed over the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Year picker popup
    YearPicker,
    /// Help overlay popup
    HelpOverlay,
}

/// Active component - holds the currently active popup component
///
/// Only one component can be active at a time.
#[derive(Debug)]
pub enum ActiveComponent {
    /// Year picker component
    YearPicker(YearPicker),
    /// Help overlay component
    HelpOverlay(HelpOverlay),
}

/// Application state - single source of truth
///
/// All UI components read from this state immutably.
/// Only event handlers modify state explicitly.
pub struct AppState {
    // Core data
    /// Calendar session (anchor, selection, marks, language)
    pub session: SessionState,
    /// Grid for the displayed month, rebuilt after every transition
    pub grid: MonthGrid,
    /// Persisted state backend
    pub store: Box<dyn KeyValueStore>,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Currently active component (if any)
    pub active_component: Option<ActiveComponent>,
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,
    /// Wall-clock time shown in the title bar
    pub clock: NaiveTime,
    /// Keyboard shortcuts
    pub registry: ShortcutRegistry,

    // System resources
    /// Application configuration
    pub config: Config,
    /// Where theme changes are saved; `None` keeps them in memory
    pub config_path: Option<PathBuf>,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state around a restored session.
    #[must_use]
    pub fn new(session: SessionState, store: Box<dyn KeyValueStore>, config: Config) -> Self {
        let grid = session.grid();
        Self {
            session,
            grid,
            store,
            theme: Theme::from_mode(config.ui.theme_mode),
            active_popup: None,
            active_component: None,
            status_message: String::new(),
            error_message: None,
            clock: Local::now().time(),
            registry: ShortcutRegistry::new(),
            config,
            config_path: None,
            should_quit: false,
        }
    }

    /// Runs a session transition and persists whatever it changed.
    pub fn apply(&mut self, event: SessionEvent) {
        let (session, effects) = self.session.clone().update(event);
        self.session = session;

        let failures = apply_effects(self.store.as_mut(), &effects);
        if failures > 0 {
            warn!("{failures} state write(s) failed");
        }

        self.recompute_grid();
    }

    /// Rebuilds the displayed grid from the session anchor.
    pub fn recompute_grid(&mut self) {
        self.grid = self.session.grid();
    }

    /// Updates the clock and rolls `today` over at midnight.
    pub fn tick(&mut self, now: NaiveDateTime) {
        self.clock = now.time();
        if now.date() != self.session.today {
            info!("Day changed to {}", now.date());
            self.apply(SessionEvent::Tick(now.date()));
        }
    }

    /// Saves the configuration if a config path is known.
    pub fn save_config(&mut self) {
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                warn!("Failed to save config: {e:#}");
                self.set_error(format!("Failed to save config: {e:#}"));
            }
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Open the year picker on the displayed year
    pub fn open_year_picker(&mut self) {
        let (year, _) = self.session.display_year_month();
        let picker = YearPicker::new(self.session.year_options(), year, self.session.language);
        self.active_component = Some(ActiveComponent::YearPicker(picker));
        self.active_popup = Some(PopupType::YearPicker);
    }

    /// Open the help overlay component
    pub fn open_help_overlay(&mut self) {
        let help = HelpOverlay::new(&self.registry);
        self.active_component = Some(ActiveComponent::HelpOverlay(help));
        self.active_popup = Some(PopupType::HelpOverlay);
    }

    /// Close the currently active component
    pub fn close_component(&mut self) {
        self.active_component = None;
        self.active_popup = None;
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        state.tick(Local::now().naive_local());

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                // Resize and release events re-render on the next loop
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    debug!("Leaving event loop");
    Ok(())
}

/// Render the UI from current state
pub fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(4), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    if let Some(popup_type) = state.active_popup {
        render_popup(f, popup_type, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with app name and clock
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let language = state.session.language;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Line::from(vec![
        Span::styled(
            format!(" {APP_NAME} "),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            Text::Subtitle.get(language),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    let clock = if state.config.ui.show_clock {
        format!("{} ", format_clock(state.clock, language))
    } else {
        String::new()
    };

    let (title_alignment, clock_alignment) = if language.is_rtl() {
        (Alignment::Right, Alignment::Left)
    } else {
        (Alignment::Left, Alignment::Right)
    };
    f.render_widget(Paragraph::new(title).alignment(title_alignment), inner);
    f.render_widget(
        Paragraph::new(clock)
            .alignment(clock_alignment)
            .style(Style::default().fg(theme.accent)),
        inner,
    );
}

/// Render main content: calendar grid and details panel
fn render_main_content(f: &mut Frame, area: Rect, state: &AppState) {
    let rtl = state.session.language.is_rtl();
    let constraints = if rtl {
        [Constraint::Length(DETAILS_WIDTH), Constraint::Min(30)]
    } else {
        [Constraint::Min(30), Constraint::Length(DETAILS_WIDTH)]
    };
    let chunks = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let (calendar_area, details_area) = if rtl {
        (chunks[1], chunks[0])
    } else {
        (chunks[0], chunks[1])
    };

    CalendarView::render(f, calendar_area, &state.session, &state.grid, &state.theme);
    DetailsPanel::render(f, details_area, &state.session, &state.theme);
}

/// Render active popup
fn render_popup(f: &mut Frame, popup_type: PopupType, state: &AppState) {
    match (popup_type, &state.active_component) {
        (PopupType::YearPicker, Some(ActiveComponent::YearPicker(picker))) => {
            picker.render(f, f.area(), &state.theme);
        }
        (PopupType::HelpOverlay, Some(ActiveComponent::HelpOverlay(help))) => {
            help.render(f, f.area(), &state.theme);
        }
        _ => {}
    }
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);

    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    // Split into title and message
    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(3), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ])])
    .style(Style::default().fg(theme.text).bg(theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
pub fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    // Route to popup handler if popup is active
    if state.active_popup.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    handlers::handle_main_input(state, key)
}
