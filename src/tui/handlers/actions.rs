//! Action dispatch from shortcuts to handlers.

use anyhow::Result;
use tracing::trace;

use crate::shortcuts::Action;
use crate::tui::AppState;

use super::action_handlers::{display, general, marks, navigation, popups};

/// Dispatch action to appropriate handler
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    trace!(action = action.id(), "dispatch");
    match action {
        // Selection (4 actions)
        Action::PreviousDay => navigation::handle_previous_day(state),
        Action::NextDay => navigation::handle_next_day(state),
        Action::PreviousWeek => navigation::handle_previous_week(state),
        Action::NextWeek => navigation::handle_next_week(state),

        // Months & years (4 actions)
        Action::PreviousMonth => navigation::handle_previous_month(state),
        Action::NextMonth => navigation::handle_next_month(state),
        Action::OpenYearPicker => popups::handle_open_year_picker(state),
        Action::GoToToday => navigation::handle_go_to_today(state),

        // Marking
        Action::ToggleMark => marks::handle_toggle_mark(state),

        // Display (3 actions)
        Action::ToggleCalendar => display::handle_toggle_calendar(state),
        Action::ToggleLanguage => display::handle_toggle_language(state),
        Action::ToggleTheme => display::handle_toggle_theme(state),

        // Help
        Action::ToggleHelp => popups::handle_toggle_help(state),

        // General
        Action::Quit => general::handle_quit(state),
        Action::Cancel => general::handle_cancel(state),
    }
}
