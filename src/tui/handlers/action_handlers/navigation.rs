// Navigation action handlers

use crate::session::{Direction, SessionEvent};
use crate::tui::AppState;
use anyhow::Result;

/// Move the selection by `cells` grid cells.
///
/// Horizontal moves follow the screen, so they flip when the grid is
/// mirrored for a right-to-left language.
fn move_selection(state: &mut AppState, cells: i32, horizontal: bool) -> Result<bool> {
    let offset = if horizontal && state.session.language.is_rtl() {
        -cells
    } else {
        cells
    };
    state.apply(SessionEvent::MoveSelection(offset));
    state.clear_error();
    Ok(false)
}

/// Handle previous day action
pub fn handle_previous_day(state: &mut AppState) -> Result<bool> {
    move_selection(state, -1, true)
}

/// Handle next day action
pub fn handle_next_day(state: &mut AppState) -> Result<bool> {
    move_selection(state, 1, true)
}

/// Handle previous week action
pub fn handle_previous_week(state: &mut AppState) -> Result<bool> {
    move_selection(state, -7, false)
}

/// Handle next week action
pub fn handle_next_week(state: &mut AppState) -> Result<bool> {
    move_selection(state, 7, false)
}

/// Handle previous month action
pub fn handle_previous_month(state: &mut AppState) -> Result<bool> {
    state.apply(SessionEvent::NavigateMonth(Direction::Prev));
    Ok(false)
}

/// Handle next month action
pub fn handle_next_month(state: &mut AppState) -> Result<bool> {
    state.apply(SessionEvent::NavigateMonth(Direction::Next));
    Ok(false)
}

/// Handle go to today action
pub fn handle_go_to_today(state: &mut AppState) -> Result<bool> {
    state.apply(SessionEvent::GoToToday);
    state.set_status(format!("Today: {}", state.session.today));
    Ok(false)
}
