// Quit and cancel handlers

use crate::tui::AppState;
use anyhow::Result;

/// Handle quit action
pub fn handle_quit(state: &mut AppState) -> Result<bool> {
    state.should_quit = true;
    Ok(true)
}

/// Handle cancel action (Escape)
pub fn handle_cancel(state: &mut AppState) -> Result<bool> {
    state.status_message.clear();
    state.clear_error();
    Ok(false)
}
