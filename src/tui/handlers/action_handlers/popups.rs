// Popup management action handlers

use crate::tui::{AppState, PopupType};
use anyhow::Result;

/// Handle open year picker action
pub fn handle_open_year_picker(state: &mut AppState) -> Result<bool> {
    state.open_year_picker();
    state.set_status("Select Year - Enter: jump, Esc: cancel");
    Ok(false)
}

/// Handle toggle help action
pub fn handle_toggle_help(state: &mut AppState) -> Result<bool> {
    if state.active_popup == Some(PopupType::HelpOverlay) {
        state.close_component();
    } else {
        state.open_help_overlay();
    }
    Ok(false)
}
