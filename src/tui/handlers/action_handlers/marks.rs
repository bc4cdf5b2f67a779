// Marked-date action handlers

use crate::calendar::date_key;
use crate::session::SessionEvent;
use crate::tui::AppState;
use anyhow::Result;

/// Handle toggle mark action
pub fn handle_toggle_mark(state: &mut AppState) -> Result<bool> {
    state.apply(SessionEvent::ToggleMark);
    let key = date_key(state.session.selected);
    if state.session.is_selected_marked() {
        state.set_status(format!("Marked {key}"));
    } else {
        state.set_status(format!("Unmarked {key}"));
    }
    Ok(false)
}
