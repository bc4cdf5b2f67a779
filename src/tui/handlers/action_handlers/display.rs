// Display toggle handlers

use crate::session::SessionEvent;
use crate::tui::{AppState, Theme};
use anyhow::Result;

/// Handle toggle calendar action
pub fn handle_toggle_calendar(state: &mut AppState) -> Result<bool> {
    let calendar = state.session.calendar.toggled();
    state.apply(SessionEvent::SetCalendar(calendar));
    state.set_status(format!("Calendar: {calendar}"));
    Ok(false)
}

/// Handle toggle language action
pub fn handle_toggle_language(state: &mut AppState) -> Result<bool> {
    let language = state.session.language.toggled();
    state.apply(SessionEvent::SetLanguage(language));
    state.set_status(format!("Language: {}", language.native_name()));
    Ok(false)
}

/// Handle toggle theme action
///
/// Switches to an explicit dark or light mode and saves it to the config.
pub fn handle_toggle_theme(state: &mut AppState) -> Result<bool> {
    let variant = state.theme.variant().toggled();
    state.theme = Theme::from_variant(variant);
    state.config.ui.theme_mode = variant.as_mode();
    state.set_status(format!("Theme: {variant:?}"));
    state.save_config();
    Ok(false)
}
