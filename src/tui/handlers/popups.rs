//! Popup input handlers.

use anyhow::Result;
use crossterm::event;

use crate::session::SessionEvent;
use crate::tui::help_overlay::HelpOverlayEvent;
use crate::tui::year_picker::YearPickerEvent;
use crate::tui::{ActiveComponent, AppState, Component};

/// Handle input for year picker
fn handle_year_picker_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let Some(ActiveComponent::YearPicker(picker)) = state.active_component.as_mut() else {
        state.close_component();
        return Ok(false);
    };

    match picker.handle_input(key) {
        Some(YearPickerEvent::Selected(year)) => {
            state.close_component();
            state.apply(SessionEvent::SelectYear(year));
            state.set_status(format!("Year {year}"));
        }
        Some(YearPickerEvent::Cancelled) => {
            state.close_component();
            state.set_status("Cancelled");
        }
        None => {}
    }
    Ok(false)
}

/// Handle input for help overlay
fn handle_help_overlay_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let Some(ActiveComponent::HelpOverlay(help)) = state.active_component.as_mut() else {
        state.close_component();
        return Ok(false);
    };

    if let Some(HelpOverlayEvent::Closed) = help.handle_input(key) {
        state.close_component();
        state.set_status("Press ? for help");
    }
    Ok(false)
}

/// Route input to the active popup
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.active_component {
        Some(ActiveComponent::YearPicker(_)) => handle_year_picker_input(state, key),
        Some(ActiveComponent::HelpOverlay(_)) => handle_help_overlay_input(state, key),
        None => {
            state.close_component();
            Ok(false)
        }
    }
}
