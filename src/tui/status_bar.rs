//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::locale::Text;
use crate::shortcuts::{Action, MAIN_CONTEXT};

use super::{AppState, PopupType, Theme};

/// Actions hinted on the help line, in order.
const HINTED: [Action; 5] = [
    Action::NextDay,
    Action::NextMonth,
    Action::ToggleMark,
    Action::ToggleCalendar,
    Action::OpenYearPicker,
];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        // First line: error, status message, or nothing
        let message_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.as_str()),
            ])
        } else if state.status_message.is_empty() {
            Line::from("")
        } else {
            Line::from(state.status_message.as_str())
        };

        let status = Paragraph::new(vec![message_line, Self::help_line(state, theme)])
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .title_bottom(
                        Line::from(format!(" {} ", Text::Tagline.get(state.session.language)))
                            .alignment(Alignment::Right),
                    )
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Bottom help line for the current context.
    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let key_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        let mut spans: Vec<Span<'static>> =
            vec![Span::styled("Help: ", Style::default().fg(theme.primary))];

        let hints: Vec<(String, String)> = match state.active_popup {
            Some(PopupType::YearPicker) => vec![
                ("←↑↓→".to_string(), "Move".to_string()),
                ("Enter".to_string(), "Select".to_string()),
                ("Esc".to_string(), "Cancel".to_string()),
            ],
            Some(PopupType::HelpOverlay) => vec![
                ("↑↓".to_string(), "Scroll".to_string()),
                ("Esc".to_string(), "Close".to_string()),
            ],
            None => HINTED
                .iter()
                .map(|action| {
                    (
                        state.registry.keys_for(MAIN_CONTEXT, *action).join(","),
                        action.description().to_string(),
                    )
                })
                .chain(std::iter::once(("?".to_string(), "Help".to_string())))
                .collect(),
        };

        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(key, key_style));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(action));
        }

        Line::from(spans)
    }
}
