//! Help overlay listing every keyboard shortcut.
//!
//! Content is generated from the shortcut registry so the overlay cannot
//! drift from the actual bindings.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use crate::constants::APP_NAME;
use crate::shortcuts::{Action, ShortcutRegistry, MAIN_CONTEXT};

use super::{Component, Theme};

/// Width of the key column.
const KEY_COLUMN: usize = 22;

/// Help sections and the actions they list.
const SECTIONS: [(&str, &[Action]); 5] = [
    (
        "SELECTION",
        &[
            Action::PreviousDay,
            Action::NextDay,
            Action::PreviousWeek,
            Action::NextWeek,
        ],
    ),
    (
        "MONTHS & YEARS",
        &[
            Action::PreviousMonth,
            Action::NextMonth,
            Action::OpenYearPicker,
            Action::GoToToday,
        ],
    ),
    ("MARKING", &[Action::ToggleMark]),
    (
        "DISPLAY",
        &[
            Action::ToggleCalendar,
            Action::ToggleLanguage,
            Action::ToggleTheme,
        ],
    ),
    ("GENERAL", &[Action::ToggleHelp, Action::Cancel, Action::Quit]),
];

/// Events emitted by the help overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpOverlayEvent {
    /// User closed the overlay
    Closed,
}

/// Help overlay component.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    /// Key/description pairs grouped by section
    sections: Vec<(&'static str, Vec<(String, &'static str)>)>,
}

impl HelpOverlay {
    /// Creates the overlay from the registry's current bindings.
    #[must_use]
    pub fn new(registry: &ShortcutRegistry) -> Self {
        let sections = SECTIONS
            .iter()
            .map(|(title, actions)| {
                let rows = actions
                    .iter()
                    .map(|action| {
                        (
                            registry.keys_for(MAIN_CONTEXT, *action).join(" / "),
                            action.description(),
                        )
                    })
                    .collect();
                (*title, rows)
            })
            .collect();

        Self {
            scroll_offset: 0,
            sections,
        }
    }

    /// Number of content lines.
    #[must_use]
    pub fn total_lines(&self) -> usize {
        // Header (2) plus, per section, a title, its rows and a blank line
        2 + self
            .sections
            .iter()
            .map(|(_, rows)| rows.len() + 2)
            .sum::<usize>()
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines() {
            self.scroll_offset += 1;
        }
    }

    fn content(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{APP_NAME} - Keyboard Shortcuts"),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (title, rows) in &self.sections {
            lines.push(Line::from(Span::styled(
                format!("═══ {title} ═══"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            for (keys, description) in rows {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {keys:<KEY_COLUMN$}"),
                        Style::default().fg(theme.success),
                    ),
                    Span::styled(*description, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines
    }
}

impl Component for HelpOverlay {
    type Event = HelpOverlayEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') => return Some(HelpOverlayEvent::Closed),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home => self.scroll_offset = 0,
            KeyCode::End => self.scroll_offset = self.total_lines().saturating_sub(1),
            _ => {}
        }
        None
    }

    /// Render the help overlay as a centered modal.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // Calculate centered modal size (60% width, 80% height)
        let width = (area.width * 60) / 100;
        let height = (area.height * 80) / 100;
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;

        let modal_area = Rect {
            x: x + area.x,
            y: y + area.y,
            width,
            height,
        };
        frame.render_widget(Clear, modal_area);

        // Create layout for content area and scrollbar
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let visible_height = content_area.height.saturating_sub(2) as usize; // Account for borders
        let paragraph = Paragraph::new(self.content(theme))
            .block(
                Block::default()
                    .title(" Help - press ? or Esc to close ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, content_area);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));

        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines().saturating_sub(visible_height))
                .position(self.scroll_offset);

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}
