//! Year picker popup.
//!
//! Shows the offered years as a four-column grid with the displayed year
//! highlighted. Enter jumps to the year under the cursor.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::locale::{format_number, Language, Text};
use crate::tui::{centered_rect, Component, Theme};

/// Years per grid row.
pub const COLUMNS: usize = 4;

/// Events emitted by the year picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearPickerEvent {
    /// User picked a year
    Selected(i32),
    /// User closed the picker
    Cancelled,
}

/// Year picker component state
#[derive(Debug, Clone)]
pub struct YearPicker {
    years: Vec<i32>,
    current: i32,
    cursor: usize,
    language: Language,
}

impl YearPicker {
    /// Creates a picker over `years` with the cursor on `current`.
    ///
    /// If `current` is not offered the cursor starts on the first year.
    #[must_use]
    pub fn new(years: Vec<i32>, current: i32, language: Language) -> Self {
        let cursor = years.iter().position(|y| *y == current).unwrap_or(0);
        Self {
            years,
            current,
            cursor,
            language,
        }
    }

    /// Year under the cursor.
    #[must_use]
    pub fn highlighted(&self) -> Option<i32> {
        self.years.get(self.cursor).copied()
    }

    fn move_by(&mut self, delta: isize) {
        if self.years.is_empty() {
            return;
        }
        let last = self.years.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    fn rows(&self) -> usize {
        self.years.len().div_ceil(COLUMNS)
    }
}

impl Component for YearPicker {
    type Event = YearPickerEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        // Arabic grids run right to left, so horizontal keys flip
        let step: isize = if self.language.is_rtl() { -1 } else { 1 };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_by(-step),
            KeyCode::Right | KeyCode::Char('l') => self.move_by(step),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-(COLUMNS as isize)),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(COLUMNS as isize),
            KeyCode::PageUp => self.move_by(-(COLUMNS as isize) * 5),
            KeyCode::PageDown => self.move_by(COLUMNS as isize * 5),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.years.len().saturating_sub(1),
            KeyCode::Enter => return self.highlighted().map(YearPickerEvent::Selected),
            KeyCode::Esc | KeyCode::Char('q' | 'y') => return Some(YearPickerEvent::Cancelled),
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let area = centered_rect(50, 60, area);
        f.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", Text::SelectYear.get(self.language)))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let visible = chunks[0].height as usize;
        let cursor_row = self.cursor / COLUMNS;
        let top = cursor_row
            .saturating_sub(visible / 2)
            .min(self.rows().saturating_sub(visible));
        let cell_width = (chunks[0].width as usize / COLUMNS).max(1);

        let lines: Vec<Line> = self
            .years
            .chunks(COLUMNS)
            .enumerate()
            .skip(top)
            .take(visible)
            .map(|(row, years)| {
                let mut spans: Vec<Span> = years
                    .iter()
                    .enumerate()
                    .map(|(col, year)| {
                        let index = row * COLUMNS + col;
                        let mut style = Style::default().fg(theme.text);
                        if *year == self.current {
                            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
                        }
                        if index == self.cursor {
                            style = style.bg(theme.highlight_bg).add_modifier(Modifier::BOLD);
                        }
                        let label = format_number(i64::from(*year), self.language);
                        Span::styled(format!("{label:^cell_width$}"), style)
                    })
                    .collect();
                if self.language.is_rtl() {
                    spans.reverse();
                }
                Line::from(spans)
            })
            .collect();

        let alignment = if self.language.is_rtl() {
            Alignment::Right
        } else {
            Alignment::Left
        };
        f.render_widget(Paragraph::new(lines).alignment(alignment), chunks[0]);

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" Select  "),
            Span::styled("Esc", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]);
        f.render_widget(
            Paragraph::new(help)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.text_muted)),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn picker() -> YearPicker {
        YearPicker::new((1924..=2034).collect(), 2024, Language::En)
    }

    #[test]
    fn test_cursor_starts_on_current_year() {
        assert_eq!(picker().highlighted(), Some(2024));
        let missing = YearPicker::new(vec![1, 2, 3], 9, Language::En);
        assert_eq!(missing.highlighted(), Some(1));
    }

    #[test]
    fn test_grid_navigation() {
        let mut picker = picker();
        picker.handle_input(key(KeyCode::Down));
        assert_eq!(picker.highlighted(), Some(2028));
        picker.handle_input(key(KeyCode::Left));
        assert_eq!(picker.highlighted(), Some(2027));
        picker.handle_input(key(KeyCode::Char('k')));
        assert_eq!(picker.highlighted(), Some(2023));
    }

    #[test]
    fn test_navigation_clamps_to_bounds() {
        let mut picker = picker();
        picker.handle_input(key(KeyCode::Home));
        picker.handle_input(key(KeyCode::Up));
        assert_eq!(picker.highlighted(), Some(1924));
        picker.handle_input(key(KeyCode::End));
        picker.handle_input(key(KeyCode::PageDown));
        assert_eq!(picker.highlighted(), Some(2034));
    }

    #[test]
    fn test_rtl_flips_horizontal_keys() {
        let mut picker = YearPicker::new((1345..=1455).collect(), 1445, Language::Ar);
        picker.handle_input(key(KeyCode::Left));
        assert_eq!(picker.highlighted(), Some(1446));
    }

    #[test]
    fn test_enter_selects_and_esc_cancels() {
        let mut picker = picker();
        picker.handle_input(key(KeyCode::Right));
        assert_eq!(
            picker.handle_input(key(KeyCode::Enter)),
            Some(YearPickerEvent::Selected(2025))
        );
        assert_eq!(
            picker.handle_input(key(KeyCode::Esc)),
            Some(YearPickerEvent::Cancelled)
        );
    }

    #[test]
    fn test_render_shows_years() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let picker = picker();
        terminal
            .draw(|f| picker.render(f, f.area(), &Theme::dark()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Select Year"));
        assert!(text.contains("2024"));
    }
}
