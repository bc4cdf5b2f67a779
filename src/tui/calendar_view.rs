//! Month grid widget.
//!
//! Draws the displayed month as seven weekday columns, Sunday first. In
//! Arabic the columns are mirrored so the week reads right to left.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{CalendarType, DayCell, MonthGrid, DAYS_PER_WEEK};
use crate::locale::{
    format_number, gregorian_month_name, hijri_month_name, weekdays_short, Language, Text,
};
use crate::session::SessionState;

use super::Theme;

/// Marker drawn next to marked days.
const MARK: &str = "★";

/// Calendar widget
pub struct CalendarView;

impl CalendarView {
    /// Title for a grid, e.g. `Ramadan 1446 AH` or `March 2024`.
    #[must_use]
    pub fn title(grid: &MonthGrid, language: Language) -> String {
        let month0 = grid.month.saturating_sub(1) as usize;
        let year = format_number(i64::from(grid.year), language);
        match grid.calendar {
            CalendarType::Gregorian => {
                format!("{} {year}", gregorian_month_name(language, month0))
            }
            CalendarType::Hijri => format!(
                "{} {year} {}",
                hijri_month_name(language, month0),
                Text::EraSuffix.get(language)
            ),
        }
    }

    /// Splits the grid into rows of exactly seven cells in display order.
    ///
    /// The final week is padded with blanks. RTL languages reverse each row.
    #[must_use]
    pub fn display_rows(grid: &MonthGrid, language: Language) -> Vec<Vec<DayCell>> {
        grid.weeks()
            .map(|week| {
                let mut row = week.to_vec();
                row.resize(DAYS_PER_WEEK, DayCell::Blank);
                if language.is_rtl() {
                    row.reverse();
                }
                row
            })
            .collect()
    }

    /// Render the grid for the session's displayed month.
    pub fn render(f: &mut Frame, area: Rect, session: &SessionState, grid: &MonthGrid, theme: &Theme) {
        let language = session.language;
        let calendar_name = match grid.calendar {
            CalendarType::Gregorian => Text::Gregorian.get(language),
            CalendarType::Hijri => Text::Hijri.get(language),
        };

        let block = Block::default()
            .title(format!(" {} ", Self::title(grid, language)))
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(format!(" {calendar_name} ")).centered())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cell_width = (inner.width as usize / DAYS_PER_WEEK).max(3);

        let mut header: Vec<Span> = weekdays_short(language)
            .iter()
            .map(|name| {
                Span::styled(
                    centered(name, cell_width),
                    Style::default()
                        .fg(theme.weekday)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        if language.is_rtl() {
            header.reverse();
        }

        let mut lines = vec![Line::from(header), Line::from("")];
        for row in Self::display_rows(grid, language) {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| Self::cell_span(cell, session, theme, cell_width))
                .collect();
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn cell_span<'a>(
        cell: &DayCell,
        session: &SessionState,
        theme: &Theme,
        width: usize,
    ) -> Span<'a> {
        let DayCell::Day { day, date } = *cell else {
            return Span::raw(" ".repeat(width));
        };

        let marked = session.marked.contains(date);
        let mut label = format_number(i64::from(day), session.language);
        if marked {
            label.push_str(MARK);
        }

        let mut style = Style::default().fg(theme.text);
        if marked {
            style = style.fg(theme.marked);
        }
        if session.is_today(date) {
            style = style
                .fg(theme.today)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if date == session.selected {
            style = style
                .bg(theme.highlight_bg)
                .fg(theme.text)
                .add_modifier(Modifier::BOLD);
        }

        Span::styled(centered(&label, width), style)
    }
}

fn centered(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{build_gregorian_month, build_hijri_month};
    use crate::storage::Preferences;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_titles() {
        let grid = build_gregorian_month(2024, 3);
        assert_eq!(CalendarView::title(&grid, Language::En), "March 2024");
        assert_eq!(CalendarView::title(&grid, Language::Ar), "مارس ٢٠٢٤");

        let grid = build_hijri_month(1446, 9);
        assert_eq!(CalendarView::title(&grid, Language::En), "Ramadan 1446 AH");
    }

    #[test]
    fn test_display_rows_pad_last_week() {
        let grid = build_gregorian_month(2024, 2);
        let rows = CalendarView::display_rows(&grid, Language::En);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.len() == DAYS_PER_WEEK));
        assert_eq!(rows[0][4].day(), Some(1));
        assert!(rows[4][6].is_blank());
    }

    #[test]
    fn test_display_rows_mirror_for_arabic() {
        let grid = build_gregorian_month(2024, 2);
        let ltr = CalendarView::display_rows(&grid, Language::En);
        let rtl = CalendarView::display_rows(&grid, Language::Ar);
        for (l, r) in ltr.iter().zip(&rtl) {
            let mut reversed = l.clone();
            reversed.reverse();
            assert_eq!(&reversed, r);
        }
        // Thursday the 1st sits in the fifth column from the right
        assert_eq!(rtl[0][2].day(), Some(1));
    }

    #[test]
    fn test_render_marks_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut session = SessionState::new(today, Preferences::default());
        session.marked.toggle(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        let grid = session.grid();

        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal
            .draw(|f| CalendarView::render(f, f.area(), &session, &grid, &Theme::dark()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("March 2024"));
        assert!(text.contains("Sun"));
        assert!(text.contains("20★"));
        assert!(text.contains("Gregorian"));
    }
}
