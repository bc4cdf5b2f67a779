//! Side panel with the selected date, its Hijri equivalent and quick actions.

use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::weekday_index;
use crate::locale::{
    format_number, gregorian_month_name, hijri_month_name, marked_count, weekday_full, Text,
};
use crate::session::SessionState;

use super::Theme;

/// Details panel widget
pub struct DetailsPanel;

impl DetailsPanel {
    /// Lines describing the selected Gregorian date.
    #[must_use]
    pub fn selected_lines(session: &SessionState) -> Vec<String> {
        let language = session.language;
        let date = session.selected;
        vec![
            weekday_full(language, weekday_index(date) as usize).to_string(),
            format_number(i64::from(date.day()), language),
            format!(
                "{} {}",
                gregorian_month_name(language, date.month0() as usize),
                format_number(i64::from(date.year()), language)
            ),
        ]
    }

    /// Lines describing the Hijri equivalent of the selection.
    #[must_use]
    pub fn hijri_lines(session: &SessionState) -> Vec<String> {
        let language = session.language;
        let hijri = session.selected_hijri();
        vec![
            format!(
                "{} {}",
                format_number(i64::from(hijri.day), language),
                hijri_month_name(language, hijri.month.saturating_sub(1) as usize)
            ),
            format!(
                "{} {}",
                format_number(i64::from(hijri.year), language),
                Text::EraSuffix.get(language)
            ),
        ]
    }

    /// Render the panel.
    pub fn render(f: &mut Frame, area: Rect, session: &SessionState, theme: &Theme) {
        let language = session.language;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // Selected date
                Constraint::Length(4), // Hijri date
                Constraint::Min(4),    // Quick actions
            ])
            .split(area);

        // Selected date
        let mut title = vec![Span::raw(format!(" {} ", Text::SelectedDate.get(language)))];
        if session.is_today(session.selected) {
            title.push(Span::styled(
                format!("[{}] ", Text::Today.get(language)),
                Style::default().fg(theme.today).add_modifier(Modifier::BOLD),
            ));
        }

        let selected = Self::selected_lines(session);
        let mut lines: Vec<Line> = vec![
            Line::styled(
                selected[0].clone(),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                selected[1].clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Line::styled(selected[2].clone(), Style::default().fg(theme.text_secondary)),
        ];
        let (mark_label, mark_color) = if session.is_selected_marked() {
            (Text::UnmarkDate.get(language), theme.marked)
        } else {
            (Text::MarkDate.get(language), theme.accent)
        };
        lines.push(Line::from(vec![
            Span::styled("[m] ", Style::default().fg(theme.text_muted)),
            Span::styled(mark_label, Style::default().fg(mark_color)),
        ]));

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(panel_block(Line::from(title), theme)),
            chunks[0],
        );

        // Hijri date
        let hijri: Vec<Line> = Self::hijri_lines(session)
            .into_iter()
            .map(|l| Line::styled(l, Style::default().fg(theme.success).add_modifier(Modifier::BOLD)))
            .collect();
        f.render_widget(
            Paragraph::new(hijri)
                .alignment(Alignment::Center)
                .block(panel_block(
                    Line::from(format!(" {} ", Text::HijriDate.get(language))),
                    theme,
                )),
            chunks[1],
        );

        // Quick actions
        let mut actions = vec![Line::from(vec![
            Span::styled("[t] ", Style::default().fg(theme.text_muted)),
            Span::styled(Text::GoToToday.get(language), Style::default().fg(theme.accent)),
        ])];
        actions.push(Line::from(vec![
            Span::styled("[y] ", Style::default().fg(theme.text_muted)),
            Span::styled(Text::SelectYear.get(language), Style::default().fg(theme.accent)),
        ]));
        if !session.marked.is_empty() {
            actions.push(Line::from(""));
            actions.push(Line::styled(
                marked_count(session.marked.len(), language),
                Style::default().fg(theme.marked).add_modifier(Modifier::BOLD),
            ));
        }
        f.render_widget(
            Paragraph::new(actions)
                .alignment(Alignment::Center)
                .block(panel_block(
                    Line::from(format!(" {} ", Text::QuickActions.get(language))),
                    theme,
                )),
            chunks[2],
        );
    }
}

fn panel_block<'a>(title: Line<'a>, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background))
}
