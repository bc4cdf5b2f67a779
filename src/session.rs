//! Session state and its transitions.
//!
//! All calendar navigation, selection and marking goes through
//! [`SessionState::update`], which takes the current state and an event and
//! returns the next state together with the persistence writes the change
//! requires. Nothing here touches storage or the terminal.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calendar::{
    build_month, gregorian_to_hijri, hijri_to_gregorian, rollover_date, CalendarType, HijriDate,
    MonthGrid,
};
use crate::constants::{KEY_CALENDAR_TYPE, KEY_LANGUAGE, KEY_MARKED_DATES, YEARS_AFTER, YEARS_BEFORE};
use crate::locale::Language;
use crate::storage::{MarkedDates, Preferences};

/// Direction of month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Previous month
    Prev,
    /// Next month
    Next,
}

/// User-driven changes to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Show the previous or next month
    NavigateMonth(Direction),
    /// Jump to a year in the active calendar
    SelectYear(i32),
    /// Select a specific date
    SelectDate(NaiveDate),
    /// Move the selection by a number of grid cells (±1 day, ±7 week)
    MoveSelection(i32),
    /// Mark or unmark the selected date
    ToggleMark,
    /// Change the display language
    SetLanguage(Language),
    /// Change the calendar shown in the grid
    SetCalendar(CalendarType),
    /// Show and select today
    GoToToday,
    /// Wall-clock date changed
    Tick(NaiveDate),
}

/// A value that must be written back to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedEntry {
    /// The whole marked-date set
    MarkedDates(MarkedDates),
    /// Display language
    Language(Language),
    /// Calendar type
    Calendar(CalendarType),
}

impl PersistedEntry {
    /// Storage key the entry is written under.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::MarkedDates(_) => KEY_MARKED_DATES,
            Self::Language(_) => KEY_LANGUAGE,
            Self::Calendar(_) => KEY_CALENDAR_TYPE,
        }
    }
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write an entry to storage
    Persist(PersistedEntry),
}

/// Everything the calendar view depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Current wall-clock date
    pub today: NaiveDate,
    /// Gregorian anchor; its year and month are shown in the Gregorian view
    pub anchor: NaiveDate,
    /// Hijri anchor; its year and month are shown in the Hijri view
    pub hijri_anchor: HijriDate,
    /// Selected date
    pub selected: NaiveDate,
    /// Calendar shown in the grid
    pub calendar: CalendarType,
    /// Display language
    pub language: Language,
    /// Marked dates
    pub marked: MarkedDates,
}

impl SessionState {
    /// Starts a session on `today` with restored preferences.
    #[must_use]
    pub fn new(today: NaiveDate, preferences: Preferences) -> Self {
        Self {
            today,
            anchor: today,
            hijri_anchor: gregorian_to_hijri(today),
            selected: today,
            calendar: preferences.calendar,
            language: preferences.language,
            marked: preferences.marked,
        }
    }

    /// Applies `event`, returning the next state and the writes it requires.
    #[must_use]
    pub fn update(mut self, event: SessionEvent) -> (Self, Vec<Effect>) {
        debug!(?event, "session event");
        let mut effects = Vec::new();

        match event {
            SessionEvent::NavigateMonth(direction) => self.navigate_month(direction),
            SessionEvent::SelectYear(year) => self.select_year(year),
            SessionEvent::SelectDate(date) => self.selected = date,
            SessionEvent::MoveSelection(offset) => self.move_selection(offset),
            SessionEvent::ToggleMark => {
                self.marked.toggle(self.selected);
                effects.push(Effect::Persist(PersistedEntry::MarkedDates(
                    self.marked.clone(),
                )));
            }
            SessionEvent::SetLanguage(language) => {
                self.language = language;
                effects.push(Effect::Persist(PersistedEntry::Language(language)));
            }
            SessionEvent::SetCalendar(calendar) => {
                if calendar == CalendarType::Hijri && self.calendar != CalendarType::Hijri {
                    self.hijri_anchor = gregorian_to_hijri(self.anchor);
                }
                self.calendar = calendar;
                effects.push(Effect::Persist(PersistedEntry::Calendar(calendar)));
            }
            SessionEvent::GoToToday => {
                self.anchor = self.today;
                self.selected = self.today;
                if self.calendar == CalendarType::Hijri {
                    self.hijri_anchor = gregorian_to_hijri(self.today);
                }
            }
            SessionEvent::Tick(today) => self.today = today,
        }

        (self, effects)
    }

    fn navigate_month(&mut self, direction: Direction) {
        match self.calendar {
            CalendarType::Gregorian => {
                let step = match direction {
                    Direction::Prev => -1,
                    Direction::Next => 1,
                };
                self.anchor = rollover_date(
                    self.anchor.year(),
                    self.anchor.month() as i32 + step,
                    self.anchor.day() as i32,
                );
            }
            CalendarType::Hijri => {
                let mut hijri = self.hijri_anchor;
                match direction {
                    Direction::Prev if hijri.month <= 1 => {
                        hijri.month = 12;
                        hijri.year -= 1;
                    }
                    Direction::Prev => hijri.month -= 1,
                    Direction::Next if hijri.month >= 12 => {
                        hijri.month = 1;
                        hijri.year += 1;
                    }
                    Direction::Next => hijri.month += 1,
                }
                self.set_hijri_anchor(hijri);
            }
        }
    }

    fn select_year(&mut self, year: i32) {
        match self.calendar {
            CalendarType::Gregorian => {
                self.anchor = rollover_date(
                    year,
                    self.anchor.month() as i32,
                    self.anchor.day() as i32,
                );
            }
            CalendarType::Hijri => {
                let hijri = HijriDate {
                    year,
                    ..self.hijri_anchor
                };
                self.set_hijri_anchor(hijri);
            }
        }
    }

    /// Replaces the Hijri anchor and re-derives the Gregorian anchor from
    /// the first day of that Hijri month.
    fn set_hijri_anchor(&mut self, hijri: HijriDate) {
        self.hijri_anchor = hijri;
        self.anchor = hijri_to_gregorian(hijri.year, hijri.month, 1);
    }

    fn move_selection(&mut self, offset: i32) {
        let grid = self.grid();
        let Some(index) = grid.position_of(self.selected) else {
            if let Some(first) = grid.first_date() {
                self.selected = first;
            }
            return;
        };

        let target = index as i64 + i64::from(offset);
        let in_grid = usize::try_from(target)
            .ok()
            .and_then(|i| grid.cells.get(i))
            .and_then(|cell| cell.date());

        if let Some(date) = in_grid {
            self.selected = date;
            return;
        }

        // Step from the first of the month so the day cannot roll over twice
        if let Some(first) = self.anchor.with_day(1) {
            self.anchor = first;
        }
        if target < index as i64 {
            self.navigate_month(Direction::Prev);
            if let Some(last) = self.grid().last_date() {
                self.selected = last;
            }
        } else {
            self.navigate_month(Direction::Next);
            if let Some(first) = self.grid().first_date() {
                self.selected = first;
            }
        }
    }

    /// Grid for the anchor of the active calendar.
    #[must_use]
    pub fn grid(&self) -> MonthGrid {
        let (year, month) = self.display_year_month();
        build_month(self.calendar, year, month)
    }

    /// Year and month shown in the active calendar.
    #[must_use]
    pub fn display_year_month(&self) -> (i32, u32) {
        match self.calendar {
            CalendarType::Gregorian => (self.anchor.year(), self.anchor.month()),
            CalendarType::Hijri => (self.hijri_anchor.year, self.hijri_anchor.month),
        }
    }

    /// Years offered by the year picker: the current year in the active
    /// calendar, a century back and a decade forward.
    #[must_use]
    pub fn year_options(&self) -> Vec<i32> {
        let current = match self.calendar {
            CalendarType::Gregorian => self.today.year(),
            CalendarType::Hijri => gregorian_to_hijri(self.today).year,
        };
        ((current - YEARS_BEFORE)..=(current + YEARS_AFTER)).collect()
    }

    /// Whether the selected date is marked.
    #[must_use]
    pub fn is_selected_marked(&self) -> bool {
        self.marked.contains(self.selected)
    }

    /// Hijri equivalent of the selected date.
    #[must_use]
    pub fn selected_hijri(&self) -> HijriDate {
        gregorian_to_hijri(self.selected)
    }

    /// Whether `date` is today.
    #[must_use]
    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(today: NaiveDate) -> SessionState {
        SessionState::new(today, Preferences::default())
    }

    fn apply(state: SessionState, event: SessionEvent) -> SessionState {
        state.update(event).0
    }

    #[test]
    fn test_new_session_anchors_on_today() {
        let state = session(ymd(2024, 3, 15));
        assert_eq!(state.anchor, ymd(2024, 3, 15));
        assert_eq!(state.selected, ymd(2024, 3, 15));
        assert_eq!(state.hijri_anchor, HijriDate::new(1445, 2, 14));
        assert_eq!(state.calendar, CalendarType::Gregorian);
    }

    #[test]
    fn test_gregorian_navigation_keeps_day_with_rollover() {
        let state = session(ymd(2024, 1, 31));
        let state = apply(state, SessionEvent::NavigateMonth(Direction::Next));
        // February 31st 2024 rolls to March 2nd
        assert_eq!(state.anchor, ymd(2024, 3, 2));

        let state = apply(state, SessionEvent::NavigateMonth(Direction::Prev));
        assert_eq!(state.anchor, ymd(2024, 2, 2));
    }

    #[test]
    fn test_gregorian_navigation_crosses_year() {
        let state = session(ymd(2024, 1, 10));
        let state = apply(state, SessionEvent::NavigateMonth(Direction::Prev));
        assert_eq!(state.anchor, ymd(2023, 12, 10));
    }

    #[test]
    fn test_hijri_navigation_rederives_gregorian_anchor() {
        let (state, _) =
            session(ymd(2024, 3, 15)).update(SessionEvent::SetCalendar(CalendarType::Hijri));
        assert_eq!(state.hijri_anchor, HijriDate::new(1445, 2, 14));

        let state = apply(state, SessionEvent::NavigateMonth(Direction::Next));
        assert_eq!((state.hijri_anchor.year, state.hijri_anchor.month), (1445, 3));
        assert_eq!(state.anchor, hijri_to_gregorian(1445, 3, 1));

        // Navigating again keeps the Hijri anchor authoritative
        let state = apply(state, SessionEvent::NavigateMonth(Direction::Next));
        assert_eq!((state.hijri_anchor.year, state.hijri_anchor.month), (1445, 4));
    }

    #[test]
    fn test_hijri_navigation_wraps_year() {
        let mut state = session(ymd(2024, 3, 15));
        state.calendar = CalendarType::Hijri;
        state.hijri_anchor = HijriDate::new(1445, 12, 1);

        let state = apply(state, SessionEvent::NavigateMonth(Direction::Next));
        assert_eq!(state.hijri_anchor, HijriDate::new(1446, 1, 1));

        let state = apply(state, SessionEvent::NavigateMonth(Direction::Prev));
        assert_eq!(state.hijri_anchor, HijriDate::new(1445, 12, 1));
    }

    #[test]
    fn test_select_year_gregorian_rolls_leap_day() {
        let state = session(ymd(2024, 2, 29));
        let state = apply(state, SessionEvent::SelectYear(2023));
        assert_eq!(state.anchor, ymd(2023, 3, 1));
    }

    #[test]
    fn test_select_year_hijri() {
        let (state, _) =
            session(ymd(2024, 3, 15)).update(SessionEvent::SetCalendar(CalendarType::Hijri));
        let state = apply(state, SessionEvent::SelectYear(1400));
        assert_eq!(state.hijri_anchor.year, 1400);
        assert_eq!(state.hijri_anchor.month, 2);
        assert_eq!(state.anchor, hijri_to_gregorian(1400, 2, 1));
    }

    #[test]
    fn test_toggle_mark_emits_persist_and_is_reversible() {
        let state = session(ymd(2024, 3, 15));
        let before = state.marked.clone();

        let (state, effects) = state.update(SessionEvent::ToggleMark);
        assert!(state.is_selected_marked());
        assert_eq!(
            effects,
            vec![Effect::Persist(PersistedEntry::MarkedDates(state.marked.clone()))]
        );

        let (state, effects) = state.update(SessionEvent::ToggleMark);
        assert!(!state.is_selected_marked());
        assert_eq!(state.marked, before);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_language_and_calendar_emit_persist() {
        let (state, effects) = session(ymd(2024, 3, 15)).update(SessionEvent::SetLanguage(Language::Ar));
        assert_eq!(state.language, Language::Ar);
        assert_eq!(effects, vec![Effect::Persist(PersistedEntry::Language(Language::Ar))]);

        let (_, effects) = state.update(SessionEvent::SetCalendar(CalendarType::Hijri));
        assert_eq!(
            effects,
            vec![Effect::Persist(PersistedEntry::Calendar(CalendarType::Hijri))]
        );
    }

    #[test]
    fn test_navigation_emits_no_effects() {
        let (_, effects) =
            session(ymd(2024, 3, 15)).update(SessionEvent::NavigateMonth(Direction::Next));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_go_to_today() {
        let state = session(ymd(2024, 3, 15));
        let state = apply(state, SessionEvent::SelectYear(2000));
        let state = apply(state, SessionEvent::SelectDate(ymd(2000, 3, 1)));
        let state = apply(state, SessionEvent::GoToToday);
        assert_eq!(state.anchor, ymd(2024, 3, 15));
        assert_eq!(state.selected, ymd(2024, 3, 15));
    }

    #[test]
    fn test_move_selection_within_month() {
        let state = session(ymd(2024, 3, 15));
        let state = apply(state, SessionEvent::MoveSelection(1));
        assert_eq!(state.selected, ymd(2024, 3, 16));
        let state = apply(state, SessionEvent::MoveSelection(-7));
        assert_eq!(state.selected, ymd(2024, 3, 9));
    }

    #[test]
    fn test_move_selection_past_month_end_navigates() {
        let state = session(ymd(2024, 3, 31));
        let state = apply(state, SessionEvent::MoveSelection(1));
        assert_eq!(state.selected, ymd(2024, 4, 1));
        assert_eq!((state.anchor.year(), state.anchor.month()), (2024, 4));

        let state = apply(state, SessionEvent::MoveSelection(-1));
        assert_eq!(state.selected, ymd(2024, 3, 31));
        assert_eq!(state.anchor.month(), 3);
    }

    #[test]
    fn test_move_selection_off_grid_selects_first_day() {
        let state = session(ymd(2024, 3, 15));
        let state = apply(state, SessionEvent::SelectDate(ymd(1999, 1, 1)));
        let state = apply(state, SessionEvent::MoveSelection(1));
        assert_eq!(state.selected, ymd(2024, 3, 1));
    }

    #[test]
    fn test_year_options_span() {
        let state = session(ymd(2024, 3, 15));
        let years = state.year_options();
        assert_eq!(years.first(), Some(&1924));
        assert_eq!(years.last(), Some(&2034));
        assert_eq!(years.len(), 111);

        let (state, _) = state.update(SessionEvent::SetCalendar(CalendarType::Hijri));
        assert_eq!(state.year_options().first(), Some(&1345));
    }

    #[test]
    fn test_grid_follows_calendar() {
        let state = session(ymd(2024, 2, 10));
        assert_eq!(state.grid().day_count(), 29);

        let (state, _) = state.update(SessionEvent::SetCalendar(CalendarType::Hijri));
        let grid = state.grid();
        assert_eq!(grid.calendar, CalendarType::Hijri);
        // February scales down to Muharram
        assert_eq!((grid.year, grid.month), (1445, 1));
    }

    #[test]
    fn test_tick_updates_today_only() {
        let state = session(ymd(2024, 3, 15));
        let state = apply(state, SessionEvent::Tick(ymd(2024, 3, 16)));
        assert_eq!(state.today, ymd(2024, 3, 16));
        assert_eq!(state.selected, ymd(2024, 3, 15));
    }
}
