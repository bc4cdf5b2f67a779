//! Centralized shortcut and action system.
//!
//! This module provides a unified system for keyboard shortcuts and actions,
//! connecting the help overlay with actual event handling logic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Context name for the calendar view.
pub const MAIN_CONTEXT: &str = "main";

/// All possible actions in the application.
///
/// This enum represents every action a user can take. It serves as the
/// bridge between keyboard shortcuts and application behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === SELECTION ===
    /// Select the previous day
    PreviousDay,
    /// Select the next day
    NextDay,
    /// Select the same weekday one week earlier
    PreviousWeek,
    /// Select the same weekday one week later
    NextWeek,

    // === MONTHS & YEARS ===
    /// Show the previous month
    PreviousMonth,
    /// Show the next month
    NextMonth,
    /// Open the year picker
    OpenYearPicker,
    /// Show and select today
    GoToToday,

    // === MARKING ===
    /// Mark or unmark the selected date
    ToggleMark,

    // === DISPLAY ===
    /// Switch between Gregorian and Hijri grids
    ToggleCalendar,
    /// Switch between English and Arabic
    ToggleLanguage,
    /// Switch between dark and light theme
    ToggleTheme,

    // === HELP ===
    /// Show or hide the help overlay
    ToggleHelp,

    // === GENERAL ===
    /// Quit the application
    Quit,
    /// Dismiss the status message
    Cancel,
}

impl Action {
    /// Stable identifier for the action.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::PreviousDay => "previous_day",
            Self::NextDay => "next_day",
            Self::PreviousWeek => "previous_week",
            Self::NextWeek => "next_week",
            Self::PreviousMonth => "previous_month",
            Self::NextMonth => "next_month",
            Self::OpenYearPicker => "open_year_picker",
            Self::GoToToday => "go_to_today",
            Self::ToggleMark => "toggle_mark",
            Self::ToggleCalendar => "toggle_calendar",
            Self::ToggleLanguage => "toggle_language",
            Self::ToggleTheme => "toggle_theme",
            Self::ToggleHelp => "toggle_help",
            Self::Quit => "quit",
            Self::Cancel => "cancel",
        }
    }

    /// One-line description shown in the help overlay.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PreviousDay => "Select previous day",
            Self::NextDay => "Select next day",
            Self::PreviousWeek => "Select previous week",
            Self::NextWeek => "Select next week",
            Self::PreviousMonth => "Previous month",
            Self::NextMonth => "Next month",
            Self::OpenYearPicker => "Select year",
            Self::GoToToday => "Go to today",
            Self::ToggleMark => "Mark / unmark selected date",
            Self::ToggleCalendar => "Switch Gregorian / Hijri",
            Self::ToggleLanguage => "Switch English / Arabic",
            Self::ToggleTheme => "Switch dark / light theme",
            Self::ToggleHelp => "Toggle this help",
            Self::Quit => "Quit",
            Self::Cancel => "Close popup / clear message",
        }
    }

    /// Actions in the order the help overlay lists them.
    pub const ALL: [Self; 15] = [
        Self::PreviousDay,
        Self::NextDay,
        Self::PreviousWeek,
        Self::NextWeek,
        Self::PreviousMonth,
        Self::NextMonth,
        Self::OpenYearPicker,
        Self::GoToToday,
        Self::ToggleMark,
        Self::ToggleCalendar,
        Self::ToggleLanguage,
        Self::ToggleTheme,
        Self::ToggleHelp,
        Self::Quit,
        Self::Cancel,
    ];
}

/// Shortcut registry that maps key events to actions for a given context.
///
/// This is the central source of truth for all keyboard shortcuts in the application.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Human-readable form, e.g. `Ctrl+q` or `PgUp`.
    #[must_use]
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            other => format!("{other:?}"),
        };

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{key}")
        } else {
            key
        }
    }
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_main_shortcuts();
        registry
    }

    /// Register all shortcuts for the main context.
    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = MAIN_CONTEXT;

        // === SELECTION ===
        self.register(ctx, K::Left, M::NONE, Action::PreviousDay);
        self.register(ctx, K::Right, M::NONE, Action::NextDay);
        self.register(ctx, K::Up, M::NONE, Action::PreviousWeek);
        self.register(ctx, K::Down, M::NONE, Action::NextWeek);
        self.register(ctx, K::Char('h'), M::NONE, Action::PreviousDay);
        self.register(ctx, K::Char('l'), M::NONE, Action::NextDay);
        self.register(ctx, K::Char('k'), M::NONE, Action::PreviousWeek);
        self.register(ctx, K::Char('j'), M::NONE, Action::NextWeek);

        // === MONTHS & YEARS ===
        self.register(ctx, K::Char('['), M::NONE, Action::PreviousMonth);
        self.register(ctx, K::Char(']'), M::NONE, Action::NextMonth);
        self.register(ctx, K::PageUp, M::NONE, Action::PreviousMonth);
        self.register(ctx, K::PageDown, M::NONE, Action::NextMonth);
        self.register(ctx, K::Char('y'), M::NONE, Action::OpenYearPicker);
        self.register(ctx, K::Char('t'), M::NONE, Action::GoToToday);

        // === MARKING ===
        self.register(ctx, K::Char(' '), M::NONE, Action::ToggleMark);
        self.register(ctx, K::Char('m'), M::NONE, Action::ToggleMark);

        // === DISPLAY ===
        self.register(ctx, K::Char('c'), M::NONE, Action::ToggleCalendar);
        self.register(ctx, K::Char('L'), M::SHIFT, Action::ToggleLanguage);
        self.register(ctx, K::Char('L'), M::NONE, Action::ToggleLanguage);
        self.register(ctx, K::Char('d'), M::NONE, Action::ToggleTheme);

        // === HELP ===
        // Terminals disagree on whether '?' carries SHIFT
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Char('?'), M::SHIFT, Action::ToggleHelp);

        // === GENERAL ===
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Check if a key event matches a specific action in the given context.
    #[must_use]
    pub fn matches(&self, context: &str, event: KeyEvent, action: Action) -> bool {
        self.lookup(context, event) == Some(action)
    }

    /// Key labels bound to `action`, deduplicated and sorted.
    #[must_use]
    pub fn keys_for(&self, context: &str, action: Action) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|((ctx, _), a)| ctx == context && **a == action)
            .map(|((_, binding), _)| binding.label())
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
