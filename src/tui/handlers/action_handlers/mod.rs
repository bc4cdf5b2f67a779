//! Action handlers organized by category

/// Display toggles (calendar, language, theme)
pub mod display;

/// Quit and cancel handlers
pub mod general;

/// Marked-date handlers
pub mod marks;

/// Selection and month navigation handlers
pub mod navigation;

/// Popup and overlay management handlers
pub mod popups;
