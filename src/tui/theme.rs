//! Theme system for consistent UI colors across dark and light modes.
//!
//! This module provides a centralized theme management system that automatically
//! detects the OS theme (dark/light mode) and applies appropriate colors.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
///
/// Provides consistent colors across all UI components with support
/// for both dark and light terminal backgrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color for confirmations and success messages
    pub success: Color,
    /// Error state color for errors and destructive actions
    pub error: Color,
    /// Warning state color for warnings and cautions
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels and less important content
    pub text_secondary: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Background of the selected day
    pub highlight_bg: Color,
    /// Surface color for panels and elevated elements
    pub surface: Color,

    // Calendar
    /// Ring color for today's cell
    pub today: Color,
    /// Color of marked days and the mark star
    pub marked: Color,
    /// Weekday header color
    pub weekday: Color,
}

/// Theme variant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    /// Dark theme optimized for dark terminal backgrounds
    Dark,
    /// Light theme optimized for light terminal backgrounds
    Light,
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    ///
    /// This uses the `dark-light` crate to detect whether the OS is in
    /// dark or light mode, and returns the matching theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Resolves the configured theme mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Magenta,
            accent: Color::LightMagenta,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::Rgb(150, 60, 170),
            surface: Color::Rgb(30, 30, 30),

            today: Color::Rgb(255, 165, 0),
            marked: Color::Yellow,
            weekday: Color::Cyan,
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    ///
    /// # Color Choices
    /// - Uses darker colors for text and UI elements
    /// - Black text on white background for maximum readability
    /// - Adjusted accent colors for visibility on light backgrounds
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(110, 40, 160),
            accent: Color::Rgb(190, 40, 120),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(225, 190, 240),
            surface: Color::Rgb(245, 245, 245),

            today: Color::Rgb(200, 90, 0),
            marked: Color::Rgb(170, 120, 0),
            weekday: Color::Blue,
        }
    }

    /// Creates a theme from a variant enum.
    #[must_use]
    pub const fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Returns the theme variant for the current theme.
    ///
    /// This is determined by checking the background color.
    #[must_use]
    pub const fn variant(&self) -> ThemeVariant {
        match self.background {
            Color::White | Color::Rgb(255, 255, 255) | Color::Rgb(245, 245, 245) => {
                ThemeVariant::Light
            }
            _ => ThemeVariant::Dark,
        }
    }
}

impl ThemeVariant {
    /// The opposite variant.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Explicit theme mode selecting this variant.
    #[must_use]
    pub const fn as_mode(self) -> ThemeMode {
        match self {
            Self::Dark => ThemeMode::Dark,
            Self::Light => ThemeMode::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
