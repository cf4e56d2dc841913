//! Theme system: dark and light color schemes for the TUI.

pub mod builtin;

use std::fmt;

use ratatui::style::Color;
use serde::Deserialize;

/// Which built-in palette is active. Independent of audio state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Flip between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Self::Dark => builtin::dark(),
            Self::Light => builtin::light(),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

/// A complete color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub mode: ThemeMode,

    // Background & text
    pub fg: Color,
    pub bg: Color,
    pub dim: Color,

    // Pads
    pub pad_fg: Color,
    pub pad_bg: Color,
    pub pad_key: Color,
    pub pad_hit_fg: Color,
    pub pad_hit_bg: Color,
    pub pad_missing: Color,

    // Display panel
    pub now_playing: Color,
    pub gauge: Color,
    pub recorded: Color,

    // Buttons
    pub button_fg: Color,
    pub button_bg: Color,
    pub button_active: Color,

    // Status bar
    pub status_fg: Color,
    pub status_bg: Color,
    pub ok: Color,
    pub error: Color,

    // Help
    pub help_key: Color,
    pub help_desc: Color,

    // Borders & chrome
    pub border: Color,
    pub border_focused: Color,
    pub title: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_mode() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggle().toggle(), ThemeMode::Dark);
    }

    #[test]
    fn default_is_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
        assert_eq!(ThemeMode::default().theme().name, "Dark");
    }

    #[test]
    fn mode_selects_palette() {
        let light = ThemeMode::Light.theme();
        assert_eq!(light.mode, ThemeMode::Light);
        assert_ne!(light.bg, ThemeMode::Dark.theme().bg);
    }

    #[test]
    fn mode_deserializes_lowercase() {
        let mode: ThemeMode = serde_yaml::from_str("light").unwrap();
        assert_eq!(mode, ThemeMode::Light);
        assert!(serde_yaml::from_str::<ThemeMode>("sepia").is_err());
    }
}
