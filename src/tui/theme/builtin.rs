//! Built-in themes.

use ratatui::style::Color;

use super::{Theme, ThemeMode};

/// Dark theme: pastel text on a deep slate background.
pub fn dark() -> Theme {
    Theme {
        name: "Dark".to_string(),
        mode: ThemeMode::Dark,

        fg: Color::Rgb(205, 214, 244),
        bg: Color::Rgb(30, 30, 46),
        dim: Color::Rgb(88, 91, 112),

        pad_fg: Color::Rgb(205, 214, 244),
        pad_bg: Color::Rgb(49, 50, 68),
        pad_key: Color::Rgb(249, 226, 175),
        pad_hit_fg: Color::Rgb(30, 30, 46),
        pad_hit_bg: Color::Rgb(250, 179, 135),
        pad_missing: Color::Rgb(243, 139, 168),

        now_playing: Color::Rgb(137, 180, 250),
        gauge: Color::Rgb(166, 227, 161),
        recorded: Color::Rgb(148, 226, 213),

        button_fg: Color::Rgb(30, 30, 46),
        button_bg: Color::Rgb(137, 180, 250),
        button_active: Color::Rgb(166, 227, 161),

        status_fg: Color::Rgb(205, 214, 244),
        status_bg: Color::Rgb(49, 50, 68),
        ok: Color::Rgb(166, 227, 161),
        error: Color::Rgb(243, 139, 168),

        help_key: Color::Rgb(249, 226, 175),
        help_desc: Color::Rgb(205, 214, 244),

        border: Color::Rgb(108, 112, 134),
        border_focused: Color::Rgb(137, 180, 250),
        title: Color::Rgb(137, 180, 250),
    }
}

/// Light theme: dark text on a pale background.
pub fn light() -> Theme {
    Theme {
        name: "Light".to_string(),
        mode: ThemeMode::Light,

        fg: Color::Rgb(76, 79, 105),
        bg: Color::Rgb(239, 241, 245),
        dim: Color::Rgb(140, 143, 161),

        pad_fg: Color::Rgb(76, 79, 105),
        pad_bg: Color::Rgb(204, 208, 218),
        pad_key: Color::Rgb(136, 57, 239),
        pad_hit_fg: Color::Rgb(239, 241, 245),
        pad_hit_bg: Color::Rgb(254, 100, 11),
        pad_missing: Color::Rgb(210, 15, 57),

        now_playing: Color::Rgb(30, 102, 245),
        gauge: Color::Rgb(64, 160, 43),
        recorded: Color::Rgb(23, 146, 153),

        button_fg: Color::Rgb(239, 241, 245),
        button_bg: Color::Rgb(30, 102, 245),
        button_active: Color::Rgb(64, 160, 43),

        status_fg: Color::Rgb(76, 79, 105),
        status_bg: Color::Rgb(220, 224, 232),
        ok: Color::Rgb(64, 160, 43),
        error: Color::Rgb(210, 15, 57),

        help_key: Color::Rgb(136, 57, 239),
        help_desc: Color::Rgb(76, 79, 105),

        border: Color::Rgb(156, 160, 176),
        border_focused: Color::Rgb(30, 102, 245),
        title: Color::Rgb(30, 102, 245),
    }
}
