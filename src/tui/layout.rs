//! Layout: screen regions and mouse hit testing.
//!
//! The layout is recomputed on every draw and kept so that mouse clicks can
//! be resolved against what is on screen.

use ratatui::layout::{Constraint, Layout, Position, Rect};

/// Pads per row in the grid.
pub const PAD_COLUMNS: usize = 3;

/// Clickable buttons in the display panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Play,
    Clear,
    Theme,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Play, Button::Clear, Button::Theme];

    pub fn label(self) -> &'static str {
        match self {
            Button::Play => "Play",
            Button::Clear => "Clear",
            Button::Theme => "Theme",
        }
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Pad(usize),
    Button(Button),
}

/// Regions of the screen for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub pad_panel: Rect,
    pub pads: Vec<Rect>,
    pub now_playing: Rect,
    pub volume: Rect,
    pub recorded: Rect,
    pub buttons: Vec<(Button, Rect)>,
    pub activity: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    /// Split `area` for a kit of `pad_count` pads.
    pub fn compute(area: Rect, pad_count: usize) -> Self {
        let [main, activity, status] = Layout::vertical([
            Constraint::Min(10),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .areas(area);

        let [pad_panel, display] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(main);

        let [now_playing, volume, recorded, button_row] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .areas(display);

        let buttons = Layout::horizontal([Constraint::Ratio(1, 3); 3])
            .split(button_row)
            .iter()
            .zip(Button::ALL)
            .map(|(rect, button)| (button, *rect))
            .collect();

        Self {
            pad_panel,
            pads: pad_grid(inner(pad_panel), pad_count),
            now_playing,
            volume,
            recorded,
            buttons,
            activity,
            status,
        }
    }

    /// Resolve a terminal cell to the pad or button drawn there.
    pub fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        let pos = Position::new(column, row);
        if let Some(i) = self.pads.iter().position(|r| r.contains(pos)) {
            return Some(HitTarget::Pad(i));
        }
        self.buttons
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(b, _)| HitTarget::Button(*b))
    }

    pub fn button(&self, button: Button) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, r)| *r)
    }
}

/// Area inside a one-cell border.
fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Lay `count` pads out row-major, `PAD_COLUMNS` per row.
fn pad_grid(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(PAD_COLUMNS);
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);
    let col_constraints = [Constraint::Ratio(1, PAD_COLUMNS as u32); PAD_COLUMNS];

    row_areas
        .iter()
        .flat_map(|row| Layout::horizontal(col_constraints).split(*row).to_vec())
        .take(count)
        .collect()
}
