//! Key bindings: maps key events to application actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::machine::{VOLUME_STEP, VOLUME_STEP_COARSE};

/// Application-level actions triggered by key events.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Offer a printable key to the pad router.
    Trigger(char),
    /// Replay the recorded sequence.
    PlayRecording,
    /// Empty the recorded sequence.
    ClearRecording,
    /// Move the volume slider by a signed step.
    AdjustVolume(f32),
    /// Flip between the dark and light themes.
    ToggleTheme,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Close the help overlay, or stop a running replay.
    Escape,
    HelpScrollUp,
    HelpScrollDown,
}

/// Map a key event to an action. While the help overlay is open it captures
/// everything except quit, help and escape.
pub fn map_key(key: KeyEvent, help_visible: bool) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Global bindings
    if ctrl {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            _ => None,
        };
    }
    match key.code {
        KeyCode::F(1) => return Some(Action::ToggleHelp),
        KeyCode::Esc => return Some(Action::Escape),
        _ => {}
    }

    if help_visible {
        return match key.code {
            KeyCode::Up => Some(Action::HelpScrollUp),
            KeyCode::Down => Some(Action::HelpScrollDown),
            _ => None,
        };
    }

    let step = if shift { VOLUME_STEP_COARSE } else { VOLUME_STEP };
    match key.code {
        KeyCode::Enter => Some(Action::PlayRecording),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::ClearRecording),
        KeyCode::Up | KeyCode::Right => Some(Action::AdjustVolume(step)),
        KeyCode::Down | KeyCode::Left => Some(Action::AdjustVolume(-step)),
        KeyCode::Char(c) if !alt => Some(Action::Trigger(c)),
        _ => None,
    }
}
