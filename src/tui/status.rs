//! Status bar: replay state, audio device, theme, and key hints.

use crate::tui::theme::ThemeMode;

/// Longest device name shown before truncation.
const DEVICE_LABEL_MAX: usize = 16;

/// Status information for the TUI status bar.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub device: Option<String>,
    /// `(dispatched, total)` while a replay runs.
    pub replay: Option<(usize, usize)>,
    pub theme: ThemeMode,
    pub pads_unavailable: usize,
}

impl StatusInfo {
    /// "REPLAY 2/5" during replay, "LIVE" otherwise.
    pub fn playback_display(&self) -> String {
        match self.replay {
            Some((done, total)) => format!("REPLAY {done}/{total}"),
            None => "LIVE".to_string(),
        }
    }

    /// Device name, truncated with an ellipsis, or "NO AUDIO".
    pub fn device_display(&self) -> String {
        match &self.device {
            Some(name) if name.chars().count() > DEVICE_LABEL_MAX => {
                let mut t: String = name.chars().take(DEVICE_LABEL_MAX - 1).collect();
                t.push('\u{2026}');
                t
            }
            Some(name) => name.clone(),
            None => "NO AUDIO".to_string(),
        }
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    pub fn hint(&self) -> &'static str {
        if self.is_replaying() {
            "Esc:stop  F1:help  Ctrl-Q:quit"
        } else {
            "Enter:play  Bksp:clear  \u{2191}\u{2193}:volume  Ctrl-T:theme  F1:help  Ctrl-Q:quit"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_display() {
        let live = StatusInfo::default();
        assert_eq!(live.playback_display(), "LIVE");

        let replaying = StatusInfo {
            replay: Some((2, 5)),
            ..Default::default()
        };
        assert_eq!(replaying.playback_display(), "REPLAY 2/5");
        assert!(replaying.hint().starts_with("Esc"));
    }

    #[test]
    fn missing_device_is_flagged() {
        assert_eq!(StatusInfo::default().device_display(), "NO AUDIO");
    }

    #[test]
    fn long_device_names_are_truncated() {
        let status = StatusInfo {
            device: Some("Built-in Output With A Very Long Name".into()),
            ..Default::default()
        };
        let shown = status.device_display();
        assert_eq!(shown.chars().count(), DEVICE_LABEL_MAX);
        assert!(shown.ends_with('\u{2026}'));

        let short = StatusInfo {
            device: Some("pulse".into()),
            ..Default::default()
        };
        assert_eq!(short.device_display(), "pulse");
    }
}
