//! Help screen: modal overlay showing the key and mouse reference.

/// A line in the help screen.
#[derive(Debug, Clone)]
pub struct HelpLine {
    pub text: String,
    pub is_header: bool,
}

/// Help screen state.
#[derive(Debug, Clone)]
pub struct HelpScreen {
    pub visible: bool,
    pub scroll_offset: usize,
    content: Vec<HelpLine>,
}

impl HelpScreen {
    /// Build the reference, listing the pads of the running kit.
    pub fn new(pads: &[(char, String)]) -> Self {
        Self {
            visible: false,
            scroll_offset: 0,
            content: Self::build_content(pads),
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll_offset = 0;
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.scroll_offset = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, max_visible: usize) {
        let max_scroll = self.content.len().saturating_sub(max_visible);
        if self.scroll_offset < max_scroll {
            self.scroll_offset += 1;
        }
    }

    pub fn lines(&self) -> &[HelpLine] {
        &self.content
    }

    fn build_content(pads: &[(char, String)]) -> Vec<HelpLine> {
        let mut lines = Vec::new();

        let h = |text: &str| HelpLine {
            text: text.to_string(),
            is_header: true,
        };
        let l = |text: &str| HelpLine {
            text: text.to_string(),
            is_header: false,
        };

        lines.push(h("PADS (either case, or click)"));
        for (key, label) in pads {
            lines.push(l(&format!("  {key}            {label}")));
        }
        lines.push(l(""));

        lines.push(h("RECORDER"));
        lines.push(l("  Enter        Play the recorded sequence"));
        lines.push(l("  Backspace    Clear the recording"));
        lines.push(l("  Delete       Clear the recording"));
        lines.push(l("  Esc          Stop replay"));
        lines.push(l(""));

        lines.push(h("VOLUME"));
        lines.push(l("  Up/Right     +1%"));
        lines.push(l("  Down/Left    -1%"));
        lines.push(l("  Shift-arrow  \u{00b1}10%"));
        lines.push(l(""));

        lines.push(h("GLOBAL"));
        lines.push(l("  Ctrl-T       Toggle light/dark theme"));
        lines.push(l("  F1           Toggle this help screen"));
        lines.push(l("  Esc          Close help"));
        lines.push(l("  Ctrl-Q       Quit"));
        lines.push(l("  Ctrl-C       Quit"));
        lines.push(l(""));

        lines.push(h("MOUSE"));
        lines.push(l("  Click a pad to play it"));
        lines.push(l("  Play / Clear / Theme buttons"));

        lines
    }
}

impl Default for HelpScreen {
    fn default() -> Self {
        Self::new(&[])
    }
}
