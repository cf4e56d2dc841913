//! TUI interface: ratatui panels for the pads, now playing, volume,
//! recording and activity log.
//!
//! The App struct holds all TUI state and drives the event loop.

pub mod activity;
pub mod help;
pub mod keybindings;
pub mod layout;
pub mod status;
pub mod theme;

pub use activity::{ActivityLevel, ActivityLog};
pub use help::HelpScreen;
pub use keybindings::{map_key, Action};
pub use layout::{Button, HitTarget, ScreenLayout};
pub use status::StatusInfo;
pub use theme::{Theme, ThemeMode};

use std::collections::HashSet;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event as CrosstermEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info};

use crate::kit::TriggerKey;
use crate::machine::{DrumMachine, Hit, PlayOutcome, ReplayStart};

/// How long a pad stays highlighted after a hit.
const FLASH_DURATION: Duration = Duration::from_millis(150);

/// Input poll timeout; also bounds replay timing accuracy.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// The main TUI application state.
pub struct App {
    pub machine: DrumMachine,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
    pub help_screen: HelpScreen,
    pub activity: ActivityLog,
    pub layout: ScreenLayout,
    pub should_quit: bool,
    unavailable: HashSet<TriggerKey>,
    flash: Option<(usize, Instant)>,
    help_height: usize,
    started: Instant,
}

impl App {
    pub fn new(machine: DrumMachine, theme_mode: ThemeMode) -> Self {
        let pads: Vec<(char, String)> = machine
            .registry()
            .iter()
            .map(|p| (p.trigger_key.as_char(), p.display_id.clone()))
            .collect();
        Self {
            machine,
            theme_mode,
            theme: theme_mode.theme(),
            help_screen: HelpScreen::new(&pads),
            activity: ActivityLog::default(),
            layout: ScreenLayout::default(),
            should_quit: false,
            unavailable: HashSet::new(),
            flash: None,
            help_height: 10,
            started: Instant::now(),
        }
    }

    /// Mark pads whose audio failed to load; they are drawn dimmed.
    pub fn with_unavailable(mut self, keys: impl IntoIterator<Item = TriggerKey>) -> Self {
        self.unavailable.extend(keys);
        self
    }

    pub fn is_unavailable(&self, key: TriggerKey) -> bool {
        self.unavailable.contains(&key)
    }

    /// Log a message to the activity panel.
    pub fn note(&mut self, level: ActivityLevel, message: impl Into<String>) {
        let at = self.started.elapsed();
        self.activity.push(at, level, message);
    }

    pub fn handle_action(&mut self, action: Action) {
        self.handle_action_at(action, Instant::now());
    }

    /// Handle an action as if it happened at `now`.
    pub fn handle_action_at(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Trigger(raw) => {
                if let Some(hit) = self.machine.on_keydown(raw) {
                    self.show_hit(&hit, now, false);
                }
            }
            Action::PlayRecording => self.play_recording(now),
            Action::ClearRecording => self.clear_recording(),
            Action::AdjustVolume(delta) => {
                let volume = self.machine.adjust_volume(delta);
                debug!(%volume, "volume changed");
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::ToggleHelp => self.help_screen.toggle(),
            Action::Escape => {
                if self.help_screen.visible {
                    self.help_screen.hide();
                } else if self.machine.stop_replay() {
                    self.note(ActivityLevel::Info, "replay stopped");
                }
            }
            Action::HelpScrollUp => self.help_screen.scroll_up(),
            Action::HelpScrollDown => self.help_screen.scroll_down(self.help_height),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.handle_mouse_at(mouse, Instant::now());
    }

    /// Left clicks on pads and buttons; everything else is ignored.
    pub fn handle_mouse_at(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.help_screen.visible {
            return;
        }
        if let Some(target) = self.layout.hit(mouse.column, mouse.row) {
            self.click(target, now);
        }
    }

    pub fn click(&mut self, target: HitTarget, now: Instant) {
        match target {
            HitTarget::Pad(index) => {
                if let Some(hit) = self.machine.on_pad_click(index) {
                    self.show_hit(&hit, now, false);
                }
            }
            HitTarget::Button(Button::Play) => self.play_recording(now),
            HitTarget::Button(Button::Clear) => self.clear_recording(),
            HitTarget::Button(Button::Theme) => self.toggle_theme(),
        }
    }

    /// Advance a running replay.
    pub fn tick(&mut self, now: Instant) {
        let was_replaying = self.machine.is_replaying();
        for hit in self.machine.tick(now) {
            self.show_hit(&hit, now, true);
        }
        if was_replaying && !self.machine.is_replaying() {
            self.note(ActivityLevel::Info, "replay finished");
        }
    }

    fn play_recording(&mut self, now: Instant) {
        match self.machine.replay(now) {
            ReplayStart::Empty => self.note(ActivityLevel::Info, "nothing recorded"),
            ReplayStart::Started { total, first } => {
                let ms = self.machine.replay_interval().as_millis();
                self.note(
                    ActivityLevel::Info,
                    format!("replaying {total} hits every {ms} ms"),
                );
                self.show_hit(&first, now, true);
            }
        }
    }

    fn clear_recording(&mut self) {
        let was = self.machine.recording().len();
        self.machine.clear_recording();
        if was > 0 {
            self.note(ActivityLevel::Info, format!("cleared {was} hits"));
        }
    }

    fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggle();
        self.theme = self.theme_mode.theme();
        info!(theme = %self.theme_mode, "theme changed");
        self.note(ActivityLevel::Info, format!("theme: {}", self.theme_mode));
    }

    fn show_hit(&mut self, hit: &Hit, now: Instant, replayed: bool) {
        self.flash = Some((hit.pad_index, now));
        let label = self
            .machine
            .registry()
            .get(hit.pad_index)
            .map(|p| p.display_id.clone())
            .unwrap_or_default();
        let marker = if replayed { "\u{21bb} " } else { "" };
        match &hit.outcome {
            PlayOutcome::Started => {
                self.note(ActivityLevel::Info, format!("{marker}{}  {label}", hit.key));
            }
            PlayOutcome::Unavailable(error) => self.note(
                ActivityLevel::Warn,
                format!("{marker}{}  {label}  ({error})", hit.key),
            ),
            PlayOutcome::Unbound => self.note(
                ActivityLevel::Warn,
                format!("{marker}{}  {label}  (no audio bound)", hit.key),
            ),
        }
    }

    /// Pad highlighted at `now`, if any.
    pub fn flashing_pad(&self, now: Instant) -> Option<usize> {
        self.flash
            .filter(|(_, at)| now.saturating_duration_since(*at) < FLASH_DURATION)
            .map(|(pad, _)| pad)
    }

    pub fn status(&self) -> StatusInfo {
        StatusInfo {
            device: self.machine.device_name().map(str::to_string),
            replay: self.machine.replay_progress(),
            theme: self.theme_mode,
            pads_unavailable: self.unavailable.len(),
        }
    }

    /// Recompute the layout for a screen of `area`.
    pub fn resize(&mut self, area: Rect) {
        self.layout = ScreenLayout::compute(area, self.machine.registry().len());
    }

    /// Draw the UI.
    pub fn draw(&mut self, frame: &mut Frame) {
        let now = Instant::now();
        let area = frame.area();
        self.resize(area);

        frame.render_widget(
            Block::default().style(Style::default().fg(self.theme.fg).bg(self.theme.bg)),
            area,
        );

        self.draw_pads(frame, now);
        self.draw_now_playing(frame);
        self.draw_volume(frame);
        self.draw_recorded(frame);
        self.draw_buttons(frame);
        self.draw_activity(frame);
        self.draw_status(frame);

        if self.help_screen.visible {
            self.draw_help(frame, area);
        }
    }

    fn panel(&self, title: &str) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .title_style(Style::default().fg(self.theme.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
    }

    fn draw_pads(&self, frame: &mut Frame, now: Instant) {
        let theme = &self.theme;
        frame.render_widget(self.panel("Pads"), self.layout.pad_panel);

        let flashing = self.flashing_pad(now);
        for (i, (pad, rect)) in self
            .machine
            .registry()
            .iter()
            .zip(self.layout.pads.iter())
            .enumerate()
        {
            let missing = self.is_unavailable(pad.trigger_key);
            let (fg, bg) = if flashing == Some(i) {
                (theme.pad_hit_fg, theme.pad_hit_bg)
            } else {
                (theme.pad_fg, theme.pad_bg)
            };
            let key_color = if missing { theme.pad_missing } else { theme.pad_key };

            let lines = vec![
                Line::from(Span::styled(
                    pad.trigger_key.to_string(),
                    Style::default().fg(key_color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::raw(pad.display_id.as_str())),
            ];
            let border = if flashing == Some(i) {
                theme.border_focused
            } else {
                theme.border
            };
            let widget = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(fg).bg(bg))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border)),
                );
            frame.render_widget(widget, *rect);
        }
    }

    fn draw_now_playing(&self, frame: &mut Frame) {
        let widget = Paragraph::new(Span::styled(
            self.machine.now_playing(),
            Style::default()
                .fg(self.theme.now_playing)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(self.panel("Now Playing"));
        frame.render_widget(widget, self.layout.now_playing);
    }

    fn draw_volume(&self, frame: &mut Frame) {
        let volume = self.machine.volume();
        let gauge = Gauge::default()
            .block(self.panel("Volume"))
            .gauge_style(Style::default().fg(self.theme.gauge))
            .ratio(f64::from(volume.gain()).clamp(0.0, 1.0))
            .label(volume.to_string());
        frame.render_widget(gauge, self.layout.volume);
    }

    fn draw_recorded(&self, frame: &mut Frame) {
        let recording = self.machine.recording();
        let widget = Paragraph::new(Span::styled(
            recording.to_string(),
            Style::default().fg(self.theme.recorded),
        ))
        .wrap(Wrap { trim: false })
        .block(self.panel(&format!("Recorded ({})", recording.len())));
        frame.render_widget(widget, self.layout.recorded);
    }

    fn draw_buttons(&self, frame: &mut Frame) {
        let theme = &self.theme;
        let replaying = self.machine.is_replaying();
        for (button, rect) in &self.layout.buttons {
            let bg = if *button == Button::Play && replaying {
                theme.button_active
            } else {
                theme.button_bg
            };
            let widget = Paragraph::new(button.label())
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(theme.button_fg)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.border)),
                );
            frame.render_widget(widget, *rect);
        }
    }

    fn draw_activity(&self, frame: &mut Frame) {
        let theme = &self.theme;
        let visible = self.layout.activity.height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .activity
            .recent(visible)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|e| {
                let color = match e.level {
                    ActivityLevel::Info => theme.fg,
                    ActivityLevel::Warn => theme.error,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("[{:>6.1}s] ", e.at.as_secs_f64()),
                        Style::default().fg(theme.dim),
                    ),
                    Span::styled(e.message.as_str(), Style::default().fg(color)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(self.panel("Activity")), self.layout.activity);
    }

    fn draw_status(&self, frame: &mut Frame) {
        let theme = &self.theme;
        let status = self.status();

        let device = if status.device.is_some() {
            Span::styled(
                format!(" {} ", status.device_display()),
                Style::default().fg(theme.ok),
            )
        } else {
            Span::styled(
                format!(" {} ", status.device_display()),
                Style::default().fg(theme.error),
            )
        };
        let missing = if status.pads_unavailable > 0 {
            Span::styled(
                format!(" {} pads silent ", status.pads_unavailable),
                Style::default().fg(theme.error),
            )
        } else {
            Span::raw("")
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", status.playback_display()),
                Style::default()
                    .fg(if status.is_replaying() {
                        theme.ok
                    } else {
                        theme.status_fg
                    })
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" VOL:{} | {} |", self.machine.volume(), status.theme)),
            device,
            missing,
            Span::styled(format!(" {} ", status.hint()), Style::default().fg(theme.dim)),
        ]);

        let paragraph =
            Paragraph::new(line).style(Style::default().bg(theme.status_bg).fg(theme.status_fg));
        frame.render_widget(paragraph, self.layout.status);
    }

    fn draw_help(&mut self, frame: &mut Frame, area: Rect) {
        let width = (area.width * 60 / 100).max(44).min(area.width);
        let height = (area.height * 70 / 100).max(12).min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let overlay = Rect::new(x, y, width, height);

        let block = Block::default()
            .style(Style::default().bg(self.theme.bg))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .title(" Help (F1 or Esc to close) ");
        let inner = block.inner(overlay);
        frame.render_widget(Clear, overlay);
        frame.render_widget(block, overlay);

        self.help_height = inner.height as usize;
        let lines: Vec<Line> = self
            .help_screen
            .lines()
            .iter()
            .skip(self.help_screen.scroll_offset)
            .take(inner.height as usize)
            .map(|hl| {
                let color = if hl.is_header {
                    self.theme.help_key
                } else {
                    self.theme.help_desc
                };
                Line::from(Span::styled(hl.text.as_str(), Style::default().fg(color)))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Run the TUI event loop.
    pub fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = map_key(key, self.help_screen.visible) {
                            self.handle_action(action);
                        }
                    }
                    CrosstermEvent::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            self.tick(Instant::now());
        }

        self.machine.stop_replay();
        Ok(())
    }
}
