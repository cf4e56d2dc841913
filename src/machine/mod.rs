//! The drum machine controller.
//!
//! [`DrumMachine`] owns the kit, the playback engine, the playback state and
//! any in-flight replay. Every mutation happens through its methods on the UI
//! thread; the event loop calls [`DrumMachine::tick`] to advance replay.
//!
//! Live hits are recorded even while a replay is running. Replayed hits go
//! straight to the playback engine and are not recorded again.

pub mod engine;
pub mod recorder;
pub mod router;
pub mod state;
pub mod volume;

pub use engine::{NullOutput, PlayOutcome, PlaybackEngine, SampleHandle, SampleOutput};
pub use recorder::{Recording, ReplayTask, DEFAULT_REPLAY_INTERVAL};
pub use router::InputEvent;
pub use state::{PlaybackState, NOW_PLAYING_PLACEHOLDER};
pub use volume::{Volume, VOLUME_STEP, VOLUME_STEP_COARSE};

use std::time::{Duration, Instant};

use tracing::info;

use crate::kit::{SampleRegistry, TriggerKey};

/// One dispatched play request.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub key: TriggerKey,
    pub pad_index: usize,
    pub outcome: PlayOutcome,
}

/// What a replay request did.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayStart {
    /// Nothing recorded; nothing dispatched or scheduled.
    Empty,
    /// `total` hits scheduled; `first` was dispatched immediately.
    Started { total: usize, first: Hit },
}

/// Single drum machine instance.
pub struct DrumMachine {
    registry: SampleRegistry,
    engine: PlaybackEngine,
    state: PlaybackState,
    replay: Option<ReplayTask>,
    replay_interval: Duration,
}

impl DrumMachine {
    pub fn new(
        registry: SampleRegistry,
        output: Box<dyn SampleOutput>,
        volume: Volume,
        replay_interval: Duration,
    ) -> Self {
        let engine = PlaybackEngine::new(&registry, output);
        Self {
            registry,
            engine,
            state: PlaybackState {
                volume,
                ..PlaybackState::default()
            },
            replay: None,
            replay_interval,
        }
    }

    /// Route a gesture. Returns the hit, or `None` if it hit no pad.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Hit> {
        let key = event.resolve(&self.registry)?;
        let hit = self.play_key(key)?;
        self.state.recording.append(key);
        Some(hit)
    }

    pub fn on_keydown(&mut self, raw: char) -> Option<Hit> {
        self.handle_input(InputEvent::KeyDown(raw))
    }

    pub fn on_pad_click(&mut self, index: usize) -> Option<Hit> {
        self.handle_input(InputEvent::PadClick(index))
    }

    fn play_key(&mut self, key: TriggerKey) -> Option<Hit> {
        let pad_index = self.registry.index_of(key)?;
        let pad = self.registry.get(pad_index)?;
        let outcome = self.engine.play(pad, self.state.volume, &mut self.state);
        Some(Hit {
            key,
            pad_index,
            outcome,
        })
    }

    /// Applies to the next trigger onwards; sounding pads keep their gain.
    pub fn set_volume(&mut self, volume: Volume) {
        self.state.volume = volume;
    }

    pub fn adjust_volume(&mut self, delta: f32) -> Volume {
        self.state.volume = self.state.volume.stepped(delta);
        self.state.volume
    }

    /// Empty the recording. The now-playing label is left alone.
    pub fn clear_recording(&mut self) {
        self.state.recording.clear();
    }

    /// Replay a snapshot of the recording, first hit now and one per interval
    /// after. A replay already running is replaced.
    pub fn replay(&mut self, now: Instant) -> ReplayStart {
        self.replay = None;
        let Some(mut task) =
            ReplayTask::start(self.state.recording.snapshot(), self.replay_interval, now)
        else {
            return ReplayStart::Empty;
        };

        let total = task.len();
        info!(
            hits = total,
            interval_ms = self.replay_interval.as_millis() as u64,
            "replay started"
        );

        let mut first = None;
        for key in task.poll(now) {
            let hit = self.play_key(key);
            first = first.or(hit);
        }

        if !task.is_finished() {
            self.replay = Some(task);
        } else {
            info!("replay finished");
        }

        match first {
            Some(first) => ReplayStart::Started { total, first },
            None => ReplayStart::Empty,
        }
    }

    /// Cancel a running replay. Returns whether one was running.
    pub fn stop_replay(&mut self) -> bool {
        let was_running = self.replay.take().is_some();
        if was_running {
            info!("replay stopped");
        }
        was_running
    }

    /// Dispatch replay hits that are due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<Hit> {
        let Some(task) = self.replay.as_mut() else {
            return Vec::new();
        };
        let due = task.poll(now);
        let finished = task.is_finished();

        let hits = due.into_iter().filter_map(|key| self.play_key(key)).collect();

        if finished {
            self.replay = None;
            info!("replay finished");
        }
        hits
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    /// `(dispatched, total)` for the running replay.
    pub fn replay_progress(&self) -> Option<(usize, usize)> {
        self.replay.as_ref().map(|t| (t.dispatched(), t.len()))
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn registry(&self) -> &SampleRegistry {
        &self.registry
    }

    pub fn volume(&self) -> Volume {
        self.state.volume
    }

    pub fn now_playing(&self) -> &str {
        &self.state.now_playing
    }

    pub fn recording(&self) -> &Recording {
        &self.state.recording
    }

    pub fn replay_interval(&self) -> Duration {
        self.replay_interval
    }

    pub fn device_name(&self) -> Option<&str> {
        self.engine.device_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::default_kit;

    fn machine() -> DrumMachine {
        DrumMachine::new(
            default_kit(),
            Box::new(NullOutput),
            Volume::FULL,
            DEFAULT_REPLAY_INTERVAL,
        )
    }

    #[test]
    fn key_hit_records_and_labels() {
        let mut m = machine();
        let hit = m.on_keydown('w').unwrap();
        assert_eq!(hit.key.as_char(), 'W');
        assert_eq!(hit.pad_index, 1);
        assert_eq!(m.now_playing(), "Reversed Synth");
        assert_eq!(m.recording().to_string(), "W");
    }

    #[test]
    fn unmapped_key_changes_nothing() {
        let mut m = machine();
        assert!(m.on_keydown('p').is_none());
        assert_eq!(m.now_playing(), NOW_PLAYING_PLACEHOLDER);
        assert!(m.recording().is_empty());
    }

    #[test]
    fn clear_keeps_label() {
        let mut m = machine();
        m.on_pad_click(8);
        m.clear_recording();
        assert!(m.recording().is_empty());
        assert_eq!(m.now_playing(), "'Hey!' Chant FX");
    }

    #[test]
    fn single_entry_replay_finishes_immediately() {
        let mut m = machine();
        m.on_keydown('q');
        let t0 = Instant::now();
        match m.replay(t0) {
            ReplayStart::Started { total, first } => {
                assert_eq!(total, 1);
                assert_eq!(first.key.as_char(), 'Q');
            }
            ReplayStart::Empty => panic!("expected a replay"),
        }
        assert!(!m.is_replaying());
    }

    #[test]
    fn stop_replay_cancels() {
        let mut m = machine();
        m.on_keydown('q');
        m.on_keydown('w');
        let t0 = Instant::now();
        m.replay(t0);
        assert!(m.is_replaying());
        assert!(m.stop_replay());
        assert!(!m.stop_replay());
        assert!(m.tick(t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn adjust_volume_is_clamped() {
        let mut m = machine();
        assert_eq!(m.adjust_volume(0.5), Volume::FULL);
        m.set_volume(Volume::from_slider(0.02));
        assert_eq!(m.adjust_volume(-VOLUME_STEP_COARSE), Volume::MUTE);
    }
}
