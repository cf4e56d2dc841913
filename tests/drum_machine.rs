//! Drum machine behaviour tests: routing, recording, replay timing and
//! volume, observed through a capturing output. No audio hardware required.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use assert_approx_eq::assert_approx_eq;

use drum_machine::audio::AudioError;
use drum_machine::kit::{
    default_kit, SampleDescriptor, SampleRegistry, SampleSource, SynthVoice, TriggerKey,
};
use drum_machine::machine::{
    DrumMachine, NullOutput, PlayOutcome, ReplayStart, SampleHandle, SampleOutput, Volume,
    DEFAULT_REPLAY_INTERVAL, NOW_PLAYING_PLACEHOLDER,
};

const INTERVAL: Duration = Duration::from_millis(600);

type Triggers = Rc<RefCell<Vec<(SampleHandle, f32)>>>;

/// Output that records every trigger instead of playing it.
struct Capture(Triggers);

impl SampleOutput for Capture {
    fn trigger(&mut self, handle: SampleHandle, gain: f32) -> Result<(), AudioError> {
        self.0.borrow_mut().push((handle, gain));
        Ok(())
    }

    fn device_name(&self) -> Option<&str> {
        Some("capture")
    }
}

fn capturing(registry: SampleRegistry) -> (DrumMachine, Triggers) {
    let log: Triggers = Rc::default();
    let machine = DrumMachine::new(
        registry,
        Box::new(Capture(log.clone())),
        Volume::FULL,
        INTERVAL,
    );
    (machine, log)
}

fn slots(log: &Triggers) -> Vec<usize> {
    log.borrow().iter().map(|(h, _)| h.slot()).collect()
}

fn riser_only() -> SampleRegistry {
    SampleRegistry::new(vec![SampleDescriptor::new(
        TriggerKey::from_char('Q').unwrap(),
        "Riser FX",
        SampleSource::Synth(SynthVoice::Riser),
    )])
    .unwrap()
}

#[test]
fn single_pad_scenario() {
    let (mut m, log) = capturing(riser_only());

    m.on_keydown('q');
    assert_eq!(m.now_playing(), "Riser FX");
    assert_eq!(m.recording().to_string(), "Q");

    m.on_keydown('q');
    assert_eq!(m.recording().to_string(), "Q Q");
    assert_eq!(slots(&log), vec![0, 0]);

    m.clear_recording();
    assert_eq!(m.recording().to_string(), "");

    let now = Instant::now();
    assert_eq!(m.replay(now), ReplayStart::Empty);
    assert!(!m.is_replaying());
    assert!(m.tick(now + INTERVAL * 10).is_empty());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn every_registered_key_resolves_in_either_case() {
    let kit = default_kit();
    for pad in kit.iter() {
        let c = pad.trigger_key.as_char();
        assert_eq!(kit.lookup(c).unwrap().display_id, pad.display_id);
        assert_eq!(
            kit.lookup(c.to_ascii_lowercase()).unwrap().display_id,
            pad.display_id
        );
    }
    for c in ['p', 'R', '1', ' ', '\n'] {
        assert!(kit.lookup(c).is_none(), "{c:?} should be unmapped");
    }
}

#[test]
fn unmapped_keys_are_silent_no_ops() {
    let (mut m, log) = capturing(default_kit());
    assert!(m.on_keydown('m').is_none());
    assert!(log.borrow().is_empty());
    assert_eq!(m.now_playing(), NOW_PLAYING_PLACEHOLDER);
    assert!(m.recording().is_empty());
}

#[test]
fn clicks_and_keys_share_one_path() {
    let (mut m, log) = capturing(default_kit());
    m.on_pad_click(0);
    m.on_keydown('Q');
    m.on_pad_click(7);
    assert_eq!(slots(&log), vec![0, 0, 7]);
    assert_eq!(m.recording().to_string(), "Q Q X");
}

#[test]
fn label_updates_when_output_fails() {
    let mut m = DrumMachine::new(
        default_kit(),
        Box::new(NullOutput),
        Volume::FULL,
        DEFAULT_REPLAY_INTERVAL,
    );
    let hit = m.on_keydown('c').unwrap();
    assert_eq!(hit.outcome, PlayOutcome::Unavailable(AudioError::NoOutputDevice));
    assert_eq!(m.now_playing(), "'Hey!' Chant FX");
    assert_eq!(m.recording().to_string(), "C");
}

#[test]
fn replay_dispatches_each_entry_once_on_the_interval() {
    let (mut m, log) = capturing(default_kit());
    for c in "qwezxc".chars() {
        m.on_keydown(c);
    }
    log.borrow_mut().clear();

    let t0 = Instant::now();
    match m.replay(t0) {
        ReplayStart::Started { total, first } => {
            assert_eq!(total, 6);
            assert_eq!(first.key.as_char(), 'Q');
        }
        ReplayStart::Empty => panic!("recording should not be empty"),
    }
    assert_eq!(slots(&log), vec![0]);

    // Poll every 5 ms, like the event loop.
    let mut dispatch_times = vec![Duration::ZERO];
    let mut t = Duration::ZERO;
    while t < INTERVAL * 8 {
        t += Duration::from_millis(5);
        for _ in m.tick(t0 + t) {
            dispatch_times.push(t);
        }
    }

    assert_eq!(slots(&log), vec![0, 1, 2, 6, 7, 8]);
    let expected: Vec<Duration> = (0..6).map(|i| INTERVAL * i).collect();
    assert_eq!(dispatch_times, expected);
    assert!(!m.is_replaying());
    // replayed hits are not recorded again
    assert_eq!(m.recording().len(), 6);
}

#[test]
fn clear_then_replay_is_an_empty_replay() {
    let (mut m, log) = capturing(default_kit());
    m.on_keydown('a');
    m.on_keydown('s');
    m.clear_recording();
    log.borrow_mut().clear();

    let t0 = Instant::now();
    assert_eq!(m.replay(t0), ReplayStart::Empty);
    assert!(m.tick(t0 + INTERVAL * 5).is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn volume_applies_to_later_triggers_only() {
    let (mut m, log) = capturing(default_kit());
    m.on_keydown('q');
    m.set_volume(Volume::from_slider(0.5));
    m.on_keydown('q');

    let gains: Vec<f32> = log.borrow().iter().map(|(_, g)| *g).collect();
    assert_approx_eq!(gains[0], 1.0);
    assert_approx_eq!(gains[1], 0.5);
}

#[test]
fn replay_uses_the_volume_at_dispatch_time() {
    let (mut m, log) = capturing(default_kit());
    m.on_keydown('q');
    m.on_keydown('w');
    log.borrow_mut().clear();

    let t0 = Instant::now();
    m.set_volume(Volume::from_slider(0.25));
    m.replay(t0);
    m.set_volume(Volume::from_slider(0.75));
    m.tick(t0 + INTERVAL);

    let log = log.borrow();
    assert_approx_eq!(log[0].1, 0.25);
    assert_approx_eq!(log[1].1, 0.75);
}

#[test]
fn live_hits_during_replay_are_recorded() {
    let (mut m, log) = capturing(default_kit());
    m.on_keydown('q');
    m.on_keydown('w');

    let t0 = Instant::now();
    m.replay(t0);
    m.on_keydown('e');
    m.tick(t0 + INTERVAL);

    assert_eq!(m.recording().to_string(), "Q W E");
    assert_eq!(slots(&log), vec![0, 1, 0, 2, 1]);
    // the snapshot held two entries
    assert!(!m.is_replaying());
}

#[test]
fn replay_works_from_a_snapshot() {
    let (mut m, _log) = capturing(default_kit());
    m.on_keydown('q');
    m.on_keydown('w');
    let t0 = Instant::now();
    m.replay(t0);
    m.clear_recording();

    let hits = m.tick(t0 + INTERVAL);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key.as_char(), 'W');
}

#[test]
fn restarting_replay_replaces_the_running_one() {
    let (mut m, log) = capturing(default_kit());
    m.on_keydown('q');
    m.on_keydown('w');
    m.on_keydown('e');
    log.borrow_mut().clear();

    let t0 = Instant::now();
    m.replay(t0);
    let t1 = t0 + INTERVAL / 2;
    m.replay(t1);
    assert_eq!(m.replay_progress(), Some((1, 3)));

    let mut t = t1;
    while m.is_replaying() {
        t += Duration::from_millis(5);
        m.tick(t);
    }
    assert_eq!(slots(&log), vec![0, 0, 1, 2]);
}

#[test]
fn stop_replay_cancels_remaining_hits() {
    let (mut m, log) = capturing(default_kit());
    for c in "asd".chars() {
        m.on_keydown(c);
    }
    log.borrow_mut().clear();

    let t0 = Instant::now();
    m.replay(t0);
    m.tick(t0 + INTERVAL);
    assert!(m.stop_replay());
    assert!(m.tick(t0 + INTERVAL * 10).is_empty());
    assert_eq!(slots(&log), vec![3, 4]);
}

#[test]
fn configured_interval_is_honoured() {
    let log: Triggers = Rc::default();
    let mut m = DrumMachine::new(
        default_kit(),
        Box::new(Capture(log.clone())),
        Volume::FULL,
        Duration::from_millis(100),
    );
    m.on_keydown('q');
    m.on_keydown('w');

    let t0 = Instant::now();
    m.replay(t0);
    assert!(m.tick(t0 + Duration::from_millis(99)).is_empty());
    assert_eq!(m.tick(t0 + Duration::from_millis(100)).len(), 1);
    assert!(!m.is_replaying());
}
