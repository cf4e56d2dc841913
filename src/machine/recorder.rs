//! Recorder: the ordered log of triggered pads and its timed replay.
//!
//! Replay is a poll-driven repeating task: entry `i` falls due at
//! `start + i * interval`, entry 0 immediately. The event loop polls it; once
//! the last entry has been handed out the task reports finished and its owner
//! drops it, so no timer outlives the sequence.

use std::fmt;
use std::time::{Duration, Instant};

use crate::kit::TriggerKey;

/// Default spacing between replayed hits.
pub const DEFAULT_REPLAY_INTERVAL: Duration = Duration::from_millis(600);

/// Recorded trigger keys, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recording {
    keys: Vec<TriggerKey>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: TriggerKey) {
        self.keys.push(key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Copy of the sequence as it stands now.
    pub fn snapshot(&self) -> Vec<TriggerKey> {
        self.keys.clone()
    }

    pub fn keys(&self) -> &[TriggerKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Space-separated keys, e.g. `Q W Q`.
impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// An in-flight replay of a recording snapshot.
#[derive(Debug, Clone)]
pub struct ReplayTask {
    keys: Vec<TriggerKey>,
    next: usize,
    started: Instant,
    interval: Duration,
}

impl ReplayTask {
    /// Schedule `keys`. An empty sequence schedules nothing and returns `None`.
    pub fn start(keys: Vec<TriggerKey>, interval: Duration, now: Instant) -> Option<Self> {
        if keys.is_empty() {
            return None;
        }
        Some(Self {
            keys,
            next: 0,
            started: now,
            interval,
        })
    }

    /// Hand out every entry due at `now`, in recorded order.
    pub fn poll(&mut self, now: Instant) -> Vec<TriggerKey> {
        let mut due = Vec::new();
        while let Some(&key) = self.keys.get(self.next) {
            if now < self.due_at(self.next) {
                break;
            }
            due.push(key);
            self.next += 1;
        }
        due
    }

    /// When entry `index` should be dispatched.
    pub fn due_at(&self, index: usize) -> Instant {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        self.started + self.interval.saturating_mul(steps)
    }

    /// Next dispatch time, or `None` once everything has been handed out.
    pub fn next_due(&self) -> Option<Instant> {
        (self.next < self.keys.len()).then(|| self.due_at(self.next))
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.keys.len()
    }

    /// Entries dispatched so far.
    pub fn dispatched(&self) -> usize {
        self.next
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
