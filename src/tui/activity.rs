//! Activity log: bounded buffer of recent user-facing events.

use std::collections::VecDeque;
use std::time::Duration;

/// How an entry is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Warn,
}

/// A timestamped log entry. `at` is time since the app started.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub at: Duration,
    pub level: ActivityLevel,
    pub message: String,
}

/// Circular buffer of recent activity, newest last.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push an entry, evicting the oldest if at capacity.
    pub fn push(&mut self, at: Duration, level: ActivityLevel, message: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            at,
            level,
            message: message.into(),
        });
    }

    pub fn info(&mut self, at: Duration, message: impl Into<String>) {
        self.push(at, ActivityLevel::Info, message);
    }

    pub fn warn(&mut self, at: Duration, message: impl Into<String>) {
        self.push(at, ActivityLevel::Warn, message);
    }

    /// The `n` most recent entries (newest last).
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ActivityEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(50)
    }
}
