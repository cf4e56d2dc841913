//! drum-machine: a terminal drum machine with keyboard pads, a sequence
//! recorder, and timed replay.

pub mod audio;
pub mod config;
pub mod kit;
pub mod logging;
pub mod machine;
pub mod tui;
