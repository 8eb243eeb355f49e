//! Audio module - the host side of cue playback
//!
//! This module provides:
//! - `AudioContext` trait describing what a backend must offer
//! - `ContextManager` for lazy, single-instance context ownership
//! - `CpalContext`, the real backend on the default output device
//! - `VoiceQueue`, its device-free scheduling half
//! - `Mixer` and `MonitorBuffer` used by the audio thread

mod context;
mod engine;
mod manager;
mod mixer;
mod monitor;
mod queue;
#[cfg(test)]
mod recording;

pub use context::{AudioContext, Param, VoiceId};
pub use engine::CpalContext;
pub use manager::{ContextFactory, ContextManager};
pub use mixer::{Mixer, VoiceSchedule};
pub use monitor::MonitorBuffer;
pub use queue::VoiceQueue;
#[cfg(test)]
pub use recording::{Call, RecordingContext, ScheduledVoice};
