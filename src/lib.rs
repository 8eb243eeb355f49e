//! ui-cues - synthesized audio feedback for user interfaces
//!
//! Short sound effects built entirely from oscillators and exponential
//! envelopes, no sample files. UI code calls `CueDispatcher::play_cue` on
//! discrete events; the dispatcher checks the caller's `MuteState`, lazily
//! opens the audio context and schedules the cue's voices.
//!
//! ```no_run
//! use ui_cues::{
//!     ContextManager, CpalContext, CueDispatcher, CueKind, CueSettings, MonitorBuffer, MuteState,
//! };
//!
//! let settings = CueSettings::default();
//! let monitor = MonitorBuffer::new(settings.monitor_capacity);
//! let mut cues = CueDispatcher::new(ContextManager::new(move || {
//!     CpalContext::open(&settings, monitor.clone())
//! }));
//!
//! let mute = MuteState::default();
//! cues.play_cue(CueKind::Success, mute);
//! cues.release();
//! ```

pub mod audio;
pub mod cue;
pub mod dispatcher;
pub mod error;
pub mod settings;
pub mod synth;

pub use audio::{AudioContext, ContextManager, CpalContext, MonitorBuffer};
pub use cue::CueKind;
pub use dispatcher::{CueDispatcher, MuteState};
pub use error::CueError;
pub use settings::{CueSettings, SettingsError};
pub use synth::{synthesize, Voice, Waveform};
