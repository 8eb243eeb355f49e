//! Error types for cue playback
//!
//! Two families of failure exist:
//! - acquiring the audio context (no device, stream setup failed)
//! - scheduling a voice (bad parameter, voice in the wrong state)
//!
//! Neither is ever surfaced to the UI layer by `CueDispatcher::play_cue`;
//! they are logged and the cue is skipped.

use thiserror::Error;

use crate::audio::{Param, VoiceId};

/// Errors that can occur while acquiring a context or scheduling a cue
#[derive(Error, Debug)]
pub enum CueError {
    #[error("No audio output device found")]
    NoOutputDevice,

    #[error("Failed to get default output config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown voice {0:?}")]
    UnknownVoice(VoiceId),

    #[error("Voice {0:?} was already started")]
    VoiceAlreadyStarted(VoiceId),

    #[error("Voice {0:?} was stopped before it was started")]
    VoiceNotStarted(VoiceId),

    #[error("Voice {0:?} was already stopped")]
    VoiceAlreadyStopped(VoiceId),

    /// Exponential ramps cannot reach zero or cross zero
    #[error("Invalid exponential ramp on {param:?}: {from} -> {to}")]
    InvalidRamp { param: Param, from: f32, to: f32 },

    #[error("Invalid schedule time: {0}")]
    InvalidTime(f64),

    #[error("Audio thread queue is full, voice dropped")]
    QueueFull,

    #[error("Audio context is closed")]
    ContextClosed,
}
