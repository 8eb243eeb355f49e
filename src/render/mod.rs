//! Render module - UI components for visualization
//!
//! This module provides:
//! - Waveform display of recent cue output

mod waveform;

pub use waveform::WaveformView;
