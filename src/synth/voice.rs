//! Voice - one oscillator + envelope unit of a cue
//!
//! A voice is plain data describing what to schedule. It never touches the
//! audio backend itself; `synthesize` turns it into backend calls.

use super::Waveform;

/// Near-zero gain that envelopes decay toward.
///
/// Exponential ramps cannot target exactly zero, so every decay ends here.
pub const GAIN_FLOOR: f32 = 0.001;

/// An exponential transition to `target` lasting `duration` seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ramp {
    pub target: f32,
    pub duration: f64,
}

impl Ramp {
    pub fn new(target: f32, duration: f64) -> Self {
        Self { target, duration }
    }
}

/// An ephemeral synthesis unit
///
/// All times are in seconds relative to the cue's trigger time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice {
    /// Oscillator shape
    pub waveform: Waveform,
    /// Frequency at the voice's start time (Hz)
    pub start_frequency: f32,
    /// Optional pitch glide
    pub frequency_ramp: Option<Ramp>,
    /// Amplitude at the voice's start time (0.0 to 1.0)
    pub start_gain: f32,
    /// Envelope decay toward `GAIN_FLOOR`
    pub gain_decay: Ramp,
    /// Delay from the trigger time to the voice's start
    pub start_offset: f64,
    /// How long the generator runs once started
    pub duration: f64,
}

impl Voice {
    /// Create a voice that starts immediately, holds its pitch, and decays
    /// to the gain floor over its whole duration
    pub fn new(waveform: Waveform, frequency: f32, gain: f32, duration: f64) -> Self {
        Self {
            waveform,
            start_frequency: frequency,
            frequency_ramp: None,
            start_gain: gain,
            gain_decay: Ramp::new(GAIN_FLOOR, duration),
            start_offset: 0.0,
            duration,
        }
    }

    /// Glide the pitch to `target` over the voice's duration
    pub fn glide_to(mut self, target: f32) -> Self {
        self.frequency_ramp = Some(Ramp::new(target, self.duration));
        self
    }

    /// Delay the voice's start relative to the trigger time
    pub fn offset(mut self, seconds: f64) -> Self {
        self.start_offset = seconds;
        self
    }

    /// Absolute start time for a cue triggered at `clock_now`
    pub fn start_time(&self, clock_now: f64) -> f64 {
        clock_now + self.start_offset
    }

    /// Absolute stop time for a cue triggered at `clock_now`
    pub fn stop_time(&self, clock_now: f64) -> f64 {
        self.start_time(clock_now) + self.duration
    }
}
