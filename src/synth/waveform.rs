//! Periodic waveform shapes for cue generators
//!
//! Square and sawtooth have a jump every cycle. Sampled naively, the jump
//! aliases badly at the pitches cues use, so both are smoothed with a
//! polynomial band-limited step (PolyBLEP) spanning one sample on either
//! side of the discontinuity.

use std::f32::consts::TAU;

/// Oscillator waveform shapes
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Waveform {
    /// Smooth sine wave
    Sine,
    /// Linear triangle wave
    Triangle,
    /// Abrupt square wave
    Square,
    /// Rising sawtooth
    Sawtooth,
}

/// Residual of a unit step at phase 0, `dt` is the phase advance per sample
fn poly_blep(t: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    if t < dt {
        let x = t / dt;
        -(1.0 - x) * (1.0 - x)
    } else if t > 1.0 - dt {
        let x = (t - 1.0) / dt;
        (x + 1.0) * (x + 1.0)
    } else {
        0.0
    }
}

impl Waveform {
    /// Get all waveform types
    pub fn all() -> &'static [Waveform] {
        &[
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Square,
            Waveform::Sawtooth,
        ]
    }

    /// Get the name of this waveform
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    /// Sample at `phase` (0.0 to 1.0) for an oscillator advancing
    /// `phase_increment` per sample (frequency / sample rate)
    ///
    /// Returns a value in -1.0 to 1.0.
    pub fn sample(&self, phase: f32, phase_increment: f32) -> f32 {
        // Above half the sample rate the correction windows would overlap
        let dt = phase_increment.abs().min(0.5);
        match self {
            Waveform::Sine => (phase * TAU).sin(),

            // Continuous, so it needs no correction
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.25 - (phase - 0.25).round()).abs(),

            Waveform::Square => {
                let naive = if phase < 0.5 { 1.0 } else { -1.0 };
                naive + poly_blep(phase, dt) - poly_blep((phase + 0.5).fract(), dt)
            }

            Waveform::Sawtooth => 2.0 * phase - 1.0 - poly_blep(phase, dt),
        }
    }
}
