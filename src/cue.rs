//! Cue kinds and their synthesis recipes
//!
//! Each cue maps to a fixed list of voices. The numbers here are the
//! product's sound; change them and every interaction sounds different.

use crate::synth::{Voice, Waveform};

/// A symbolic UI event that has a sound
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CueKind {
    /// Short falling blip for presses and value changes
    Click,
    /// Very quiet rising tick when the pointer enters an item
    Hover,
    /// Rising "power up" while a request is in flight
    Loading,
    /// Three-note ascending chime
    Success,
    /// Low falling buzz
    Error,
}

impl CueKind {
    pub const ALL: &[CueKind] = &[
        Self::Click,
        Self::Hover,
        Self::Loading,
        Self::Success,
        Self::Error,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Hover => "hover",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// The voices that make up this cue, offsets relative to trigger time
    pub fn recipe(&self) -> Vec<Voice> {
        match self {
            Self::Click => vec![Voice::new(Waveform::Sine, 1200.0, 0.1, 0.05).glide_to(600.0)],

            Self::Hover => vec![Voice::new(Waveform::Sine, 800.0, 0.02, 0.03).glide_to(900.0)],

            Self::Loading => {
                vec![Voice::new(Waveform::Triangle, 200.0, 0.05, 0.15).glide_to(400.0)]
            }

            // ding, bling, pling
            Self::Success => vec![
                Voice::new(Waveform::Sine, 880.0, 0.15, 0.3),
                Voice::new(Waveform::Sine, 1174.0, 0.10, 0.3).offset(0.05),
                Voice::new(Waveform::Sine, 1760.0, 0.08, 0.3).offset(0.10),
            ],

            Self::Error => vec![Voice::new(Waveform::Sawtooth, 300.0, 0.1, 0.2).glide_to(150.0)],
        }
    }
}

impl std::fmt::Display for CueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
