//! Mixer - renders scheduled voices on the audio thread
//!
//! The mixer owns its own sample clock. Voices arrive fully scheduled
//! (start, stop and both automation lanes) and are summed sample by sample.
//! A voice is silent before its start time and is removed at the first
//! block boundary after its stop time.

use crate::synth::{ParamTimeline, Waveform};

/// A generator ready for rendering
#[derive(Clone, Debug)]
pub struct VoiceSchedule {
    pub waveform: Waveform,
    pub frequency: ParamTimeline,
    pub gain: ParamTimeline,
    /// Absolute start time in seconds
    pub start: f64,
    /// Absolute stop time in seconds
    pub stop: f64,
}

struct ActiveVoice {
    schedule: VoiceSchedule,
    /// Oscillator phase (0.0 to 1.0)
    phase: f32,
}

/// Sums active voices into a mono signal
pub struct Mixer {
    voices: Vec<ActiveVoice>,
    sample_rate: f32,
    frames_rendered: u64,
}

impl Mixer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: Vec::with_capacity(32),
            sample_rate,
            frames_rendered: 0,
        }
    }

    /// Add a voice; it plays once the clock reaches its start time
    pub fn add(&mut self, schedule: VoiceSchedule) {
        self.voices.push(ActiveVoice {
            schedule,
            phase: 0.0,
        });
    }

    /// Number of voices not yet retired
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Current clock time in seconds
    pub fn time(&self) -> f64 {
        self.frames_rendered as f64 / self.sample_rate as f64
    }

    /// Render one mono sample and advance the clock
    pub fn next_sample(&mut self) -> f32 {
        let t = self.time();
        let mut out = 0.0;

        for voice in &mut self.voices {
            let schedule = &voice.schedule;
            if t < schedule.start || t >= schedule.stop {
                continue;
            }

            let increment = schedule.frequency.value_at(t) / self.sample_rate;
            let gain = schedule.gain.value_at(t);
            out += schedule.waveform.sample(voice.phase, increment) * gain;

            voice.phase = (voice.phase + increment).rem_euclid(1.0);
        }

        self.frames_rendered += 1;
        out
    }

    /// Fill a mono buffer
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
        self.retire_finished();
    }

    /// Drop every voice whose stop time has passed
    pub fn retire_finished(&mut self) {
        let now = self.time();
        self.voices.retain(|v| v.schedule.stop > now);
    }
}
