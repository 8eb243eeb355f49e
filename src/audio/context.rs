//! AudioContext trait - the capability set a cue backend must provide
//!
//! The synthesizer only talks to this trait, never to cpal directly, so the
//! whole cue pipeline runs against a recording double in tests.

use crate::error::CueError;
use crate::synth::Waveform;

/// Handle to a generator created by a context
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

/// A schedulable generator parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    /// Oscillator frequency in Hz
    Frequency,
    /// Envelope amplitude (0.0 to 1.0)
    Gain,
}

impl Param {
    /// Value a parameter reports before any automation is scheduled
    pub fn default_value(&self) -> f32 {
        match self {
            Param::Frequency => 440.0,
            Param::Gain => 1.0,
        }
    }
}

/// A host audio processing graph
///
/// Each generator is an oscillator wired through its own gain node to the
/// output. Times are absolute seconds on the context's clock.
///
/// A generator must be started before it is stopped; once stopped it
/// accepts no more calls and the backend frees it after its stop time.
///
/// Stopped generators are staged, not audible, until `commit`. A cue's
/// voices are committed together or dropped together with `discard`.
pub trait AudioContext {
    /// Current time of the context's clock in seconds
    fn current_time(&self) -> f64;

    /// Create a new oscillator + gain pair connected to the output
    fn create_voice(&mut self, waveform: Waveform) -> Result<VoiceId, CueError>;

    /// Hold `value` from `time` onward
    fn set_value_at_time(
        &mut self,
        voice: VoiceId,
        param: Param,
        value: f32,
        time: f64,
    ) -> Result<(), CueError>;

    /// Glide exponentially to `value`, arriving at `end_time`
    fn exponential_ramp_to_value_at_time(
        &mut self,
        voice: VoiceId,
        param: Param,
        value: f32,
        end_time: f64,
    ) -> Result<(), CueError>;

    /// Begin producing sound at `time`
    fn start(&mut self, voice: VoiceId, time: f64) -> Result<(), CueError>;

    /// Stop producing sound at `time` and release the generator afterwards
    fn stop(&mut self, voice: VoiceId, time: f64) -> Result<(), CueError>;

    /// Hand every staged generator to the output at once
    ///
    /// On error nothing is handed over and the staged generators are dropped.
    fn commit(&mut self) -> Result<(), CueError>;

    /// Drop every generator created since the last `commit`
    fn discard(&mut self);

    /// Tear down the processing graph
    fn close(&mut self);
}
