//! Tone synthesizer - turns voice recipes into scheduled generators
//!
//! This module provides:
//! - `Waveform` oscillator shapes
//! - `Voice` descriptions and the `GAIN_FLOOR` decay target
//! - `ParamTimeline` automation lanes used by the real backend
//! - `synthesize` to schedule a recipe against an `AudioContext`

mod automation;
mod voice;
mod waveform;

pub use automation::{AutomationEvent, ParamTimeline};
pub use voice::{Ramp, Voice, GAIN_FLOOR};
pub use waveform::Waveform;

use crate::audio::{AudioContext, Param};
use crate::error::CueError;

/// Schedule every voice of a recipe against one shared clock snapshot
///
/// All voice offsets are relative to `clock_now`, so the voices keep their
/// spacing exactly no matter how long scheduling takes.
///
/// The recipe plays whole or not at all: on the first failing backend call
/// every voice of this recipe is discarded.
pub fn synthesize<C: AudioContext + ?Sized>(
    ctx: &mut C,
    recipe: &[Voice],
    clock_now: f64,
) -> Result<(), CueError> {
    let scheduled = recipe
        .iter()
        .try_for_each(|voice| schedule_voice(ctx, voice, clock_now));

    match scheduled {
        Ok(()) => ctx.commit(),
        Err(e) => {
            ctx.discard();
            Err(e)
        }
    }
}

fn schedule_voice<C: AudioContext + ?Sized>(
    ctx: &mut C,
    voice: &Voice,
    clock_now: f64,
) -> Result<(), CueError> {
    let start = voice.start_time(clock_now);
    let id = ctx.create_voice(voice.waveform)?;

    ctx.set_value_at_time(id, Param::Frequency, voice.start_frequency, start)?;
    if let Some(ramp) = voice.frequency_ramp {
        ctx.exponential_ramp_to_value_at_time(
            id,
            Param::Frequency,
            ramp.target,
            start + ramp.duration,
        )?;
    }

    ctx.set_value_at_time(id, Param::Gain, voice.start_gain, start)?;
    ctx.exponential_ramp_to_value_at_time(
        id,
        Param::Gain,
        voice.gain_decay.target,
        start + voice.gain_decay.duration,
    )?;

    ctx.start(id, start)?;
    ctx.stop(id, voice.stop_time(clock_now))?;

    log::trace!(
        "Scheduled {} voice {:?}: {} Hz, {:.3}s..{:.3}s",
        voice.waveform.name(),
        id,
        voice.start_frequency,
        start,
        voice.stop_time(clock_now)
    );
    Ok(())
}
