//! Voice queue - the UI-thread half of the cpal backend
//!
//! Builds each voice's automation as the synthesizer calls in, stages the
//! voice once it is stopped, and on `commit` pushes a whole cue onto the
//! ring buffer read by the audio callback. It never touches a device, so
//! it runs the same against any ring buffer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ringbuf::traits::{Observer, Producer};
use ringbuf::HeapProd;

use super::mixer::VoiceSchedule;
use super::{AudioContext, Param, VoiceId};
use crate::error::CueError;
use crate::synth::{ParamTimeline, Waveform};

/// A voice still being scheduled
struct PendingVoice {
    waveform: Waveform,
    frequency: ParamTimeline,
    gain: ParamTimeline,
    start: Option<f64>,
}

impl PendingVoice {
    fn lane(&mut self, param: Param) -> &mut ParamTimeline {
        match param {
            Param::Frequency => &mut self.frequency,
            Param::Gain => &mut self.gain,
        }
    }
}

/// Scheduling front end feeding the audio thread
pub struct VoiceQueue {
    outgoing: HeapProd<VoiceSchedule>,
    pending: HashMap<VoiceId, PendingVoice>,
    /// Stopped voices waiting for `commit`
    staged: Vec<VoiceSchedule>,
    next_id: u64,

    /// Frames rendered so far, written by the audio thread
    frames: Arc<AtomicU64>,
    sample_rate: f32,
    closed: bool,
}

impl VoiceQueue {
    pub fn new(
        outgoing: HeapProd<VoiceSchedule>,
        frames: Arc<AtomicU64>,
        sample_rate: f32,
    ) -> Self {
        Self {
            outgoing,
            pending: HashMap::new(),
            staged: Vec::with_capacity(4),
            next_id: 0,
            frames,
            sample_rate,
            closed: false,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn pending_voice(&mut self, voice: VoiceId) -> Result<&mut PendingVoice, CueError> {
        if self.closed {
            return Err(CueError::ContextClosed);
        }
        match self.pending.get_mut(&voice) {
            Some(pending) => Ok(pending),
            // Ids below next_id were issued and have since been stopped or dropped
            None if voice.0 < self.next_id => Err(CueError::VoiceAlreadyStopped(voice)),
            None => Err(CueError::UnknownVoice(voice)),
        }
    }
}

impl AudioContext for VoiceQueue {
    fn current_time(&self) -> f64 {
        self.frames.load(Ordering::Relaxed) as f64 / self.sample_rate as f64
    }

    fn create_voice(&mut self, waveform: Waveform) -> Result<VoiceId, CueError> {
        if self.closed {
            return Err(CueError::ContextClosed);
        }
        let id = VoiceId(self.next_id);
        self.next_id += 1;
        self.pending.insert(
            id,
            PendingVoice {
                waveform,
                frequency: ParamTimeline::new(Param::Frequency),
                gain: ParamTimeline::new(Param::Gain),
                start: None,
            },
        );
        Ok(id)
    }

    fn set_value_at_time(
        &mut self,
        voice: VoiceId,
        param: Param,
        value: f32,
        time: f64,
    ) -> Result<(), CueError> {
        self.pending_voice(voice)?.lane(param).set_value_at_time(value, time)
    }

    fn exponential_ramp_to_value_at_time(
        &mut self,
        voice: VoiceId,
        param: Param,
        value: f32,
        end_time: f64,
    ) -> Result<(), CueError> {
        self.pending_voice(voice)?
            .lane(param)
            .exponential_ramp_to_value_at_time(value, end_time)
    }

    fn start(&mut self, voice: VoiceId, time: f64) -> Result<(), CueError> {
        let pending = self.pending_voice(voice)?;
        if pending.start.is_some() {
            return Err(CueError::VoiceAlreadyStarted(voice));
        }
        if !time.is_finite() || time < 0.0 {
            return Err(CueError::InvalidTime(time));
        }
        pending.start = Some(time);
        Ok(())
    }

    fn stop(&mut self, voice: VoiceId, time: f64) -> Result<(), CueError> {
        let start = self
            .pending_voice(voice)?
            .start
            .ok_or(CueError::VoiceNotStarted(voice))?;
        if !time.is_finite() || time < start {
            return Err(CueError::InvalidTime(time));
        }

        let Some(pending) = self.pending.remove(&voice) else {
            return Err(CueError::UnknownVoice(voice));
        };
        self.staged.push(VoiceSchedule {
            waveform: pending.waveform,
            frequency: pending.frequency,
            gain: pending.gain,
            start,
            stop: time,
        });
        Ok(())
    }

    fn commit(&mut self) -> Result<(), CueError> {
        if self.closed {
            return Err(CueError::ContextClosed);
        }
        if self.outgoing.vacant_len() < self.staged.len() {
            log::debug!("Voice queue full, dropping {} staged voice(s)", self.staged.len());
            self.discard();
            return Err(CueError::QueueFull);
        }
        // Single producer: the room checked above cannot shrink
        for schedule in self.staged.drain(..) {
            if self.outgoing.try_push(schedule).is_err() {
                return Err(CueError::QueueFull);
            }
        }
        Ok(())
    }

    fn discard(&mut self) {
        self.staged.clear();
        self.pending.clear();
    }

    fn close(&mut self) {
        self.discard();
        self.closed = true;
    }
}
