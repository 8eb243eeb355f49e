//! Recording context - an `AudioContext` double that logs every call
//!
//! Enforces the same voice lifecycle rules as the real backend so tests
//! catch misuse, but produces no sound.

use std::collections::HashMap;

use super::{AudioContext, Param, VoiceId};
use crate::error::CueError;
use crate::synth::{ParamTimeline, Waveform};

/// One capability call, as issued by the synthesizer
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Create { voice: VoiceId, waveform: Waveform },
    Set { voice: VoiceId, param: Param, value: f32, time: f64 },
    Ramp { voice: VoiceId, param: Param, value: f32, end_time: f64 },
    Start { voice: VoiceId, time: f64 },
    Stop { voice: VoiceId, time: f64 },
}

/// Summary of one generator after scheduling
#[derive(Clone, Debug)]
pub struct ScheduledVoice {
    pub id: VoiceId,
    pub waveform: Waveform,
    pub start: f64,
    pub stop: f64,
    pub frequency: ParamTimeline,
    pub gain: ParamTimeline,
}

struct VoiceState {
    waveform: Waveform,
    frequency: ParamTimeline,
    gain: ParamTimeline,
    start: Option<f64>,
    stop: Option<f64>,
    committed: bool,
}

pub struct RecordingContext {
    now: f64,
    next_id: u64,
    calls: Vec<Call>,
    voices: HashMap<VoiceId, VoiceState>,
    /// Creation order, since `voices` is unordered
    order: Vec<VoiceId>,
    /// Created since the last commit
    staged: Vec<VoiceId>,
    creates_allowed: Option<usize>,
    /// Most voices that may ever be committed, like a queue nobody drains
    queue_capacity: Option<usize>,
    closed: bool,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            calls: Vec::new(),
            voices: HashMap::new(),
            order: Vec::new(),
            staged: Vec::new(),
            creates_allowed: None,
            queue_capacity: None,
            closed: false,
        }
    }

    /// Move the context clock
    pub fn set_time(&mut self, now: f64) {
        self.now = now;
    }

    /// Make every `create_voice` after the first `n` fail
    pub fn fail_after_creates(&mut self, n: usize) {
        self.creates_allowed = Some(n);
    }

    /// Make `commit` fail once more than `n` voices would have been committed
    pub fn set_queue_capacity(&mut self, n: usize) {
        self.queue_capacity = Some(n);
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Every committed generator, in creation order
    pub fn scheduled_voices(&self) -> Vec<ScheduledVoice> {
        self.order
            .iter()
            .filter_map(|id| {
                let state = &self.voices[id];
                if !state.committed {
                    return None;
                }
                Some(ScheduledVoice {
                    id: *id,
                    waveform: state.waveform,
                    start: state.start?,
                    stop: state.stop?,
                    frequency: state.frequency.clone(),
                    gain: state.gain.clone(),
                })
            })
            .collect()
    }

    fn live_voice(&mut self, voice: VoiceId) -> Result<&mut VoiceState, CueError> {
        if self.closed {
            return Err(CueError::ContextClosed);
        }
        let state = self.voices.get_mut(&voice).ok_or(CueError::UnknownVoice(voice))?;
        if state.stop.is_some() {
            return Err(CueError::VoiceAlreadyStopped(voice));
        }
        Ok(state)
    }
}

impl AudioContext for RecordingContext {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn create_voice(&mut self, waveform: Waveform) -> Result<VoiceId, CueError> {
        if self.closed {
            return Err(CueError::ContextClosed);
        }
        if let Some(remaining) = self.creates_allowed.as_mut() {
            if *remaining == 0 {
                return Err(CueError::QueueFull);
            }
            *remaining -= 1;
        }

        let id = VoiceId(self.next_id);
        self.next_id += 1;
        self.voices.insert(
            id,
            VoiceState {
                waveform,
                frequency: ParamTimeline::new(Param::Frequency),
                gain: ParamTimeline::new(Param::Gain),
                start: None,
                stop: None,
                committed: false,
            },
        );
        self.order.push(id);
        self.staged.push(id);
        self.calls.push(Call::Create { voice: id, waveform });
        Ok(id)
    }

    fn set_value_at_time(
        &mut self,
        voice: VoiceId,
        param: Param,
        value: f32,
        time: f64,
    ) -> Result<(), CueError> {
        let state = self.live_voice(voice)?;
        match param {
            Param::Frequency => state.frequency.set_value_at_time(value, time)?,
            Param::Gain => state.gain.set_value_at_time(value, time)?,
        }
        self.calls.push(Call::Set { voice, param, value, time });
        Ok(())
    }

    fn exponential_ramp_to_value_at_time(
        &mut self,
        voice: VoiceId,
        param: Param,
        value: f32,
        end_time: f64,
    ) -> Result<(), CueError> {
        let state = self.live_voice(voice)?;
        match param {
            Param::Frequency => state.frequency.exponential_ramp_to_value_at_time(value, end_time)?,
            Param::Gain => state.gain.exponential_ramp_to_value_at_time(value, end_time)?,
        }
        self.calls.push(Call::Ramp { voice, param, value, end_time });
        Ok(())
    }

    fn start(&mut self, voice: VoiceId, time: f64) -> Result<(), CueError> {
        let state = self.live_voice(voice)?;
        if state.start.is_some() {
            return Err(CueError::VoiceAlreadyStarted(voice));
        }
        state.start = Some(time);
        self.calls.push(Call::Start { voice, time });
        Ok(())
    }

    fn stop(&mut self, voice: VoiceId, time: f64) -> Result<(), CueError> {
        let state = self.live_voice(voice)?;
        let start = state.start.ok_or(CueError::VoiceNotStarted(voice))?;
        if !time.is_finite() || time < start {
            return Err(CueError::InvalidTime(time));
        }
        state.stop = Some(time);
        self.calls.push(Call::Stop { voice, time });
        Ok(())
    }

    fn commit(&mut self) -> Result<(), CueError> {
        if self.closed {
            return Err(CueError::ContextClosed);
        }
        let committed = self.voices.values().filter(|v| v.committed).count();
        if let Some(capacity) = self.queue_capacity {
            if committed + self.staged.len() > capacity {
                self.discard();
                return Err(CueError::QueueFull);
            }
        }
        for id in self.staged.drain(..) {
            if let Some(state) = self.voices.get_mut(&id) {
                state.committed = true;
            }
        }
        Ok(())
    }

    fn discard(&mut self) {
        for id in self.staged.drain(..) {
            self.voices.remove(&id);
        }
        let voices = &self.voices;
        self.order.retain(|id| voices.contains_key(id));
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_voice_rejects_calls() {
        let mut ctx = RecordingContext::new();
        let id = ctx.create_voice(Waveform::Sine).unwrap();
        ctx.start(id, 0.0).unwrap();
        ctx.stop(id, 0.1).unwrap();

        assert!(matches!(ctx.stop(id, 0.2), Err(CueError::VoiceAlreadyStopped(_))));
        assert!(matches!(
            ctx.set_value_at_time(id, Param::Gain, 0.5, 0.0),
            Err(CueError::VoiceAlreadyStopped(_))
        ));
    }

    #[test]
    fn test_stop_before_start_time_is_rejected() {
        let mut ctx = RecordingContext::new();
        let id = ctx.create_voice(Waveform::Sine).unwrap();
        ctx.start(id, 1.0).unwrap();
        assert!(matches!(ctx.stop(id, 0.5), Err(CueError::InvalidTime(_))));
    }

    #[test]
    fn test_uncommitted_voices_are_not_scheduled() {
        let mut ctx = RecordingContext::new();
        let id = ctx.create_voice(Waveform::Sine).unwrap();
        ctx.start(id, 0.0).unwrap();
        ctx.stop(id, 0.1).unwrap();
        assert!(ctx.scheduled_voices().is_empty());

        ctx.commit().unwrap();
        assert_eq!(ctx.scheduled_voices().len(), 1);
    }

    #[test]
    fn test_discard_forgets_staged_voices() {
        let mut ctx = RecordingContext::new();
        let id = ctx.create_voice(Waveform::Sine).unwrap();
        ctx.discard();
        assert!(matches!(ctx.start(id, 0.0), Err(CueError::UnknownVoice(_))));
        ctx.commit().unwrap();
        assert!(ctx.scheduled_voices().is_empty());
    }

    #[test]
    fn test_stop_requires_start() {
        let mut ctx = RecordingContext::new();
        let id = ctx.create_voice(Waveform::Sine).unwrap();
        assert!(matches!(ctx.stop(id, 0.1), Err(CueError::VoiceNotStarted(_))));
    }

    #[test]
    fn test_unknown_voice() {
        let mut ctx = RecordingContext::new();
        assert!(matches!(ctx.start(VoiceId(42), 0.0), Err(CueError::UnknownVoice(VoiceId(42)))));
    }

    #[test]
    fn test_closed_context_rejects_creation() {
        let mut ctx = RecordingContext::new();
        ctx.close();
        assert!(matches!(ctx.create_voice(Waveform::Sine), Err(CueError::ContextClosed)));
    }
}
