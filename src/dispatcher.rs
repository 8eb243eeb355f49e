//! Cue dispatcher - the entry point UI code calls on every interaction
//!
//! `play_cue` is fire-and-forget: it schedules the cue's voices and returns
//! at once, and it never reports failure to the caller. A cue that cannot
//! play is logged and skipped; the next cue starts from scratch.

use crate::audio::{AudioContext, ContextManager};
use crate::cue::CueKind;
use crate::error::CueError;
use crate::synth;

/// Whether cues are currently silenced
///
/// Owned by whatever wires UI events to the dispatcher and passed in on
/// each call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MuteState {
    muted: bool,
}

impl MuteState {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle(&mut self) {
        self.muted = !self.muted;
    }
}

/// Maps cue kinds to recipes and schedules them on a lazily created context
pub struct CueDispatcher<C: AudioContext> {
    contexts: ContextManager<C>,

    /// Cues skipped because of an error since creation
    failed: usize,
}

impl<C: AudioContext> CueDispatcher<C> {
    pub fn new(contexts: ContextManager<C>) -> Self {
        Self { contexts, failed: 0 }
    }

    /// Play a cue unless muted. Errors are logged, never returned.
    pub fn play_cue(&mut self, kind: CueKind, mute: MuteState) {
        if let Err(e) = self.try_play_cue(kind, mute) {
            self.failed += 1;
            log::warn!("Skipping {} cue: {}", kind, e);
        }
    }

    /// Play a cue unless muted, reporting any failure
    pub fn try_play_cue(&mut self, kind: CueKind, mute: MuteState) -> Result<(), CueError> {
        if mute.is_muted() {
            return Ok(());
        }

        let ctx = self.contexts.acquire()?;
        let clock_now = ctx.current_time();
        log::debug!("Playing {} cue at {:.3}s", kind, clock_now);

        synth::synthesize(ctx, &kind.recipe(), clock_now)
    }

    /// Close the audio context, if one was ever created
    pub fn release(&mut self) {
        self.contexts.release();
    }

    /// Number of cues skipped because of errors
    pub fn failed_cues(&self) -> usize {
        self.failed
    }

    pub fn contexts(&self) -> &ContextManager<C> {
        &self.contexts
    }
}
