//! Context manager - lazy owner of the single audio context
//!
//! The context is expensive (it opens an output device and spawns the
//! host's audio thread) and hosts may refuse to open one before the user
//! interacts, so it is only created on the first cue. After that every
//! acquisition returns the same instance until `release`.

use super::AudioContext;
use crate::error::CueError;

/// Builds a fresh context on demand
pub type ContextFactory<C> = Box<dyn FnMut() -> Result<C, CueError>>;

/// Owns at most one audio context at a time
pub struct ContextManager<C: AudioContext> {
    factory: ContextFactory<C>,

    /// The live context, if one has been acquired and not released
    context: Option<C>,

    /// Number of contexts created over the manager's lifetime
    created: usize,
}

impl<C: AudioContext> ContextManager<C> {
    /// Create a manager that calls `factory` on first acquisition
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> Result<C, CueError> + 'static,
    {
        Self {
            factory: Box::new(factory),
            context: None,
            created: 0,
        }
    }

    /// Get the context, creating it if needed
    ///
    /// A failed creation leaves the manager empty, so the next call tries again.
    pub fn acquire(&mut self) -> Result<&mut C, CueError> {
        let context = match self.context.take() {
            Some(context) => context,
            None => {
                let context = (self.factory)()?;
                self.created += 1;
                log::info!("Audio context created");
                context
            }
        };
        Ok(self.context.insert(context))
    }

    /// Whether a context currently exists
    pub fn is_acquired(&self) -> bool {
        self.context.is_some()
    }

    /// Borrow the context without creating one
    pub fn get(&self) -> Option<&C> {
        self.context.as_ref()
    }

    /// Close and drop the context. No-op if none was acquired.
    pub fn release(&mut self) {
        if let Some(mut context) = self.context.take() {
            context.close();
            log::info!("Audio context released");
        }
    }

    /// How many times the factory has produced a context
    pub fn created(&self) -> usize {
        self.created
    }
}

impl<C: AudioContext> Drop for ContextManager<C> {
    fn drop(&mut self) {
        self.release();
    }
}
