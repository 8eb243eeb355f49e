//! Monitor buffer - recent output samples for display
//!
//! The audio thread pushes every rendered sample; the UI thread copies the
//! buffer out to draw a waveform. The audio side never waits: if the UI
//! holds the lock, that block's samples are simply not recorded.

use std::sync::{Arc, Mutex};

struct MonitorInner {
    samples: Vec<f32>,
    write_pos: usize,
}

/// Thread-safe circular buffer of mono output samples
#[derive(Clone)]
pub struct MonitorBuffer {
    inner: Arc<Mutex<MonitorInner>>,
}

impl MonitorBuffer {
    /// Create a buffer that remembers the last `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MonitorInner {
                samples: vec![0.0; capacity.max(1)],
                write_pos: 0,
            })),
        }
    }

    /// Record a block of samples (audio thread)
    pub fn push_slice(&self, block: &[f32]) {
        let Ok(mut inner) = self.inner.try_lock() else {
            return;
        };
        let len = inner.samples.len();
        let mut pos = inner.write_pos;
        for &sample in block {
            inner.samples[pos] = sample;
            pos = (pos + 1) % len;
        }
        inner.write_pos = pos;
    }

    /// Copy out all samples, oldest first (UI thread)
    pub fn snapshot(&self) -> Vec<f32> {
        let Ok(inner) = self.inner.lock() else {
            return Vec::new();
        };
        let len = inner.samples.len();
        (0..len)
            .map(|i| inner.samples[(inner.write_pos + i) % len])
            .collect()
    }

    /// Largest absolute sample currently held
    pub fn peak(&self) -> f32 {
        self.snapshot().iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }
}
