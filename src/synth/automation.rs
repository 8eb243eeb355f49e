//! Parameter automation - time-stamped value changes for one parameter
//!
//! A `ParamTimeline` is the lane behind a generator's frequency or gain.
//! It follows the host audio convention:
//!
//! - `set_value_at_time(v, t)` holds `v` from `t` onward
//! - `exponential_ramp_to_value_at_time(v1, t1)` glides from the previous
//!   event's value and time to `v1`, arriving exactly at `t1`
//!
//! The glide is `v0 * (v1 / v0) ^ ((t - t0) / (t1 - t0))`, a constant ratio
//! per unit time. That is why neither end may be zero.

use crate::audio::Param;
use crate::error::CueError;

/// A single scheduled change
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AutomationEvent {
    SetValue { value: f32, time: f64 },
    ExponentialRamp { value: f32, end_time: f64 },
}

impl AutomationEvent {
    /// Time at which the event's value is reached
    pub fn time(&self) -> f64 {
        match *self {
            AutomationEvent::SetValue { time, .. } => time,
            AutomationEvent::ExponentialRamp { end_time, .. } => end_time,
        }
    }

    pub fn value(&self) -> f32 {
        match *self {
            AutomationEvent::SetValue { value, .. } => value,
            AutomationEvent::ExponentialRamp { value, .. } => value,
        }
    }
}

/// Automation lane for one generator parameter
#[derive(Clone, Debug)]
pub struct ParamTimeline {
    param: Param,
    default_value: f32,
    /// Sorted by `time()`; equal times keep insertion order
    events: Vec<AutomationEvent>,
}

impl ParamTimeline {
    /// Create an empty lane that reports the parameter's default value
    pub fn new(param: Param) -> Self {
        Self {
            param,
            default_value: param.default_value(),
            events: Vec::with_capacity(4),
        }
    }

    pub fn param(&self) -> Param {
        self.param
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    /// Hold `value` from `time` onward
    pub fn set_value_at_time(&mut self, value: f32, time: f64) -> Result<(), CueError> {
        check_time(time)?;
        self.insert(AutomationEvent::SetValue { value, time });
        Ok(())
    }

    /// Glide exponentially from the preceding value to `value`, arriving at `end_time`
    pub fn exponential_ramp_to_value_at_time(
        &mut self,
        value: f32,
        end_time: f64,
    ) -> Result<(), CueError> {
        check_time(end_time)?;

        let from = self.value_before(end_time);
        if !same_sign_nonzero(from, value) {
            return Err(CueError::InvalidRamp {
                param: self.param,
                from,
                to: value,
            });
        }

        self.insert(AutomationEvent::ExponentialRamp { value, end_time });
        Ok(())
    }

    /// Evaluate the lane at absolute time `t` (seconds)
    pub fn value_at(&self, t: f64) -> f32 {
        // Index of the first event strictly after t
        let next = self.events.partition_point(|e| e.time() <= t);

        let (v0, t0) = if next == 0 {
            (self.default_value, 0.0)
        } else {
            let prev = self.events[next - 1];
            (prev.value(), prev.time())
        };

        match self.events.get(next) {
            Some(&AutomationEvent::ExponentialRamp { value: v1, end_time: t1 }) => {
                exponential_interpolate(v0, t0, v1, t1, t)
            }
            _ => v0,
        }
    }

    /// Value in effect just before `time`, ignoring events scheduled at or after it
    fn value_before(&self, time: f64) -> f32 {
        let idx = self.events.partition_point(|e| e.time() <= time);
        match idx {
            0 => self.default_value,
            i => self.events[i - 1].value(),
        }
    }

    fn insert(&mut self, event: AutomationEvent) {
        let idx = self.events.partition_point(|e| e.time() <= event.time());
        self.events.insert(idx, event);
    }
}

fn check_time(time: f64) -> Result<(), CueError> {
    if time.is_finite() && time >= 0.0 {
        Ok(())
    } else {
        Err(CueError::InvalidTime(time))
    }
}

fn same_sign_nonzero(a: f32, b: f32) -> bool {
    a != 0.0 && b != 0.0 && a.is_sign_positive() == b.is_sign_positive()
}

fn exponential_interpolate(v0: f32, t0: f64, v1: f32, t1: f64, t: f64) -> f32 {
    if t1 <= t0 || !same_sign_nonzero(v0, v1) {
        return v0;
    }
    let progress = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0) as f32;
    v0 * (v1 / v0).powf(progress)
}
