//! Audio engine - the cpal-backed `AudioContext`
//!
//! Scheduling happens on the UI thread in a `VoiceQueue`. Committed voices
//! cross to the audio thread through a lock-free ring buffer; the callback
//! drains it, renders everything with a `Mixer`, and publishes its sample
//! clock back through an atomic so `current_time` needs no lock.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use ringbuf::traits::{Consumer, Split};
use ringbuf::{HeapCons, HeapRb};

use super::mixer::{Mixer, VoiceSchedule};
use super::monitor::MonitorBuffer;
use super::queue::VoiceQueue;
use super::{AudioContext, Param, VoiceId};
use crate::error::CueError;
use crate::settings::CueSettings;
use crate::synth::Waveform;

/// Everything the audio callback owns
struct RenderState {
    mixer: Mixer,
    incoming: HeapCons<VoiceSchedule>,
    frames: Arc<AtomicU64>,
    master_volume: Arc<AtomicU32>,
    monitor: MonitorBuffer,
    /// Mono scratch block, grown on demand
    scratch: Vec<f32>,
}

impl RenderState {
    fn new(
        sample_rate: f32,
        incoming: HeapCons<VoiceSchedule>,
        frames: Arc<AtomicU64>,
        master_volume: Arc<AtomicU32>,
        monitor: MonitorBuffer,
    ) -> Self {
        Self {
            mixer: Mixer::new(sample_rate),
            incoming,
            frames,
            master_volume,
            monitor,
            scratch: Vec::with_capacity(4096),
        }
    }
}

/// Write one callback's worth of audio for any sample format
fn write_cue_samples<T: SizedSample + FromSample<f32>>(
    data: &mut [T],
    channels: usize,
    state: &mut RenderState,
) {
    while let Some(schedule) = state.incoming.try_pop() {
        state.mixer.add(schedule);
    }

    let num_frames = data.len() / channels;
    state.scratch.resize(num_frames, 0.0);
    state.mixer.render(&mut state.scratch);

    let volume = f32::from_bits(state.master_volume.load(Ordering::Relaxed));
    for sample in state.scratch.iter_mut() {
        *sample = (*sample * volume).clamp(-1.0, 1.0);
    }

    for (frame, &sample) in data.chunks_mut(channels).zip(state.scratch.iter()) {
        let value = T::from_sample(sample);
        for out in frame.iter_mut() {
            *out = value;
        }
    }

    // The display shows what actually went out
    state.monitor.push_slice(&state.scratch);
    state.frames.store(state.mixer.frames_rendered(), Ordering::Relaxed);
}

fn build_stream<T: SizedSample + FromSample<f32>>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut state: RenderState,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    let channels = config.channels as usize;
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            write_cue_samples(data, channels, &mut state);
        },
        |err| log::error!("Audio stream error: {}", err),
        None,
    )
}

/// Audio context playing through the default output device
pub struct CpalContext {
    /// The output stream (kept alive to continue playback)
    stream: Option<cpal::Stream>,

    queue: VoiceQueue,

    /// Master volume as `f32` bits
    master_volume: Arc<AtomicU32>,

    device_name: String,
}

impl CpalContext {
    /// Open the default output device and start an (initially silent) stream
    pub fn open(settings: &CueSettings, monitor: MonitorBuffer) -> Result<Self, CueError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(CueError::NoOutputDevice)?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!("Using output device: {}", device_name);

        let supported = device.default_output_config()?;
        log::info!("Audio config: {:?}", supported);

        let sample_rate = supported.sample_rate().0 as f32;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let capacity = settings.voice_queue_capacity.max(1);
        let (outgoing, incoming) = HeapRb::<VoiceSchedule>::new(capacity).split();
        let frames = Arc::new(AtomicU64::new(0));
        let volume = settings.master_volume.clamp(0.0, 1.0);
        let master_volume = Arc::new(AtomicU32::new(volume.to_bits()));

        let state = RenderState::new(
            sample_rate,
            incoming,
            Arc::clone(&frames),
            Arc::clone(&master_volume),
            monitor,
        );

        log::info!("Sample format: {:?}", sample_format);
        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, state)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, state)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, state)?,
            format => return Err(CueError::UnsupportedFormat(format!("{:?}", format))),
        };
        stream.play()?;

        log::info!("Audio context started at {} Hz", sample_rate);
        Ok(Self {
            stream: Some(stream),
            queue: VoiceQueue::new(outgoing, frames, sample_rate),
            master_volume,
            device_name,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate(&self) -> f32 {
        self.queue.sample_rate()
    }

    /// Change the master volume of everything rendered from now on
    pub fn set_master_volume(&self, volume: f32) {
        self.master_volume
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }
}

impl AudioContext for CpalContext {
    fn current_time(&self) -> f64 {
        self.queue.current_time()
    }

    fn create_voice(&mut self, waveform: Waveform) -> Result<VoiceId, CueError> {
        self.queue.create_voice(waveform)
    }

    fn set_value_at_time(
        &mut self,
        voice: VoiceId,
        param: Param,
        value: f32,
        time: f64,
    ) -> Result<(), CueError> {
        self.queue.set_value_at_time(voice, param, value, time)
    }

    fn exponential_ramp_to_value_at_time(
        &mut self,
        voice: VoiceId,
        param: Param,
        value: f32,
        end_time: f64,
    ) -> Result<(), CueError> {
        self.queue
            .exponential_ramp_to_value_at_time(voice, param, value, end_time)
    }

    fn start(&mut self, voice: VoiceId, time: f64) -> Result<(), CueError> {
        self.queue.start(voice, time)
    }

    fn stop(&mut self, voice: VoiceId, time: f64) -> Result<(), CueError> {
        self.queue.stop(voice, time)
    }

    fn commit(&mut self) -> Result<(), CueError> {
        self.queue.commit()
    }

    fn discard(&mut self) {
        self.queue.discard();
    }

    fn close(&mut self) {
        self.queue.close();
        if self.stream.take().is_some() {
            log::info!("Audio stream closed ({})", self.device_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{synthesize, Voice};

    const SAMPLE_RATE: f32 = 1000.0;

    struct Harness {
        queue: VoiceQueue,
        state: RenderState,
        frames: Arc<AtomicU64>,
        monitor: MonitorBuffer,
    }

    /// Both halves of the engine wired together without a device
    fn harness(volume: f32) -> Harness {
        let (outgoing, incoming) = HeapRb::<VoiceSchedule>::new(8).split();
        let frames = Arc::new(AtomicU64::new(0));
        let monitor = MonitorBuffer::new(4);
        let state = RenderState::new(
            SAMPLE_RATE,
            incoming,
            Arc::clone(&frames),
            Arc::new(AtomicU32::new(volume.to_bits())),
            monitor.clone(),
        );
        Harness {
            queue: VoiceQueue::new(outgoing, Arc::clone(&frames), SAMPLE_RATE),
            state,
            frames,
            monitor,
        }
    }

    fn loud_square() -> Vec<Voice> {
        vec![Voice::new(Waveform::Square, 100.0, 3.0, 1.0)]
    }

    #[test]
    fn test_output_is_scaled_clamped_and_interleaved() {
        let mut h = harness(0.5);
        synthesize(&mut h.queue, &loud_square(), 0.0).unwrap();

        let mut data = [0.0f32; 8];
        write_cue_samples(&mut data, 2, &mut h.state);

        // Frame 0 sits on the rising edge; frame 1 is 3.0 * 0.5, clamped
        assert!(data[0].abs() < 1e-6);
        assert_eq!(data[2], 1.0);
        assert_eq!(data[3], 1.0);
        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
            assert!((-1.0..=1.0).contains(&frame[0]));
        }
    }

    #[test]
    fn test_monitor_sees_scaled_output() {
        let mut h = harness(0.5);
        synthesize(&mut h.queue, &loud_square(), 0.0).unwrap();

        let mut data = [0.0f32; 8];
        write_cue_samples(&mut data, 2, &mut h.state);

        let mono: Vec<f32> = data.chunks(2).map(|frame| frame[0]).collect();
        assert_eq!(h.monitor.snapshot(), mono);
        assert!(h.monitor.peak() <= 1.0);
    }

    #[test]
    fn test_clock_published_to_scheduling_side() {
        let mut h = harness(1.0);
        let mut data = [0.0f32; 500 * 2];
        write_cue_samples(&mut data, 2, &mut h.state);

        assert_eq!(h.frames.load(Ordering::Relaxed), 500);
        assert!((h.queue.current_time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_integer_formats() {
        let mut h = harness(1.0);
        synthesize(&mut h.queue, &loud_square(), 0.0).unwrap();

        let mut data = [0i16; 4];
        write_cue_samples(&mut data, 1, &mut h.state);
        assert!(data[0].abs() <= 1);
        assert!(data[1] > i16::MAX - 2);
    }

    #[test]
    fn test_silent_until_commit() {
        let mut h = harness(1.0);
        let id = h.queue.create_voice(Waveform::Square).unwrap();
        h.queue.set_value_at_time(id, Param::Frequency, 100.0, 0.0).unwrap();
        h.queue.start(id, 0.0).unwrap();
        h.queue.stop(id, 1.0).unwrap();

        let mut data = [0.0f32; 4];
        write_cue_samples(&mut data, 1, &mut h.state);
        assert!(data.iter().all(|s| *s == 0.0));

        h.queue.commit().unwrap();
        write_cue_samples(&mut data, 1, &mut h.state);
        assert!(data.iter().any(|s| *s != 0.0));
    }
}
