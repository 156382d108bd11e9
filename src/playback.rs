//! Audio output. The engine hands finished mix buffers to an
//! `AudioSink`; the cpal implementation plays them on the default
//! output device, a new buffer superseding whatever was still playing.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, Stream};

/// Fire-and-forget playback of a mono buffer. The engine never waits for
/// completion; the audible window is tracked by the release timer, not
/// by the sink.
pub trait AudioSink: Send {
    fn play(&self, samples: &[f32], sample_rate: u32);
}

/// Sink that discards everything. Used when no output device is
/// available and in tests.
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, _samples: &[f32], _sample_rate: u32) {}
}

/// What the output callback is currently reading. `play` swaps the
/// buffer and rewinds; the callback emits zeros once past the end.
struct PlayState {
    samples: Vec<f32>,
    /// Source sample rate of `samples`.
    source_rate: u32,
    /// Fractional read position in source samples.
    position: f64,
}

/// cpal-backed sink. Only the shared play state crosses threads; the
/// stream itself stays with the host thread that built it.
pub struct CpalSink {
    state: Arc<Mutex<PlayState>>,
}

impl CpalSink {
    /// Open the default output device. Returns the sink together with
    /// the stream, which the caller must keep alive for as long as audio
    /// should play.
    pub fn new() -> Result<(Self, Stream)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("No output device available"))?;
        log::info!("audio output: {}", device.name().unwrap_or_else(|_| "<unnamed>".into()));

        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let config = cpal::StreamConfig::from(supported);

        let state = Arc::new(Mutex::new(PlayState {
            samples: Vec::new(),
            source_rate: config.sample_rate.0,
            position: 0.0,
        }));

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&state)),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&state)),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&state)),
            _ => anyhow::bail!("Unsupported sample format"),
        }?;
        stream.play()?;

        Ok((Self { state }, stream))
    }
}

impl AudioSink for CpalSink {
    fn play(&self, samples: &[f32], sample_rate: u32) {
        if let Ok(mut state) = self.state.lock() {
            state.samples = samples.to_vec();
            state.source_rate = sample_rate;
            state.position = 0.0;
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    state: Arc<Mutex<PlayState>>,
) -> Result<Stream>
where
    T: Sample + Send + 'static + cpal::SizedSample + cpal::FromSample<f32>,
{
    let config = config.clone();
    let channels = config.channels as usize;
    let device_rate = config.sample_rate.0 as f64;
    let err_fn = |err| log::error!("audio stream error: {err}");

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let mut state = match state.lock() {
                Ok(state) => state,
                Err(_) => return,
            };
            // Step through the source at its own rate so buffers
            // rendered at 44.1 kHz pitch correctly on any device rate.
            let step = state.source_rate as f64 / device_rate;
            for frame in data.chunks_mut(channels) {
                let index = state.position as usize;
                let value = state.samples.get(index).copied().unwrap_or(0.0);
                state.position += step;

                let value_t = T::from_sample(value);
                for sample in frame.iter_mut() {
                    *sample = value_t;
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
