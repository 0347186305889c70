//! cpal output stream hosting the click synth.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info};
use rtrb::RingBuffer;
use thiserror::Error;

use crate::engine::FrameClock;
use crate::synth::{ClickRenderer, ClickSynth};
use crate::MAX_BLOCK_SIZE;

/// Voices in the click pool; a click lasts at most 50 ms, so this is plenty
pub const DEFAULT_VOICES: usize = 16;
/// Capacity of the control -> audio trigger ring
pub const TRIGGER_RING_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("no default output device available")]
    NoDevice,
    #[error("failed to fetch default output config")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build output stream")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// A running output stream. Audio stops when this is dropped.
pub struct AudioOutput {
    _stream: cpal::Stream,
    sample_rate: u32,
    channels: usize,
}

impl AudioOutput {
    /// Open the default output device.
    ///
    /// Returns the running stream, the renderer the metronome plays through,
    /// and the clock of the audio timeline the synth renders on.
    pub fn open(max_voices: usize) -> Result<(Self, ClickRenderer, FrameClock), OutputError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(OutputError::NoDevice)?;
        let config = device.default_output_config()?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let clock = FrameClock::new(sample_rate as f64);
        let (tx, rx) = RingBuffer::new(TRIGGER_RING_CAPACITY);
        let mut synth = ClickSynth::new(max_voices, rx, clock.clone());
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                render_interleaved(&mut synth, &mut render_buf, data, channels);
            },
            |err| error!("audio stream error: {err}"),
            None,
        )?;
        stream.play()?;

        info!(
            "audio output open: {} Hz, {channels} channel(s), {max_voices} voices",
            sample_rate
        );

        let output = Self {
            _stream: stream,
            sample_rate,
            channels,
        };
        Ok((output, ClickRenderer::new(tx), clock))
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

/// Fill an interleaved device buffer from the mono synth, in
/// `MAX_BLOCK_SIZE` chunks, copying each sample to every channel.
fn render_interleaved(
    synth: &mut ClickSynth,
    render_buf: &mut [f32],
    data: &mut [f32],
    channels: usize,
) {
    let channels = channels.max(1);
    let total_frames = data.len() / channels;
    let mut frames_written = 0;

    while frames_written < total_frames {
        let frames_to_render = (total_frames - frames_written).min(render_buf.len());
        let block = &mut render_buf[..frames_to_render];
        synth.render_block(block);

        let out = &mut data[frames_written * channels..];
        for (frame, &sample) in out.chunks_mut(channels).zip(block.iter()) {
            frame.fill(sample);
        }

        frames_written += frames_to_render;
    }
}
