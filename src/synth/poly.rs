use log::trace;
use rtrb::Consumer;

use crate::{
    engine::FrameClock,
    synth::{message::ClickTrigger, voice::ClickVoice},
    MAX_BLOCK_SIZE,
};

/// Audio-thread side of the click path.
///
/// Pops triggers from the control thread, arms voices on the exact frame
/// each trigger asks for, mixes them and advances the shared [`FrameClock`]
/// so the scheduler sees the timeline this synth is rendering.
pub struct ClickSynth {
    voices: Vec<ClickVoice>,
    rx: Consumer<ClickTrigger>,
    clock: FrameClock,
    temp_buffer: Vec<f32>,
}

impl ClickSynth {
    pub fn new(max_voices: usize, rx: Consumer<ClickTrigger>, clock: FrameClock) -> Self {
        let sample_rate = clock.sample_rate() as f32;
        let voices = (0..max_voices.max(1))
            .map(|_| ClickVoice::new(sample_rate))
            .collect();

        Self {
            voices,
            rx,
            clock,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Render one block (at most [`MAX_BLOCK_SIZE`] frames) of mono output
    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);
        let block_start = self.clock.frames();

        while let Ok(trigger) = self.rx.pop() {
            // Late triggers sound immediately rather than being dropped
            let start_frame = self.clock.frame_at(trigger.time).max(block_start);
            let voice = self.allocate_voice();
            voice.arm(&trigger, start_frame);
        }

        out.fill(0.0);
        for voice in &mut self.voices {
            if !voice.is_free() {
                self.temp_buffer[..out.len()].fill(0.0);
                voice.render(&mut self.temp_buffer[..out.len()], block_start);

                for (o, v) in out.iter_mut().zip(&self.temp_buffer) {
                    *o += v;
                }
            }
        }

        self.clock.advance(out.len());
    }

    fn allocate_voice(&mut self) -> &mut ClickVoice {
        // First pass: any free voice
        let idx = match self.voices.iter().position(|v| v.is_free()) {
            Some(idx) => idx,
            // Second pass: steal the hit that started earliest
            None => {
                let idx = self
                    .voices
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| v.start_frame())
                    .map(|(idx, _)| idx)
                    .unwrap_or(0);
                trace!("click synth out of voices, stealing voice {idx}");
                idx
            }
        };
        &mut self.voices[idx]
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| !v.is_free()).count()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
