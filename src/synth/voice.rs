use crate::dsp::{ClickEnvelope, Oscillator, Waveform};

use super::message::ClickTrigger;
use super::sound::Timbre;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,     // Available for allocation
    Pending,  // Armed, waiting for its start frame
    Sounding, // Envelope running
}

/// One click voice: oscillator plus envelope, started on an exact frame.
#[derive(Debug, Clone)]
pub struct ClickVoice {
    state: VoiceState,
    sample_rate: f32,
    start_frame: u64,
    gain: f32,
    timbre: Timbre,
    oscillator: Oscillator,
    envelope: ClickEnvelope,
}

impl ClickVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            state: VoiceState::Free,
            sample_rate,
            start_frame: 0,
            gain: 0.0,
            timbre: Timbre::COMPLETION,
            oscillator: Oscillator::new(Waveform::Sine),
            envelope: ClickEnvelope::new(sample_rate),
        }
    }

    /// Arm the voice to start sounding at `start_frame`
    pub fn arm(&mut self, trigger: &ClickTrigger, start_frame: u64) {
        self.state = VoiceState::Pending;
        self.start_frame = start_frame;
        self.gain = trigger.gain;
        self.timbre = trigger.timbre;
        self.envelope.reset();
    }

    /// Add this voice into `out`, whose first sample is frame `block_start`
    pub fn render(&mut self, out: &mut [f32], block_start: u64) {
        for (i, sample) in out.iter_mut().enumerate() {
            if self.state == VoiceState::Pending && block_start + i as u64 >= self.start_frame {
                self.start();
            }
            if self.state != VoiceState::Sounding {
                continue;
            }

            let level = self.envelope.next_sample();
            let osc = self
                .oscillator
                .next_sample(self.timbre.frequency, self.sample_rate);
            *sample += osc * level;

            if !self.envelope.is_active() {
                self.free();
                return;
            }
        }
    }

    fn start(&mut self) {
        self.oscillator.retrigger(self.timbre.waveform);
        self.envelope.trigger(
            self.gain,
            self.timbre.attack,
            self.timbre.duration,
            self.timbre.floor,
        );
        self.state = VoiceState::Sounding;
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.envelope.reset();
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }
}
