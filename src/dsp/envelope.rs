use crate::MIN_TIME;

/*
Click Envelope
==============

A percussive attack/decay envelope shaped for metronome clicks.

  Level
   peak ┐ ╱╲
        │╱  ╲
        │     ╲_
        │        ‾‾‾‾──___
  floor └──────────────────‾‾──→ Time
         A         D
        1ms   duration - 1ms

Attack is a LINEAR ramp 0 → peak. A hard start would pop, and 1 ms is
short enough that the click still feels instantaneous.

Decay is EXPONENTIAL from peak down to a small floor (0.001 for clicks).
Exponential decays sound natural because loudness perception is roughly
logarithmic. An exponential curve can never reach zero, so it targets a
floor and the envelope drops to idle once the decay time has elapsed.


The Math: Per-Sample Ratio
--------------------------

Falling from `peak` to `floor` over N samples means multiplying by the same
ratio every sample:

    ratio = (floor / peak) ^ (1 / N)

Example: 1.0 → 0.001 over 19 ms at 48 kHz (N = 912)
    ratio = 0.001 ^ (1/912) ≈ 0.99245

The ratio is computed once per trigger. After N samples the envelope snaps
to idle so a voice is freed at exactly the requested duration.

A peak at or below the floor (a zero-volume click) skips the exponential
and simply holds the peak until the decay time is over.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
}

#[derive(Debug, Clone)]
pub struct ClickEnvelope {
    sample_rate: f32,
    stage: EnvelopeStage,
    level: f32,
    peak: f32,

    attack_increment: f32,
    decay_ratio: f32,
    /// Samples left in the current stage
    remaining: u32,
    decay_samples: u32,
}

impl ClickEnvelope {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            peak: 0.0,
            attack_increment: 0.0,
            decay_ratio: 1.0,
            remaining: 0,
            decay_samples: 0,
        }
    }

    /// Start a new hit.
    ///
    /// `attack` and `duration` are in seconds; `duration` is the total
    /// length including the attack. `floor` is where the decay aims.
    pub fn trigger(&mut self, peak: f32, attack: f32, duration: f32, floor: f32) {
        let attack = attack.max(MIN_TIME);
        let decay = (duration - attack).max(MIN_TIME);

        let attack_samples = self.seconds_to_samples(attack);
        self.decay_samples = self.seconds_to_samples(decay);

        self.peak = peak.max(0.0);
        self.attack_increment = self.peak / attack_samples as f32;
        self.decay_ratio = if self.peak > floor && floor > 0.0 {
            (floor / self.peak).powf(1.0 / self.decay_samples as f32)
        } else {
            1.0
        };

        self.level = 0.0;
        self.remaining = attack_samples;
        self.stage = EnvelopeStage::Attack;
    }

    fn seconds_to_samples(&self, seconds: f32) -> u32 {
        (seconds * self.sample_rate).round().max(1.0) as u32
    }

    /// Advance one sample and return the new level
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                self.level = (self.level + self.attack_increment).min(self.peak);
                self.remaining -= 1;

                if self.remaining == 0 {
                    self.level = self.peak;
                    self.remaining = self.decay_samples;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                self.level *= self.decay_ratio;
                self.remaining -= 1;

                if self.remaining == 0 {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        self.level
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
        self.remaining = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}
