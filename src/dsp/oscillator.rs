#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Click Oscillator
================

A click is a few dozen milliseconds of a plain periodic waveform pushed
through a fast envelope. The waveform decides the character:

  Sine      Pure and round. Reads as a woodblock or soft tick.
  Square    Odd harmonics at 1/n. Bright and cutting, the classic "beep".
  Triangle  Odd harmonics at 1/n². Mellow; pitched low it thumps like a drum.

Phase is kept normalised to [0, 1) and advanced by frequency / sample_rate
each sample. Every waveform is a pure function of that phase, so a voice can
be restarted by zeroing it.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

impl Waveform {
    /// Value of the waveform at a normalised phase in [0, 1)
    #[inline]
    pub fn at(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            // rises 0 -> 1 over the first quarter, falls to -1, returns to 0
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
        }
    }
}

/// Phase-accumulating oscillator with a switchable waveform
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    /// Switch waveform and restart from phase zero
    pub fn retrigger(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        self.phase = 0.0;
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = self.waveform.at(self.phase);
        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }
        value
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}
