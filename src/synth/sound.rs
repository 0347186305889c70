use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::Waveform;

/// Selectable click character
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundType {
    /// Square wave beep
    #[default]
    Click,
    /// Sine woodblock
    Wood,
    /// Low triangle thump
    Drum,
}

impl SoundType {
    pub const ALL: [SoundType; 3] = [SoundType::Click, SoundType::Wood, SoundType::Drum];

    /// Oscillator settings for one hit.
    ///
    /// Accents are pitched highest, plain beats in the middle, subdivision
    /// pulses lowest, so the three are distinguishable by ear.
    pub fn timbre(self, is_accent: bool, is_main_beat: bool) -> Timbre {
        let (waveform, [accent, main, pulse], duration) = match self {
            SoundType::Click => (Waveform::Square, [1500.0, 1000.0, 800.0], 0.02),
            SoundType::Wood => (Waveform::Sine, [1200.0, 900.0, 700.0], 0.03),
            SoundType::Drum => (Waveform::Triangle, [200.0, 150.0, 120.0], 0.05),
        };

        let frequency = if is_accent {
            accent
        } else if is_main_beat {
            main
        } else {
            pulse
        };

        Timbre {
            waveform,
            frequency,
            duration,
            attack: Timbre::CLICK_ATTACK,
            floor: Timbre::CLICK_FLOOR,
        }
    }

    /// Cycle click -> wood -> drum -> click
    pub fn next(self) -> Self {
        match self {
            SoundType::Click => SoundType::Wood,
            SoundType::Wood => SoundType::Drum,
            SoundType::Drum => SoundType::Click,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SoundType::Click => "click",
            SoundType::Wood => "wood",
            SoundType::Drum => "drum",
        }
    }
}

impl fmt::Display for SoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sound type `{0}` (expected click, wood or drum)")]
pub struct UnknownSound(pub String);

impl FromStr for SoundType {
    type Err = UnknownSound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundType::ALL
            .into_iter()
            .find(|sound| sound.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSound(s.to_string()))
    }
}

/// Everything a voice needs to render one hit, apart from its gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timbre {
    pub waveform: Waveform,
    /// Hz
    pub frequency: f32,
    /// Total length including attack, seconds
    pub duration: f32,
    /// Linear attack, seconds
    pub attack: f32,
    /// Level the exponential decay aims for
    pub floor: f32,
}

impl Timbre {
    pub const CLICK_ATTACK: f32 = 0.001;
    pub const CLICK_FLOOR: f32 = 0.001;

    /// Gain the completion chime starts at
    pub const COMPLETION_GAIN: f32 = 0.3;

    /// Chime played when a countdown finishes: an A5 sine fading over half a second
    pub const COMPLETION: Timbre = Timbre {
        waveform: Waveform::Sine,
        frequency: 880.0,
        duration: 0.5,
        attack: 0.0,
        floor: 0.01,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_is_pitched_above_beat_above_pulse() {
        for sound in SoundType::ALL {
            let accent = sound.timbre(true, true).frequency;
            let beat = sound.timbre(false, true).frequency;
            let pulse = sound.timbre(false, false).frequency;
            assert!(accent > beat && beat > pulse, "{sound}");
        }
    }

    #[test]
    fn click_timbre() {
        let t = SoundType::Click.timbre(true, true);
        assert_eq!(t.waveform, Waveform::Square);
        assert_eq!(t.frequency, 1500.0);
        assert_eq!(t.duration, 0.02);

        let drum = SoundType::Drum.timbre(false, false);
        assert_eq!(drum.waveform, Waveform::Triangle);
        assert_eq!(drum.frequency, 120.0);
        assert_eq!(drum.duration, 0.05);
    }

    #[test]
    fn parse_and_cycle() {
        assert_eq!("Wood".parse::<SoundType>(), Ok(SoundType::Wood));
        assert!("cowbell".parse::<SoundType>().is_err());
        assert_eq!(SoundType::Drum.next(), SoundType::Click);
    }
}
