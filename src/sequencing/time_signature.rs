#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::TempoError;

/// Time signature: how many beats make a measure, and which note gets the beat.
///
/// The note value is display metadata for the metronome: BPM always counts
/// beats, so 6/8 at 120 BPM clicks six times per measure at 120 clicks/minute.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTimeSignature"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Number of beats per measure (numerator)
    beats_per_measure: u8,
    /// Note value that gets one beat (denominator: 4 = quarter, 8 = eighth)
    note_value: u8,
}

/// Unchecked wire form; deserialised meters go through `TimeSignature::new`
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTimeSignature {
    beats_per_measure: u8,
    note_value: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTimeSignature> for TimeSignature {
    type Error = TempoError;

    fn try_from(raw: RawTimeSignature) -> Result<Self, Self::Error> {
        Self::new(raw.beats_per_measure, raw.note_value)
    }
}

impl TimeSignature {
    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        beats_per_measure: 4,
        note_value: 4,
    };

    /// 3/4 time (waltz)
    pub const THREE_FOUR: TimeSignature = TimeSignature {
        beats_per_measure: 3,
        note_value: 4,
    };

    /// 2/4 time (march)
    pub const TWO_FOUR: TimeSignature = TimeSignature {
        beats_per_measure: 2,
        note_value: 4,
    };

    /// 5/4 time
    pub const FIVE_FOUR: TimeSignature = TimeSignature {
        beats_per_measure: 5,
        note_value: 4,
    };

    /// 6/8 time, counted in eighths
    pub const SIX_EIGHT: TimeSignature = TimeSignature {
        beats_per_measure: 6,
        note_value: 8,
    };

    /// 7/8 time, counted in eighths
    pub const SEVEN_EIGHT: TimeSignature = TimeSignature {
        beats_per_measure: 7,
        note_value: 8,
    };

    /// 2/2 time (cut time)
    pub const TWO_TWO: TimeSignature = TimeSignature {
        beats_per_measure: 2,
        note_value: 2,
    };

    /// Meters offered by the meter selector, in display order.
    pub const PRESETS: [TimeSignature; 7] = [
        TimeSignature::TWO_FOUR,
        TimeSignature::THREE_FOUR,
        TimeSignature::FOUR_FOUR,
        TimeSignature::FIVE_FOUR,
        TimeSignature::SIX_EIGHT,
        TimeSignature::SEVEN_EIGHT,
        TimeSignature::TWO_TWO,
    ];

    /// Create a validated time signature.
    ///
    /// A measure needs at least one beat, and the note value must be a power
    /// of two no smaller than a half note (2, 4, 8, 16, ...).
    pub fn new(beats_per_measure: u8, note_value: u8) -> Result<Self, TempoError> {
        if beats_per_measure == 0 {
            return Err(TempoError::EmptyMeasure);
        }
        if note_value < 2 || !note_value.is_power_of_two() {
            return Err(TempoError::InvalidNoteValue(note_value));
        }
        Ok(Self {
            beats_per_measure,
            note_value,
        })
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure as u32
    }

    pub fn note_value(&self) -> u32 {
        self.note_value as u32
    }

    /// Next preset after this one, wrapping around.
    ///
    /// A signature that is not a preset cycles back to the first preset.
    pub fn next_preset(&self) -> Self {
        let idx = Self::PRESETS.iter().position(|ts| ts == self);
        match idx {
            Some(i) => Self::PRESETS[(i + 1) % Self::PRESETS.len()],
            None => Self::PRESETS[0],
        }
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.beats_per_measure, self.note_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_four_meter() {
        let ts = TimeSignature::FOUR_FOUR;
        assert_eq!(ts.beats_per_measure(), 4);
        assert_eq!(ts.note_value(), 4);
        assert_eq!(ts.to_string(), "4/4");
    }

    #[test]
    fn test_six_eight_meter() {
        let ts = TimeSignature::new(6, 8).unwrap();
        assert_eq!(ts, TimeSignature::SIX_EIGHT);
        assert_eq!(ts.beats_per_measure(), 6);
    }

    #[test]
    fn test_rejects_empty_measure() {
        assert_eq!(TimeSignature::new(0, 4), Err(TempoError::EmptyMeasure));
    }

    #[test]
    fn test_rejects_odd_note_values() {
        assert_eq!(TimeSignature::new(4, 3), Err(TempoError::InvalidNoteValue(3)));
        assert_eq!(TimeSignature::new(4, 1), Err(TempoError::InvalidNoteValue(1)));
        assert_eq!(TimeSignature::new(4, 0), Err(TempoError::InvalidNoteValue(0)));
        assert!(TimeSignature::new(4, 16).is_ok());
    }

    #[test]
    fn test_preset_cycle_wraps() {
        let mut ts = TimeSignature::TWO_FOUR;
        for _ in 0..TimeSignature::PRESETS.len() {
            ts = ts.next_preset();
        }
        assert_eq!(ts, TimeSignature::TWO_FOUR);

        // Off-preset meters rejoin the cycle at the start
        let odd = TimeSignature::new(11, 16).unwrap();
        assert_eq!(odd.next_preset(), TimeSignature::PRESETS[0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_meter() {
        let ok: TimeSignature =
            serde_json::from_str(r#"{"beats_per_measure":7,"note_value":8}"#).unwrap();
        assert_eq!(ok, TimeSignature::SEVEN_EIGHT);

        let empty = serde_json::from_str::<TimeSignature>(r#"{"beats_per_measure":0,"note_value":4}"#);
        assert!(empty.is_err());
        let odd = serde_json::from_str::<TimeSignature>(r#"{"beats_per_measure":4,"note_value":3}"#);
        assert!(odd.is_err());

        let json = serde_json::to_string(&TimeSignature::SIX_EIGHT).unwrap();
        assert_eq!(serde_json::from_str::<TimeSignature>(&json).unwrap(), TimeSignature::SIX_EIGHT);
    }
}
