//! User settings, one field per persisted key.
//!
//! Stored flat with raw numbers so a settings blob written by an older build
//! still loads; [`Settings::validate`] turns the meter fields into checked
//! types before they reach the core.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::modifiers::accent::{DEFAULT_ACCENT_VOLUME, DEFAULT_VOLUME, MAX_ACCENT_VOLUME};
use crate::sequencing::{clamp_bpm, Subdivision, TempoError, TimeSignature, DEFAULT_BPM};
use crate::synth::SoundType;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub bpm: u16,
    pub beats_per_measure: u8,
    pub note_value: u8,
    pub subdivision: u8,
    pub sound_type: SoundType,
    /// 0.0 - 1.0
    pub volume: f32,
    /// 0.0 - 2.0
    pub accent_volume: f32,
    pub accent_first_beat: bool,
}

impl Settings {
    pub fn new() -> Self {
        let ts = TimeSignature::FOUR_FOUR;
        Self {
            bpm: DEFAULT_BPM,
            beats_per_measure: ts.beats_per_measure() as u8,
            note_value: ts.note_value() as u8,
            subdivision: Subdivision::QUARTER.into(),
            sound_type: SoundType::Click,
            volume: DEFAULT_VOLUME,
            accent_volume: DEFAULT_ACCENT_VOLUME,
            accent_first_beat: true,
        }
    }

    pub fn with_bpm(mut self, bpm: i64) -> Self {
        self.bpm = clamp_bpm(bpm);
        self
    }

    pub fn with_time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.beats_per_measure = time_signature.beats_per_measure() as u8;
        self.note_value = time_signature.note_value() as u8;
        self
    }

    pub fn with_subdivision(mut self, subdivision: Subdivision) -> Self {
        self.subdivision = subdivision.into();
        self
    }

    pub fn with_sound(mut self, sound: SoundType) -> Self {
        self.sound_type = sound;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn with_accent_volume(mut self, accent_volume: f32) -> Self {
        self.accent_volume = accent_volume.clamp(0.0, MAX_ACCENT_VOLUME);
        self
    }

    pub fn with_accent_first_beat(mut self, accent: bool) -> Self {
        self.accent_first_beat = accent;
        self
    }

    /// Checked meter fields
    pub fn validate(&self) -> Result<(TimeSignature, Subdivision), TempoError> {
        let time_signature = TimeSignature::new(self.beats_per_measure, self.note_value)?;
        let subdivision = Subdivision::new(self.subdivision)?;
        Ok((time_signature, subdivision))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.bpm, 120);
        assert_eq!((s.beats_per_measure, s.note_value), (4, 4));
        assert_eq!(s.subdivision, 1);
        assert_eq!(s.sound_type, SoundType::Click);
        assert_eq!(s.volume, 0.75);
        assert_eq!(s.accent_volume, 1.3);
        assert!(s.accent_first_beat);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn builders_clamp() {
        let s = Settings::new()
            .with_bpm(900)
            .with_volume(4.0)
            .with_accent_volume(-1.0)
            .with_time_signature(TimeSignature::SIX_EIGHT);
        assert_eq!(s.bpm, 300);
        assert_eq!(s.volume, 1.0);
        assert_eq!(s.accent_volume, 0.0);
        assert_eq!(s.validate().map(|(ts, _)| ts), Ok(TimeSignature::SIX_EIGHT));
    }

    #[test]
    fn zero_beats_are_rejected() {
        let s = Settings {
            beats_per_measure: 0,
            ..Settings::default()
        };
        assert_eq!(s.validate(), Err(TempoError::EmptyMeasure));

        let s = Settings {
            subdivision: 0,
            ..Settings::default()
        };
        assert_eq!(s.validate(), Err(TempoError::EmptySubdivision));
    }
}
