use crate::sequencing::Position;

/// Default gain of every click
pub const DEFAULT_VOLUME: f32 = 0.75;
/// Default multiplier applied to the accented downbeat
pub const DEFAULT_ACCENT_VOLUME: f32 = 1.3;
/// Default multiplier applied to subdivision pulses between beats
pub const DEFAULT_SUBDIVISION_VOLUME: f32 = 0.6;
/// Upper bound for the accent multiplier
pub const MAX_ACCENT_VOLUME: f32 = 2.0;

/// How a position sounds: accented downbeat, plain beat, or subdivision pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emphasis {
    pub is_accent: bool,
    pub is_main_beat: bool,
}

impl Emphasis {
    /// Derive emphasis for a position. Stateless.
    pub fn at(position: Position, accent_first_beat: bool) -> Self {
        Self {
            is_accent: accent_first_beat && position.is_downbeat(),
            is_main_beat: position.is_main_beat(),
        }
    }
}

/// Gain staging for the three kinds of click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamics {
    /// Base gain, 0.0 - 1.0
    pub volume: f32,
    /// Multiplier for accents
    pub accent_volume: f32,
    /// Multiplier for subdivision pulses
    pub subdivision_volume: f32,
}

impl Dynamics {
    pub fn gain(&self, emphasis: Emphasis) -> f32 {
        let factor = if emphasis.is_accent {
            self.accent_volume
        } else if emphasis.is_main_beat {
            1.0
        } else {
            self.subdivision_volume
        };
        self.volume * factor
    }
}

impl Default for Dynamics {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            accent_volume: DEFAULT_ACCENT_VOLUME,
            subdivision_volume: DEFAULT_SUBDIVISION_VOLUME,
        }
    }
}
