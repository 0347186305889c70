use super::{subdivision::Subdivision, time_signature::TimeSignature};

/// Slowest tempo the metronome will play
pub const MIN_BPM: u16 = 20;
/// Fastest tempo the metronome will play
pub const MAX_BPM: u16 = 300;
pub const DEFAULT_BPM: u16 = 120;

/// Clamp any integer tempo into `[MIN_BPM, MAX_BPM]`.
#[inline]
pub fn clamp_bpm(bpm: i64) -> u16 {
    bpm.clamp(MIN_BPM as i64, MAX_BPM as i64) as u16
}

/// User-facing tempo settings read by the scheduler on every advance.
///
/// Changes only shape events that have not been emitted yet: the scheduler
/// reads this state at the moment it advances the cursor, never retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoState {
    bpm: u16,
    time_signature: TimeSignature,
    subdivision: Subdivision,
    accent_first_beat: bool,
}

impl TempoState {
    pub fn new() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            time_signature: TimeSignature::FOUR_FOUR,
            subdivision: Subdivision::QUARTER,
            accent_first_beat: true,
        }
    }

    /// Set the tempo, clamping out-of-range input. Returns the stored value.
    pub fn set_bpm(&mut self, bpm: i64) -> u16 {
        self.bpm = clamp_bpm(bpm);
        self.bpm
    }

    /// Nudge the tempo by `delta` BPM (arrow keys: ±1, with shift ±10).
    pub fn adjust_bpm(&mut self, delta: i64) -> u16 {
        self.set_bpm((self.bpm as i64).saturating_add(delta))
    }

    /// Replace the meter.
    ///
    /// This does not touch any running cursor; the owner of the cursor is
    /// responsible for resetting its counters when a session is active.
    pub fn set_time_signature(&mut self, time_signature: TimeSignature) {
        self.time_signature = time_signature;
    }

    pub fn set_subdivision(&mut self, subdivision: Subdivision) {
        self.subdivision = subdivision;
    }

    pub fn set_accent_first_beat(&mut self, accent: bool) {
        self.accent_first_beat = accent;
    }

    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.time_signature.beats_per_measure()
    }

    pub fn subdivision(&self) -> Subdivision {
        self.subdivision
    }

    pub fn accent_first_beat(&self) -> bool {
        self.accent_first_beat
    }

    /// Length of one beat at the current tempo
    #[inline]
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm as f64
    }

    /// Spacing between consecutive scheduled events
    #[inline]
    pub fn seconds_per_subdivision(&self) -> f64 {
        self.seconds_per_beat() / self.subdivision.count() as f64
    }
}

impl Default for TempoState {
    fn default() -> Self {
        Self::new()
    }
}
