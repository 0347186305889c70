//! Snapshot of the metronome the UI draws from
//!
//! Captured under the core lock once per frame, then rendered without it.

use std::time::{Duration, Instant};

use saavy_metronome::{
    engine::Clock,
    modifiers::{PracticeStats, TimerMode},
    sequencing::{Subdivision, TimeSignature},
    synth::{SoundRenderer, SoundType},
    Metronome,
};

/// How long a beat indicator stays lit
pub const FLASH_LENGTH: Duration = Duration::from_millis(100);

#[derive(Clone, Debug)]
pub struct UiState {
    pub bpm: u16,
    pub time_signature: TimeSignature,
    pub subdivision: Subdivision,
    pub sound: SoundType,
    pub volume: f32,
    pub accent_first_beat: bool,
    pub is_playing: bool,
    pub muted_enabled: bool,
    pub is_silent: bool,
    pub trainer_enabled: bool,
    pub trainer_target: u16,
    pub trainer_progress: f64,
    pub timer_enabled: bool,
    pub timer_mode: TimerMode,
    pub timer_display: String,
    pub stats: PracticeStats,
    pub setlist: Vec<String>,
    pub setlist_current: Option<usize>,
    /// Beat currently flashing, and until when
    pub lit_beat: Option<(u32, Instant)>,
    /// One-line status message (completions, errors)
    pub status: Option<String>,
    pub sample_rate: u32,
}

impl UiState {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            bpm: 0,
            time_signature: TimeSignature::default(),
            subdivision: Subdivision::default(),
            sound: SoundType::default(),
            volume: 0.0,
            accent_first_beat: true,
            is_playing: false,
            muted_enabled: false,
            is_silent: false,
            trainer_enabled: false,
            trainer_target: 0,
            trainer_progress: 0.0,
            timer_enabled: false,
            timer_mode: TimerMode::default(),
            timer_display: String::new(),
            stats: PracticeStats::default(),
            setlist: Vec::new(),
            setlist_current: None,
            lit_beat: None,
            status: None,
            sample_rate,
        }
    }

    /// Refresh everything owned by the core; UI-only fields are kept
    pub fn capture<C: Clock, R: SoundRenderer>(&mut self, m: &Metronome<C, R>) {
        let tempo = m.tempo();
        self.bpm = tempo.bpm();
        self.time_signature = tempo.time_signature();
        self.subdivision = tempo.subdivision();
        self.accent_first_beat = tempo.accent_first_beat();
        self.sound = m.sound_type();
        self.volume = m.volume();
        self.is_playing = m.is_playing();

        self.muted_enabled = m.muted_bars().enabled;
        self.is_silent = m.is_silent();

        let trainer = m.trainer();
        self.trainer_enabled = trainer.enabled;
        self.trainer_target = trainer.target_bpm();

        self.timer_enabled = m.practice_timer_enabled();
        self.timer_mode = m.timer().mode();
        self.timer_display = m.timer().to_string();
        self.stats = m.stats();

        self.setlist = m.setlist().entries().iter().map(|e| e.name.clone()).collect();
        self.setlist_current = m.setlist().current_index();

        if !self.is_playing {
            self.lit_beat = None;
        }
    }

    /// Light `beat` now
    pub fn flash(&mut self, beat: u32, now: Instant) {
        self.lit_beat = Some((beat, now + FLASH_LENGTH));
    }

    /// Beat lit at `now`, if any
    pub fn lit_at(&self, now: Instant) -> Option<u32> {
        self.lit_beat
            .filter(|&(_, until)| now < until)
            .map(|(beat, _)| beat)
    }
}
