//! The metronome core: one owned value holding tempo state, the active play
//! session and every modifier.
//!
//! Nothing in here sleeps or spawns. Something external calls
//! [`Metronome::poll`] every few tens of milliseconds (see
//! [`crate::runtime::MetronomeRuntime`]) and the metronome commits whatever
//! falls inside the lookahead horizon to the renderer.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::engine::{
    Clock, EventSink, LookaheadScheduler, ScheduledEvent, SchedulerConfig, VisualCue,
};
use crate::modifiers::accent::MAX_ACCENT_VOLUME;
use crate::modifiers::{
    Dynamics, MutedBars, MutedBarsConfig, PracticeStats, PracticeTimer, TempoTrainer, TimerMode,
    TimerTick, TrainerConfig,
};
use crate::notify::{Notification, NotificationSink};
use crate::sequencing::{
    Position, Subdivision, TapTempo, TempoError, TempoState, TimeSignature, DEFAULT_BPM,
};
use crate::setlist::{Setlist, SetlistEntry};
use crate::settings::Settings;
use crate::synth::{SoundRenderer, SoundType};

/// State that only exists while playing
struct Session {
    scheduler: LookaheadScheduler,
    trainer: Option<TempoTrainer>,
    /// Clock time the session started at
    started_at: f64,
    /// Whole seconds already handed to the trainer and timer
    seconds_ticked: u64,
}

pub struct Metronome<C: Clock, R: SoundRenderer> {
    clock: C,
    renderer: R,
    sink: Box<dyn NotificationSink>,
    config: SchedulerConfig,

    tempo: TempoState,
    sound: SoundType,
    volume: f32,
    accent_volume: f32,

    muted_bars: MutedBarsConfig,
    trainer: TrainerConfig,
    timer: PracticeTimer,
    timer_enabled: bool,
    stats: PracticeStats,
    tap: TapTempo,
    setlist: Setlist,

    session: Option<Session>,
    session_id: u64,
}

impl<C: Clock, R: SoundRenderer> Metronome<C, R> {
    pub fn new(clock: C, renderer: R) -> Self {
        let defaults = Settings::default();
        Self {
            clock,
            renderer,
            sink: Box::new(()),
            config: SchedulerConfig::default(),
            tempo: TempoState::new(),
            sound: defaults.sound_type,
            volume: defaults.volume,
            accent_volume: defaults.accent_volume,
            muted_bars: MutedBarsConfig::default(),
            trainer: TrainerConfig::default(),
            timer: PracticeTimer::default(),
            timer_enabled: false,
            stats: PracticeStats::default(),
            tap: TapTempo::new(),
            setlist: Setlist::new(),
            session: None,
            session_id: 0,
        }
    }

    /// Scheduler timing; takes effect on the next `start`
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_notifications(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    // ==================== TRANSPORT ====================

    /// Begin a play session on the downbeat, right now.
    ///
    /// Creates a fresh cursor and fresh modifier run-state, then commits the
    /// first events immediately. Does nothing if already playing.
    pub fn start(&mut self) {
        if self.session.is_some() {
            return;
        }

        let now = self.clock.now();
        self.session_id += 1;
        if self.timer_enabled {
            self.timer.start();
        }
        self.session = Some(Session {
            scheduler: LookaheadScheduler::new(self.config, now, MutedBars::new(self.muted_bars)),
            trainer: self.trainer.enabled.then(|| TempoTrainer::new(self.trainer)),
            started_at: now,
            seconds_ticked: 0,
        });

        info!(
            "metronome started: session {} at {} BPM, {} {}",
            self.session_id,
            self.tempo.bpm(),
            self.tempo.time_signature(),
            self.tempo.subdivision().label()
        );
        self.sink.notify(Notification::PlaybackStarted);
        self.drain(now, now);
    }

    /// End the session. Events already handed to the renderer still sound.
    pub fn stop(&mut self) {
        if self.session.take().is_none() {
            return;
        }

        let practiced = self.timer.stop();
        self.stats.record(practiced);

        info!(
            "metronome stopped: session {} ({practiced}s practiced)",
            self.session_id
        );
        self.sink.notify(Notification::PlaybackStopped);
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// One scheduler tick: commit every event inside the horizon, running
    /// any due one-second modifier ticks along the way. Returns the events
    /// committed.
    ///
    /// After a stall, each overdue second first drains what a timely poll at
    /// that second would have committed, so events keep the tempo in force
    /// when they were due and a countdown ending mid-stall still plays
    /// everything before its end.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut committed = 0;
        while let Some(second_at) = self.next_due_second(now) {
            committed += self.drain(second_at, now);
            self.run_second_tick(second_at);
        }
        committed + self.drain(now, now)
    }

    /// Commit events due before `at + schedule_ahead`
    fn drain(&mut self, at: f64, now: f64) -> usize {
        let Some(session) = self.session.as_mut() else {
            return 0;
        };

        let dynamics = Dynamics {
            volume: self.volume,
            accent_volume: self.accent_volume,
            subdivision_volume: self.config.subdivision_volume,
        };
        let mut dispatch = Dispatch {
            renderer: &mut self.renderer,
            sink: self.sink.as_mut(),
            sound: self.sound,
        };
        let horizon = at + session.scheduler.config().schedule_ahead;
        session
            .scheduler
            .drain_before(horizon, now, &self.tempo, &dynamics, &mut dispatch)
    }

    /// Clock time of the next whole session second not yet ticked, if passed
    fn next_due_second(&self, now: f64) -> Option<f64> {
        let session = self.session.as_ref()?;
        let at = session.started_at + (session.seconds_ticked + 1) as f64;
        (at <= now).then_some(at)
    }

    /// Trainer and practice timer advance in whole seconds of session time.
    fn run_second_tick(&mut self, at: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.seconds_ticked += 1;
        let elapsed = Duration::from_secs(session.seconds_ticked);

        if let Some(step) = session.trainer.as_mut().and_then(|t| t.update(elapsed)) {
            if self.tempo.bpm() != step.bpm {
                self.tempo.set_bpm(step.bpm as i64);
                self.sink.notify(Notification::BpmChanged(step.bpm));
            }
            self.sink.notify(Notification::TrainerProgress {
                bpm: step.bpm,
                progress: step.progress,
            });
            if step.complete {
                info!("tempo trainer reached {} BPM", step.bpm);
                self.sink.notify(Notification::TrainerComplete);
            }
        }

        if !self.timer_enabled {
            return;
        }
        match self.timer.tick() {
            Some(TimerTick::Running(seconds)) => {
                self.sink.notify(Notification::TimerTick { seconds });
            }
            Some(TimerTick::Finished) => {
                self.sink.notify(Notification::TimerTick { seconds: 0 });
                self.stop();
                info!("practice countdown finished");
                self.sink.notify(Notification::TimerComplete);
                self.renderer.play_completion(at);
            }
            None => {}
        }
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// Increments on every `start`; lets a ticker tell its session from a newer one
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    // ==================== TEMPO & METER ====================

    /// Set the tempo, clamped to 20..=300. Returns the stored value.
    pub fn set_bpm(&mut self, bpm: i64) -> u16 {
        let bpm = self.tempo.set_bpm(bpm);
        debug!("bpm set to {bpm}");
        bpm
    }

    pub fn adjust_bpm(&mut self, delta: i64) -> u16 {
        let bpm = self.tempo.adjust_bpm(delta);
        debug!("bpm adjusted by {delta} to {bpm}");
        bpm
    }

    /// Change the meter. While playing, the measure restarts on the downbeat
    /// at the next event.
    pub fn set_time_signature(&mut self, time_signature: TimeSignature) {
        self.tempo.set_time_signature(time_signature);
        if let Some(session) = self.session.as_mut() {
            session.scheduler.reset_position();
        }
        debug!("time signature set to {time_signature}");
    }

    /// Validate and set a meter from raw numbers
    pub fn set_meter(&mut self, beats_per_measure: u8, note_value: u8) -> Result<(), TempoError> {
        let time_signature = TimeSignature::new(beats_per_measure, note_value)?;
        self.set_time_signature(time_signature);
        Ok(())
    }

    pub fn set_subdivision(&mut self, subdivision: Subdivision) {
        self.tempo.set_subdivision(subdivision);
        debug!("subdivision set to {}", subdivision.label());
    }

    pub fn set_accent_first_beat(&mut self, accent: bool) {
        self.tempo.set_accent_first_beat(accent);
    }

    /// Register a tap. Returns the new BPM when the taps produced one.
    pub fn tap(&mut self, at: Instant) -> Option<u16> {
        let bpm = self.tap.tap(at)?;
        let bpm = self.tempo.set_bpm(bpm as i64);
        debug!("tap tempo: {bpm} BPM");
        self.sink.notify(Notification::BpmChanged(bpm));
        Some(bpm)
    }

    pub fn tempo(&self) -> &TempoState {
        &self.tempo
    }

    pub fn bpm(&self) -> u16 {
        self.tempo.bpm()
    }

    /// Where the next unscheduled event sits in the measure
    pub fn position(&self) -> Option<Position> {
        self.session
            .as_ref()
            .map(|s| s.scheduler.cursor().position())
    }

    // ==================== SOUND ====================

    pub fn set_sound_type(&mut self, sound: SoundType) {
        self.sound = sound;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_accent_volume(&mut self, accent_volume: f32) {
        self.accent_volume = accent_volume.clamp(0.0, MAX_ACCENT_VOLUME);
    }

    pub fn sound_type(&self) -> SoundType {
        self.sound
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn accent_volume(&self) -> f32 {
        self.accent_volume
    }

    // ==================== SETTINGS ====================

    pub fn settings(&self) -> Settings {
        Settings::new()
            .with_bpm(self.tempo.bpm() as i64)
            .with_time_signature(self.tempo.time_signature())
            .with_subdivision(self.tempo.subdivision())
            .with_sound(self.sound)
            .with_volume(self.volume)
            .with_accent_volume(self.accent_volume)
            .with_accent_first_beat(self.tempo.accent_first_beat())
    }

    /// Apply a full settings record. Nothing changes if the meter is invalid.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<(), TempoError> {
        let (time_signature, subdivision) = settings.validate()?;

        self.tempo.set_bpm(settings.bpm as i64);
        self.set_time_signature(time_signature);
        self.tempo.set_subdivision(subdivision);
        self.tempo.set_accent_first_beat(settings.accent_first_beat);
        self.sound = settings.sound_type;
        self.set_volume(settings.volume);
        self.set_accent_volume(settings.accent_volume);
        Ok(())
    }

    /// 120 BPM, 4/4, no subdivision, click sound. Volumes and accent are kept.
    pub fn reset_to_defaults(&mut self) {
        self.tempo.set_bpm(DEFAULT_BPM as i64);
        self.set_time_signature(TimeSignature::FOUR_FOUR);
        self.tempo.set_subdivision(Subdivision::QUARTER);
        self.sound = SoundType::Click;
        self.sink.notify(Notification::BpmChanged(DEFAULT_BPM));
        debug!("settings reset to defaults");
    }

    // ==================== MUTED BARS ====================

    /// Replace the muted-bars settings. A running cycle restarts audible.
    pub fn set_muted_bars(&mut self, config: MutedBarsConfig) {
        self.muted_bars = config;
        if let Some(session) = self.session.as_mut() {
            session.scheduler.muted_bars_mut().reconfigure(config);
        }
        debug!(
            "muted bars: enabled={} play={} silent={}",
            config.enabled,
            config.play_bars(),
            config.silent_bars()
        );
    }

    pub fn muted_bars(&self) -> MutedBarsConfig {
        self.muted_bars
    }

    /// True while a muted bar is suppressing audio
    pub fn is_silent(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.scheduler.muted_bars().is_silent())
    }

    // ==================== TEMPO TRAINER ====================

    /// Replace the trainer settings.
    ///
    /// Enabling jumps straight to the start tempo; the ramp itself begins
    /// with the next play session. Disabling cancels a running ramp.
    pub fn set_trainer(&mut self, config: TrainerConfig) {
        self.trainer = config;
        if config.enabled {
            self.tempo.set_bpm(config.start_bpm() as i64);
            self.sink.notify(Notification::BpmChanged(config.start_bpm()));
        } else if let Some(session) = self.session.as_mut() {
            session.trainer = None;
        }
        debug!(
            "tempo trainer: enabled={} {} -> {} BPM over {:?}",
            config.enabled,
            config.start_bpm(),
            config.target_bpm(),
            config.duration()
        );
    }

    pub fn trainer(&self) -> TrainerConfig {
        self.trainer
    }

    /// Whether this session's ramp is still running
    pub fn is_training(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.trainer.as_ref())
            .is_some_and(|t| !t.is_complete())
    }

    // ==================== PRACTICE TIMER ====================

    pub fn set_practice_timer_enabled(&mut self, enabled: bool) {
        self.timer_enabled = enabled;
        if !enabled {
            let practiced = self.timer.stop();
            self.stats.record(practiced);
        } else if self.is_playing() && !self.timer.is_running() {
            self.timer.start();
        }
    }

    pub fn set_timer_mode(&mut self, mode: TimerMode) {
        self.timer.set_mode(mode);
    }

    pub fn set_timer_duration(&mut self, duration: Duration) {
        self.timer.set_duration(duration);
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub fn practice_timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    pub fn timer(&self) -> &PracticeTimer {
        &self.timer
    }

    pub fn stats(&self) -> PracticeStats {
        self.stats
    }

    // ==================== SETLIST ====================

    /// Save the current tempo and feel; a blank name becomes `Song N`.
    pub fn save_to_setlist(&mut self, name: &str) -> usize {
        let index = self.setlist.push(SetlistEntry {
            name: name.to_string(),
            bpm: self.tempo.bpm(),
            time_signature: self.tempo.time_signature(),
            subdivision: self.tempo.subdivision(),
            sound_type: self.sound,
            accent_first_beat: self.tempo.accent_first_beat(),
        });
        debug!("saved setlist entry {index}");
        index
    }

    /// Recall a saved song. Returns `false` if there is no such entry.
    pub fn load_setlist_entry(&mut self, index: usize) -> bool {
        let Some(entry) = self.setlist.select(index).cloned() else {
            return false;
        };

        let bpm = self.tempo.set_bpm(entry.bpm as i64);
        self.set_time_signature(entry.time_signature);
        self.tempo.set_subdivision(entry.subdivision);
        self.tempo.set_accent_first_beat(entry.accent_first_beat);
        self.sound = entry.sound_type;

        debug!("loaded setlist entry {index}: {}", entry.name);
        self.sink.notify(Notification::BpmChanged(bpm));
        true
    }

    pub fn remove_setlist_entry(&mut self, index: usize) -> Option<SetlistEntry> {
        self.setlist.remove(index)
    }

    pub fn clear_setlist(&mut self) {
        self.setlist.clear();
    }

    pub fn setlist(&self) -> &Setlist {
        &self.setlist
    }

    // ==================== PLUMBING ====================

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

/// Routes scheduler output to the renderer and the notification sink.
struct Dispatch<'a, R: SoundRenderer> {
    renderer: &'a mut R,
    sink: &'a mut dyn NotificationSink,
    sound: SoundType,
}

impl<R: SoundRenderer> EventSink for Dispatch<'_, R> {
    fn audio(&mut self, event: &ScheduledEvent) {
        self.renderer.play(
            event.time,
            event.volume,
            event.is_accent,
            event.is_main_beat,
            self.sound,
        );
    }

    fn visual(&mut self, cue: VisualCue) {
        self.sink.notify(Notification::Beat(cue));
    }

    fn muted_bars_changed(&mut self, silent: bool) {
        debug!("muted bars: {}", if silent { "silent" } else { "playing" });
        self.sink.notify(Notification::MutedBarsChanged { silent });
    }
}
