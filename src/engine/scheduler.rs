//! Lookahead scheduler
//!
//! A coarse, jittery wakeup drives a precise audio timeline. On every poll
//! the scheduler commits each event whose time falls inside
//! `[now, now + schedule_ahead)`, stamping it with the exact time the cursor
//! computed. Wakeup jitter therefore never reaches the audio: it only
//! changes *when* an event is handed over, never *when* it sounds.
//!
//! If a poll is late by more than the horizon, the loop simply drains every
//! overdue event with its original timestamp. No tick is skipped and no
//! event is re-timed to "now".

use log::debug;

use super::config::SchedulerConfig;
use super::event::{EventSink, ScheduledEvent, VisualCue};
use crate::modifiers::accent::{Dynamics, Emphasis};
use crate::modifiers::muted_bars::{BarPhase, MutedBars};
use crate::sequencing::{BeatCursor, TempoState};

/// Polls above this many events are reported as a catch-up burst
const BURST_THRESHOLD: usize = 4;

/// Per-session scheduling state: the beat cursor plus the muted-bars cycle.
#[derive(Debug, Clone)]
pub struct LookaheadScheduler {
    config: SchedulerConfig,
    cursor: BeatCursor,
    muted_bars: MutedBars,
}

impl LookaheadScheduler {
    /// Fresh session whose first downbeat sounds at `start_time`
    pub fn new(config: SchedulerConfig, start_time: f64, muted_bars: MutedBars) -> Self {
        Self {
            config,
            cursor: BeatCursor::new(start_time),
            muted_bars,
        }
    }

    /// Commit every event due before `now + schedule_ahead`.
    ///
    /// `tempo` and `dynamics` are read per event, so a change made between
    /// polls shapes the very next event. Returns the number of events
    /// committed (including silent ones).
    pub fn poll(
        &mut self,
        now: f64,
        tempo: &TempoState,
        dynamics: &Dynamics,
        sink: &mut impl EventSink,
    ) -> usize {
        let horizon = now + self.config.schedule_ahead;
        self.drain_before(horizon, now, tempo, dynamics, sink)
    }

    /// Commit every event due before `horizon`, timing visual cues from `now`.
    ///
    /// Lets a late caller replay what a timely poll at an earlier instant
    /// would have committed, before changing tempo state for later events.
    pub fn drain_before(
        &mut self,
        horizon: f64,
        now: f64,
        tempo: &TempoState,
        dynamics: &Dynamics,
        sink: &mut impl EventSink,
    ) -> usize {
        let mut committed = 0;

        while self.cursor.next_event_time() < horizon {
            let position = self.cursor.position();
            let emphasis = Emphasis::at(position, tempo.accent_first_beat());
            let event = ScheduledEvent {
                beat: position.beat,
                subdivision: position.subdivision,
                time: self.cursor.next_event_time(),
                is_accent: emphasis.is_accent,
                is_main_beat: emphasis.is_main_beat,
                volume: dynamics.gain(emphasis),
            };

            // Silence is decided for the bar this event belongs to, before
            // the cursor crosses into the next one.
            if !self.muted_bars.is_silent() {
                sink.audio(&event);
            }
            if event.is_main_beat {
                sink.visual(VisualCue::for_event(&event, now));
            }

            let advance = self.cursor.advance(tempo);
            if advance.measure_boundary {
                if let Some(phase) = self.muted_bars.on_measure_boundary() {
                    sink.muted_bars_changed(phase == BarPhase::Silent);
                }
            }

            committed += 1;
        }

        if committed > BURST_THRESHOLD {
            debug!(
                "scheduler caught up {committed} events at t={now:.3}s (next at {:.3}s)",
                self.cursor.next_event_time()
            );
        }

        committed
    }

    /// Restart the measure from the downbeat without moving the pulse grid
    pub fn reset_position(&mut self) {
        self.cursor.reset_position();
    }

    pub fn cursor(&self) -> &BeatCursor {
        &self.cursor
    }

    pub fn muted_bars(&self) -> &MutedBars {
        &self.muted_bars
    }

    pub fn muted_bars_mut(&mut self) -> &mut MutedBars {
        &mut self.muted_bars
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::muted_bars::MutedBarsConfig;
    use crate::sequencing::{Subdivision, TimeSignature};
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct Recorder {
        audio: Vec<ScheduledEvent>,
        visual: Vec<VisualCue>,
        muted: Vec<bool>,
    }

    impl EventSink for Recorder {
        fn audio(&mut self, event: &ScheduledEvent) {
            self.audio.push(*event);
        }

        fn visual(&mut self, cue: VisualCue) {
            self.visual.push(cue);
        }

        fn muted_bars_changed(&mut self, silent: bool) {
            self.muted.push(silent);
        }
    }

    fn scheduler(start: f64) -> LookaheadScheduler {
        LookaheadScheduler::new(
            SchedulerConfig::default(),
            start,
            MutedBars::new(MutedBarsConfig::default()),
        )
    }

    #[test]
    fn first_poll_emits_the_accented_downbeat() {
        let mut s = scheduler(0.05);
        let mut sink = Recorder::default();

        let n = s.poll(0.0, &TempoState::new(), &Dynamics::default(), &mut sink);

        assert_eq!(n, 1);
        let e = sink.audio[0];
        assert_eq!((e.beat, e.subdivision), (0, 0));
        assert!(e.is_accent && e.is_main_beat);
        assert_relative_eq!(e.time, 0.05);
        assert_relative_eq!(e.volume, 0.75 * 1.3);
        assert_eq!(sink.visual.len(), 1);
        assert_relative_eq!(s.cursor().next_event_time(), 0.55);
    }

    #[test]
    fn nothing_outside_the_horizon() {
        let mut s = scheduler(1.0);
        let mut sink = Recorder::default();
        assert_eq!(
            s.poll(0.0, &TempoState::new(), &Dynamics::default(), &mut sink),
            0
        );
        assert!(sink.audio.is_empty());
    }

    #[test]
    fn subdivision_pulses_skip_the_visual() {
        let mut tempo = TempoState::new();
        tempo.set_subdivision(Subdivision::SIXTEENTH);
        tempo.set_bpm(60);
        let mut s = scheduler(0.0);
        let mut sink = Recorder::default();

        // 0.25 s spacing: events at 0.0 .. 0.75 fall before 0.9
        s.poll(0.8, &tempo, &Dynamics::default(), &mut sink);

        assert_eq!(sink.audio.len(), 4);
        assert_eq!(sink.visual.len(), 1);
        assert!(sink.audio[1..].iter().all(|e| !e.is_main_beat));
        assert_relative_eq!(sink.audio[1].volume, 0.75 * 0.6);
    }

    #[test]
    fn late_poll_drains_with_original_times() {
        let tempo = TempoState::new();
        let mut s = scheduler(0.0);
        let mut sink = Recorder::default();

        let n = s.poll(2.0, &tempo, &Dynamics::default(), &mut sink);

        // 0.0, 0.5, ... 2.0 are all before 2.1
        assert_eq!(n, 5);
        for (i, e) in sink.audio.iter().enumerate() {
            assert_relative_eq!(e.time, i as f64 * 0.5);
        }
        assert!(sink.visual[..4].iter().all(|c| c.delay.is_zero()));
    }

    #[test]
    fn muted_bars_silence_audio_but_keep_visuals() {
        let mut tempo = TempoState::new();
        tempo.set_time_signature(TimeSignature::TWO_FOUR);
        let mut s = LookaheadScheduler::new(
            SchedulerConfig::default(),
            0.0,
            MutedBars::new(MutedBarsConfig::new(true, 1, 1)),
        );
        let mut sink = Recorder::default();

        // two bars of 2/4 at 120 BPM: 4 events, times 0.0 .. 1.5
        s.poll(1.6, &tempo, &Dynamics::default(), &mut sink);

        assert_eq!(sink.audio.len(), 2);
        assert_eq!(sink.visual.len(), 4);
        assert_eq!(sink.muted, vec![true, false]);
    }

    #[test]
    fn drain_before_stops_at_horizon_and_cues_from_now() {
        let tempo = TempoState::new();
        let mut s = scheduler(0.0);
        let mut sink = Recorder::default();

        // events 0.0 and 0.5 fall before 1.0, cues timed from a later now
        let n = s.drain_before(1.0, 3.0, &tempo, &Dynamics::default(), &mut sink);

        assert_eq!(n, 2);
        assert_relative_eq!(s.cursor().next_event_time(), 1.0);
        assert!(sink.visual.iter().all(|c| c.delay.is_zero()));
    }

    #[test]
    fn reset_position_restarts_on_downbeat() {
        let tempo = TempoState::new();
        let mut s = scheduler(0.0);
        let mut sink = Recorder::default();
        s.poll(0.5, &tempo, &Dynamics::default(), &mut sink);
        assert_eq!(s.cursor().position().beat, 2);

        s.reset_position();
        s.poll(1.0, &tempo, &Dynamics::default(), &mut sink);

        let e = sink.audio.last().unwrap();
        assert_eq!(e.beat, 0);
        assert!(e.is_accent);
        assert_relative_eq!(e.time, 1.0);
    }
}
