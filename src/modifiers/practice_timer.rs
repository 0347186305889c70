//! Practice timer - countdown or stopwatch alongside playback
//!
//! Ticks once per second while the metronome plays. A countdown that hits
//! zero ends the play session; the remaining time survives a manual stop so
//! the next start resumes where the user left off.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimerMode {
    /// Count down from the configured duration, then stop playback
    #[default]
    Countdown,
    /// Count up without limit
    Stopwatch,
}

/// Result of one timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Seconds shown now (remaining for countdown, elapsed for stopwatch)
    Running(u64),
    /// The countdown just reached zero
    Finished,
}

/// Lifetime practice totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PracticeStats {
    pub total_practice_secs: u64,
    pub sessions: u32,
}

impl PracticeStats {
    /// Fold one finished session in; empty sessions are not counted.
    ///
    /// `session_secs` is the time ticked during that one session, in either
    /// timer mode. A countdown paused and resumed over several sessions adds
    /// each leg separately, not its total duration minus remaining.
    pub fn record(&mut self, session_secs: u64) {
        if session_secs == 0 {
            return;
        }
        self.total_practice_secs += session_secs;
        self.sessions += 1;
    }

    pub fn total(&self) -> Duration {
        Duration::from_secs(self.total_practice_secs)
    }
}

#[derive(Debug, Clone)]
pub struct PracticeTimer {
    mode: TimerMode,
    duration_secs: u64,
    remaining_secs: u64,
    elapsed_secs: u64,
    /// Seconds ticked since the last `start`
    session_secs: u64,
    running: bool,
}

impl PracticeTimer {
    pub const DEFAULT_MINUTES: u64 = 15;

    pub fn new(mode: TimerMode, duration: Duration) -> Self {
        let duration_secs = duration.as_secs();
        Self {
            mode,
            duration_secs,
            remaining_secs: duration_secs,
            elapsed_secs: 0,
            session_secs: 0,
            running: false,
        }
    }

    /// Begin a session. A spent countdown is re-armed to the full duration.
    pub fn start(&mut self) {
        if self.mode == TimerMode::Countdown && self.remaining_secs == 0 {
            self.remaining_secs = self.duration_secs;
        }
        self.session_secs = 0;
        self.running = true;
    }

    /// Advance one second. Ignored while not running.
    pub fn tick(&mut self) -> Option<TimerTick> {
        if !self.running {
            return None;
        }

        self.session_secs += 1;
        match self.mode {
            TimerMode::Countdown => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    self.running = false;
                    Some(TimerTick::Finished)
                } else {
                    Some(TimerTick::Running(self.remaining_secs))
                }
            }
            TimerMode::Stopwatch => {
                self.elapsed_secs += 1;
                Some(TimerTick::Running(self.elapsed_secs))
            }
        }
    }

    /// Stop counting, keep the displayed value. Returns this session's seconds.
    pub fn stop(&mut self) -> u64 {
        self.running = false;
        std::mem::take(&mut self.session_secs)
    }

    /// Back to the full countdown / zero elapsed
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.elapsed_secs = 0;
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs();
        self.reset();
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds currently shown
    pub fn display_secs(&self) -> u64 {
        match self.mode {
            TimerMode::Countdown => self.remaining_secs,
            TimerMode::Stopwatch => self.elapsed_secs,
        }
    }
}

impl Default for PracticeTimer {
    fn default() -> Self {
        Self::new(
            TimerMode::Countdown,
            Duration::from_secs(Self::DEFAULT_MINUTES * 60),
        )
    }
}

impl fmt::Display for PracticeTimer {
    /// `MM:SS`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.display_secs();
        write!(f, "{:02}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(secs: u64) -> PracticeTimer {
        PracticeTimer::new(TimerMode::Countdown, Duration::from_secs(secs))
    }

    #[test]
    fn countdown_finishes_once() {
        let mut timer = countdown(3);
        timer.start();

        assert_eq!(timer.tick(), Some(TimerTick::Running(2)));
        assert_eq!(timer.tick(), Some(TimerTick::Running(1)));
        assert_eq!(timer.tick(), Some(TimerTick::Finished));
        assert_eq!(timer.tick(), None);
        assert!(!timer.is_running());
    }

    #[test]
    fn remaining_time_survives_stop() {
        let mut timer = countdown(10);
        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.stop(), 2);

        timer.start();
        assert_eq!(timer.tick(), Some(TimerTick::Running(7)));
    }

    #[test]
    fn spent_countdown_rearms_on_start() {
        let mut timer = countdown(1);
        timer.start();
        assert_eq!(timer.tick(), Some(TimerTick::Finished));

        timer.start();
        assert_eq!(timer.display_secs(), 1);
    }

    #[test]
    fn stopwatch_counts_up() {
        let mut timer = PracticeTimer::new(TimerMode::Stopwatch, Duration::ZERO);
        timer.start();
        for _ in 0..65 {
            timer.tick();
        }
        assert_eq!(timer.to_string(), "01:05");
    }

    #[test]
    fn display_is_minutes_and_seconds() {
        assert_eq!(PracticeTimer::default().to_string(), "15:00");
        assert_eq!(countdown(59).to_string(), "00:59");
    }

    #[test]
    fn stats_skip_empty_sessions() {
        let mut stats = PracticeStats::default();
        stats.record(0);
        stats.record(90);
        stats.record(30);
        assert_eq!(stats.sessions, 2);
        assert_eq!(stats.total(), Duration::from_secs(120));
    }
}
