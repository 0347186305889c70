use std::time::Duration;

use crate::modifiers::accent::DEFAULT_SUBDIVISION_VOLUME;

/// Timing knobs of the lookahead loop.
///
/// `schedule_ahead` must exceed `lookahead_interval` plus the worst wakeup
/// jitter of the host, or clicks arrive late.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// How often the scheduler wakes up
    pub lookahead_interval: Duration,
    /// How far past "now" events are committed, in seconds
    pub schedule_ahead: f64,
    /// Gain multiplier for subdivision pulses
    pub subdivision_volume: f32,
}

impl SchedulerConfig {
    pub const DEFAULT_LOOKAHEAD_INTERVAL: Duration = Duration::from_millis(25);
    pub const DEFAULT_SCHEDULE_AHEAD: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            lookahead_interval: Self::DEFAULT_LOOKAHEAD_INTERVAL,
            schedule_ahead: Self::DEFAULT_SCHEDULE_AHEAD,
            subdivision_volume: DEFAULT_SUBDIVISION_VOLUME,
        }
    }

    pub fn with_lookahead_interval(mut self, interval: Duration) -> Self {
        self.lookahead_interval = interval;
        self
    }

    pub fn with_schedule_ahead(mut self, seconds: f64) -> Self {
        self.schedule_ahead = seconds.max(0.0);
        self
    }

    pub fn with_subdivision_volume(mut self, volume: f32) -> Self {
        self.subdivision_volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Whether the horizon covers at least one full wakeup interval
    pub fn is_sound(&self) -> bool {
        self.schedule_ahead > self.lookahead_interval.as_secs_f64()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
