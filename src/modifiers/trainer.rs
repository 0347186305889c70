//! Tempo trainer - ramp BPM linearly over a practice session
//!
//! Driven by elapsed wall time rather than by the beat cursor. The owner
//! calls [`TempoTrainer::update`] about once per second and pushes the
//! returned BPM into the tempo state; the cursor picks it up on its next
//! advance, so coarse updates are enough.

use std::time::Duration;

use crate::sequencing::clamp_bpm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainerConfig {
    pub enabled: bool,
    start_bpm: u16,
    target_bpm: u16,
    duration: Duration,
}

impl TrainerConfig {
    pub fn new(enabled: bool, start_bpm: i64, target_bpm: i64, duration: Duration) -> Self {
        Self {
            enabled,
            start_bpm: clamp_bpm(start_bpm),
            target_bpm: clamp_bpm(target_bpm),
            duration,
        }
    }

    /// Ramp length given in whole minutes, the way the trainer is usually set up
    pub fn minutes(enabled: bool, start_bpm: i64, target_bpm: i64, minutes: u64) -> Self {
        Self::new(
            enabled,
            start_bpm,
            target_bpm,
            Duration::from_secs(minutes * 60),
        )
    }

    pub fn start_bpm(&self) -> u16 {
        self.start_bpm
    }

    pub fn target_bpm(&self) -> u16 {
        self.target_bpm
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self::minutes(false, 80, 120, 5)
    }
}

/// One trainer update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainerStep {
    /// Tempo to apply now
    pub bpm: u16,
    /// Ramp progress, 0.0 - 1.0
    pub progress: f64,
    /// The ramp just reached its target (reported exactly once)
    pub complete: bool,
}

/// Run-state of the ramp for one play session
#[derive(Debug, Clone)]
pub struct TempoTrainer {
    config: TrainerConfig,
    completed: bool,
}

impl TempoTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            completed: false,
        }
    }

    /// Linear interpolation between start and target at `elapsed`.
    pub fn bpm_at(&self, elapsed: Duration) -> (u16, f64) {
        let total = self.config.duration.as_secs_f64();
        let progress = if total <= 0.0 {
            1.0
        } else {
            (elapsed.as_secs_f64() / total).min(1.0)
        };

        let start = self.config.start_bpm as f64;
        let range = self.config.target_bpm as f64 - start;
        let bpm = clamp_bpm((start + range * progress).round() as i64);
        (bpm, progress)
    }

    /// Advance the ramp. Returns `None` once the ramp has completed.
    pub fn update(&mut self, elapsed: Duration) -> Option<TrainerStep> {
        if self.completed {
            return None;
        }

        let (bpm, progress) = self.bpm_at(elapsed);
        let complete = progress >= 1.0;
        self.completed = complete;

        Some(TrainerStep {
            bpm,
            progress,
            complete,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn config(&self) -> TrainerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn trainer() -> TempoTrainer {
        TempoTrainer::new(TrainerConfig::new(true, 80, 120, secs(60)))
    }

    #[test]
    fn midpoint_is_linear() {
        let mut t = trainer();
        let step = t.update(secs(30)).unwrap();
        assert_eq!(step.bpm, 100);
        assert!(!step.complete);
        assert!((step.progress - 0.5).abs() < 1e-12);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut t = trainer();
        let mut completions = 0;
        let mut last_bpm = 0;

        for s in 0..=90 {
            if let Some(step) = t.update(secs(s)) {
                last_bpm = step.bpm;
                if step.complete {
                    completions += 1;
                }
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(last_bpm, 120);
        assert!(t.is_complete());
    }

    #[test]
    fn overshoot_holds_target() {
        let t = trainer();
        assert_eq!(t.bpm_at(secs(600)), (120, 1.0));
    }

    #[test]
    fn ramps_down_as_well() {
        let t = TempoTrainer::new(TrainerConfig::new(true, 160, 100, secs(120)));
        assert_eq!(t.bpm_at(secs(60)).0, 130);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut t = TempoTrainer::new(TrainerConfig::new(true, 90, 110, Duration::ZERO));
        let step = t.update(Duration::ZERO).unwrap();
        assert_eq!(step.bpm, 110);
        assert!(step.complete);
    }

    proptest! {
        #[test]
        fn bpm_stays_between_start_and_target(
            start in 20i64..=300,
            target in 20i64..=300,
            minutes in 1u64..=30,
            at in 0u64..=3600,
        ) {
            let t = TempoTrainer::new(TrainerConfig::new(true, start, target, secs(minutes * 60)));
            let (bpm, progress) = t.bpm_at(secs(at));
            let (lo, hi) = (start.min(target) as u16, start.max(target) as u16);
            prop_assert!(bpm >= lo && bpm <= hi);
            prop_assert!((0.0..=1.0).contains(&progress));
        }
    }

    #[test]
    fn config_clamps_bpm() {
        let config = TrainerConfig::new(true, 5, 900, secs(10));
        assert_eq!(config.start_bpm(), 20);
        assert_eq!(config.target_bpm(), 300);
    }
}
