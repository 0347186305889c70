//! Muted bars - alternate audible and silent measures
//!
//! A gap-click practice aid: play `play_bars` measures, go silent for
//! `silent_bars` measures, repeat. The cursor keeps advancing and the visual
//! beat keeps flashing while silent; only the renderer call is suppressed.

/// User settings for muted bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutedBarsConfig {
    pub enabled: bool,
    play_bars: u32,
    silent_bars: u32,
}

impl MutedBarsConfig {
    pub fn new(enabled: bool, play_bars: u32, silent_bars: u32) -> Self {
        Self {
            enabled,
            play_bars: play_bars.max(1),
            silent_bars: silent_bars.max(1),
        }
    }

    /// Audible measures per cycle (at least 1)
    pub fn play_bars(&self) -> u32 {
        self.play_bars
    }

    /// Silent measures per cycle (at least 1)
    pub fn silent_bars(&self) -> u32 {
        self.silent_bars
    }
}

impl Default for MutedBarsConfig {
    fn default() -> Self {
        Self::new(false, 4, 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPhase {
    Playing,
    Silent,
}

/// Run-state of the muted-bars cycle for one play session.
#[derive(Debug, Clone)]
pub struct MutedBars {
    config: MutedBarsConfig,
    phase: BarPhase,
    /// Measures completed in the current phase
    current_bar: u32,
}

impl MutedBars {
    pub fn new(config: MutedBarsConfig) -> Self {
        Self {
            config,
            phase: BarPhase::Playing,
            current_bar: 0,
        }
    }

    /// Count a finished measure. Returns the new phase when it flips.
    pub fn on_measure_boundary(&mut self) -> Option<BarPhase> {
        if !self.config.enabled {
            return None;
        }

        self.current_bar += 1;
        let limit = match self.phase {
            BarPhase::Playing => self.config.play_bars,
            BarPhase::Silent => self.config.silent_bars,
        };
        if self.current_bar < limit {
            return None;
        }

        self.current_bar = 0;
        self.phase = match self.phase {
            BarPhase::Playing => BarPhase::Silent,
            BarPhase::Silent => BarPhase::Playing,
        };
        Some(self.phase)
    }

    /// Whether the renderer should be skipped right now
    pub fn is_silent(&self) -> bool {
        self.config.enabled && self.phase == BarPhase::Silent
    }

    pub fn phase(&self) -> BarPhase {
        self.phase
    }

    pub fn current_bar(&self) -> u32 {
        self.current_bar
    }

    pub fn config(&self) -> MutedBarsConfig {
        self.config
    }

    /// Swap settings and restart the cycle from an audible first bar
    pub fn reconfigure(&mut self, config: MutedBarsConfig) {
        *self = Self::new(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_on_one_off_cycle() {
        let mut bars = MutedBars::new(MutedBarsConfig::new(true, 2, 1));
        let mut audible = Vec::new();

        for _ in 0..6 {
            audible.push(!bars.is_silent());
            bars.on_measure_boundary();
        }

        assert_eq!(audible, vec![true, true, false, true, true, false]);
    }

    #[test]
    fn transitions_are_reported_once() {
        let mut bars = MutedBars::new(MutedBarsConfig::new(true, 1, 2));
        assert_eq!(bars.on_measure_boundary(), Some(BarPhase::Silent));
        assert_eq!(bars.on_measure_boundary(), None);
        assert_eq!(bars.on_measure_boundary(), Some(BarPhase::Playing));
    }

    #[test]
    fn disabled_never_silences() {
        let mut bars = MutedBars::new(MutedBarsConfig::new(false, 1, 1));
        for _ in 0..5 {
            assert_eq!(bars.on_measure_boundary(), None);
            assert!(!bars.is_silent());
        }
        assert_eq!(bars.current_bar(), 0);
    }

    #[test]
    fn zero_bar_counts_are_raised_to_one() {
        let config = MutedBarsConfig::new(true, 0, 0);
        assert_eq!(config.play_bars(), 1);
        assert_eq!(config.silent_bars(), 1);
    }

    #[test]
    fn reconfigure_restarts_audible() {
        let mut bars = MutedBars::new(MutedBarsConfig::new(true, 1, 3));
        bars.on_measure_boundary();
        assert!(bars.is_silent());

        bars.reconfigure(MutedBarsConfig::new(true, 2, 2));
        assert!(!bars.is_silent());
        assert_eq!(bars.current_bar(), 0);
    }
}
