//! Tap tempo - derive BPM from the spacing of user taps

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::tempo::{MAX_BPM, MIN_BPM};

/// Taps further apart than this start a new measurement
pub const TAP_RESET_AFTER: Duration = Duration::from_millis(2000);
/// Only the most recent taps are averaged
pub const MAX_TAPS: usize = 8;

/// Collects tap timestamps and averages their intervals.
#[derive(Debug, Clone, Default)]
pub struct TapTempo {
    taps: VecDeque<Instant>,
}

impl TapTempo {
    pub fn new() -> Self {
        Self {
            taps: VecDeque::with_capacity(MAX_TAPS),
        }
    }

    /// Register a tap at `at`.
    ///
    /// Returns the averaged BPM once at least two taps are in the window and
    /// the result is playable; an out-of-range result is ignored (`None`) so
    /// the caller keeps its previous tempo.
    pub fn tap(&mut self, at: Instant) -> Option<u16> {
        if let Some(&last) = self.taps.back() {
            if at.saturating_duration_since(last) > TAP_RESET_AFTER {
                self.taps.clear();
            }
        }

        self.taps.push_back(at);
        if self.taps.len() > MAX_TAPS {
            self.taps.pop_front();
        }

        if self.taps.len() < 2 {
            return None;
        }

        // Consecutive intervals telescope to last - first
        let (first, last) = (self.taps.front()?, self.taps.back()?);
        let span = last.saturating_duration_since(*first).as_secs_f64();
        let average = span / (self.taps.len() - 1) as f64;
        if average <= 0.0 {
            return None;
        }

        let bpm = (60.0 / average).round();
        if bpm >= MIN_BPM as f64 && bpm <= MAX_BPM as f64 {
            Some(bpm as u16)
        } else {
            log::trace!("tap tempo {bpm} BPM out of range, ignored");
            None
        }
    }

    /// Number of taps currently in the averaging window
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn clear(&mut self) {
        self.taps.clear();
    }
}
