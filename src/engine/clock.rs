//! Clock sources for the audio timeline
//!
//! The scheduler only ever asks "what time is it on the audio timeline?".
//! Every clock here is monotonic and cheap to query from any thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Monotonic high-resolution time source, in seconds.
///
/// Two consecutive calls never return a decreasing value, and querying has no
/// observable side effects.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Wall-clock seconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Audio-rendering timeline: frames rendered so far divided by sample rate.
///
/// The audio callback advances it after each block; clones share the same
/// counter so the scheduler sees exactly the timeline the synth renders on.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frames: Arc<AtomicU64>,
    sample_rate: f64,
}

impl FrameClock {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    /// Frames rendered so far
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Called by the audio thread once per rendered block
    #[inline]
    pub fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::AcqRel);
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Convert an audio-timeline time into an absolute frame index
    #[inline]
    pub fn frame_at(&self, seconds: f64) -> u64 {
        (seconds.max(0.0) * self.sample_rate).round() as u64
    }
}

impl Clock for FrameClock {
    fn now(&self) -> f64 {
        self.frames() as f64 / self.sample_rate
    }
}

/// Hand-driven clock for tests and offline rendering.
///
/// Stores the time as `f64` bits in an atomic. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    /// Jump to `seconds`. Earlier values are ignored (the clock never rewinds).
    pub fn set(&self, seconds: f64) {
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (seconds > f64::from_bits(current)).then(|| seconds.to_bits())
            });
    }

    /// Move forward by `seconds` (negative values are ignored)
    pub fn advance(&self, seconds: f64) {
        self.set(self.now() + seconds.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}
