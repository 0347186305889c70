use log::warn;
use rtrb::Producer;

use super::message::ClickTrigger;
use super::sound::{SoundType, Timbre};

/// Something that can sound a click at a precise audio-timeline time.
///
/// Called from the scheduling thread. Implementations must not block and
/// must accept times slightly in the past (play as soon as possible).
pub trait SoundRenderer: Send {
    fn play(&mut self, time: f64, volume: f32, is_accent: bool, is_main_beat: bool, sound: SoundType);

    /// Chime signalling a finished practice countdown
    fn play_completion(&mut self, time: f64);
}

/// Silent renderer, for running the scheduler without an audio device
impl SoundRenderer for () {
    fn play(&mut self, _: f64, _: f32, _: bool, _: bool, _: SoundType) {}

    fn play_completion(&mut self, _: f64) {}
}

/// Forwards clicks to a [`crate::synth::ClickSynth`] over a lock-free ring.
pub struct ClickRenderer {
    tx: Producer<ClickTrigger>,
    dropped: u64,
}

impl ClickRenderer {
    pub fn new(tx: Producer<ClickTrigger>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Triggers lost because the audio thread fell behind
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn send(&mut self, trigger: ClickTrigger) {
        if self.tx.push(trigger).is_err() {
            self.dropped += 1;
            warn!(
                "click ring full, dropped trigger at t={:.3}s ({} dropped so far)",
                trigger.time, self.dropped
            );
        }
    }
}

impl SoundRenderer for ClickRenderer {
    fn play(&mut self, time: f64, volume: f32, is_accent: bool, is_main_beat: bool, sound: SoundType) {
        self.send(ClickTrigger {
            time,
            gain: volume,
            timbre: sound.timbre(is_accent, is_main_beat),
        });
    }

    fn play_completion(&mut self, time: f64) {
        self.send(ClickTrigger {
            time,
            gain: Timbre::COMPLETION_GAIN,
            timbre: Timbre::COMPLETION,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtrb::RingBuffer;

    #[test]
    fn play_builds_the_matching_timbre() {
        let (tx, mut rx) = RingBuffer::new(4);
        let mut renderer = ClickRenderer::new(tx);

        renderer.play(1.25, 0.6, false, true, SoundType::Wood);
        let trigger = rx.pop().unwrap();

        assert_eq!(trigger.time, 1.25);
        assert_eq!(trigger.gain, 0.6);
        assert_eq!(trigger.timbre, SoundType::Wood.timbre(false, true));
    }

    #[test]
    fn full_ring_drops_instead_of_blocking() {
        let (tx, _rx) = RingBuffer::new(1);
        let mut renderer = ClickRenderer::new(tx);

        renderer.play(0.0, 1.0, true, true, SoundType::Click);
        renderer.play_completion(0.1);

        assert_eq!(renderer.dropped(), 1);
    }
}
