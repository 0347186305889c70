//! Notifications from the metronome core to whatever UI is attached.

use log::trace;
use rtrb::Producer;

use crate::engine::VisualCue;

/// Something the UI may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    PlaybackStarted,
    PlaybackStopped,
    /// Flash the beat indicator after `cue.delay`
    Beat(VisualCue),
    /// Tempo changed from inside the core (trainer, tap, setlist)
    BpmChanged(u16),
    MutedBarsChanged { silent: bool },
    TrainerProgress { bpm: u16, progress: f64 },
    TrainerComplete,
    /// Seconds the practice timer shows now
    TimerTick { seconds: u64 },
    TimerComplete,
}

/// Receiver for [`Notification`]s. Must never block the scheduler.
pub trait NotificationSink: Send {
    fn notify(&mut self, notification: Notification);
}

/// Discard everything (headless use)
impl NotificationSink for () {
    fn notify(&mut self, _: Notification) {}
}

/// Lock-free hand-off to a UI thread; notifications are dropped when full.
impl NotificationSink for Producer<Notification> {
    fn notify(&mut self, notification: Notification) {
        if let Err(rtrb::PushError::Full(dropped)) = self.push(notification) {
            trace!("notification ring full, dropped {dropped:?}");
        }
    }
}

/// Collects notifications in memory; handy for tests and offline runs.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtrb::RingBuffer;

    #[test]
    fn ring_sink_drops_when_full() {
        let (mut tx, mut rx) = RingBuffer::new(2);
        tx.notify(Notification::PlaybackStarted);
        tx.notify(Notification::BpmChanged(90));
        tx.notify(Notification::PlaybackStopped);

        assert_eq!(rx.pop(), Ok(Notification::PlaybackStarted));
        assert_eq!(rx.pop(), Ok(Notification::BpmChanged(90)));
        assert!(rx.pop().is_err());
    }
}
