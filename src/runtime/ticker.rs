use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::trace;

use super::{lock, SharedMetronome};
use crate::engine::Clock;
use crate::synth::SoundRenderer;

/// Spawn the poll loop for `session`.
///
/// Each tick takes the lock once: the playing flag and session id are checked
/// at entry, then the scheduler drains under the same guard. The thread exits
/// the first time it finds the metronome stopped or restarted.
pub(super) fn spawn<C, R>(core: SharedMetronome<C, R>, session: u64) -> io::Result<JoinHandle<()>>
where
    C: Clock + 'static,
    R: SoundRenderer + 'static,
{
    thread::Builder::new()
        .name(format!("metronome-ticker-{session}"))
        .spawn(move || run(core, session))
}

fn run<C, R>(core: SharedMetronome<C, R>, session: u64)
where
    C: Clock + 'static,
    R: SoundRenderer + 'static,
{
    loop {
        let interval = {
            let mut metronome = lock(&core);
            if !metronome.is_playing() || metronome.session_id() != session {
                trace!("ticker for session {session} exiting");
                return;
            }
            metronome.poll();
            metronome.config().lookahead_interval
        };

        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualClock;
    use crate::metronome::Metronome;
    use std::sync::Mutex;
    use std::time::Duration;

    #[test]
    fn ticker_exits_once_stopped() {
        let mut metronome = Metronome::new(ManualClock::new(0.0), ());
        metronome.start();
        let session = metronome.session_id();
        let core = Arc::new(Mutex::new(metronome));

        let handle = spawn(Arc::clone(&core), session).unwrap();
        thread::sleep(Duration::from_millis(60));
        assert!(!handle.is_finished());

        lock(&core).stop();
        thread::sleep(Duration::from_millis(200));
        assert!(handle.is_finished());
        handle.join().unwrap();
    }

    #[test]
    fn ticker_from_an_old_session_exits_after_restart() {
        let mut metronome = Metronome::new(ManualClock::new(0.0), ());
        metronome.start();
        let old_session = metronome.session_id();
        metronome.stop();
        metronome.start();
        let core = Arc::new(Mutex::new(metronome));

        let handle = spawn(Arc::clone(&core), old_session).unwrap();
        thread::sleep(Duration::from_millis(100));
        assert!(handle.is_finished());
        assert!(lock(&core).is_playing());
    }
}
