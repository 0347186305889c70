//! Threaded runtime driving a shared [`Metronome`].
//!
//! The metronome itself never sleeps; this module owns the one ticker
//! thread that polls it every `lookahead_interval`, and hands the UI a
//! closure-based view of the same core.
//!
//! # Example
//!
//! ```ignore
//! use saavy_metronome::{engine::SystemClock, metronome::Metronome, runtime::MetronomeRuntime};
//!
//! let mut runtime = MetronomeRuntime::new(Metronome::new(SystemClock::new(), ()));
//! runtime.with(|m| m.set_bpm(96));
//! runtime.start()?;
//! ```

mod ticker;

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use log::debug;

use crate::engine::Clock;
use crate::metronome::Metronome;
use crate::synth::SoundRenderer;

/// Shared handle to the core
pub type SharedMetronome<C, R> = Arc<Mutex<Metronome<C, R>>>;

pub struct MetronomeRuntime<C, R>
where
    C: Clock + 'static,
    R: SoundRenderer + 'static,
{
    core: SharedMetronome<C, R>,
    ticker: Option<JoinHandle<()>>,
}

impl<C, R> MetronomeRuntime<C, R>
where
    C: Clock + 'static,
    R: SoundRenderer + 'static,
{
    pub fn new(metronome: Metronome<C, R>) -> Self {
        Self {
            core: Arc::new(Mutex::new(metronome)),
            ticker: None,
        }
    }

    /// Run `f` with exclusive access to the core.
    ///
    /// Holds the same lock the ticker takes for each poll, so `f` sees and
    /// leaves a consistent tempo state between drains.
    pub fn with<T>(&self, f: impl FnOnce(&mut Metronome<C, R>) -> T) -> T {
        let mut guard = lock(&self.core);
        f(&mut guard)
    }

    /// Start playing and spawn a ticker bound to the new session
    pub fn start(&mut self) -> io::Result<()> {
        let (was_playing, session) = self.with(|m| {
            let was_playing = m.is_playing();
            m.start();
            (was_playing, m.session_id())
        });
        if was_playing {
            return Ok(());
        }

        // A ticker from an earlier session exits on its own at its next tick.
        if let Some(old) = self.ticker.take() {
            if old.is_finished() {
                let _ = old.join();
            }
        }

        match ticker::spawn(Arc::clone(&self.core), session) {
            Ok(handle) => {
                self.ticker = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.with(|m| m.stop());
                Err(err)
            }
        }
    }

    /// Stop playing. The ticker notices at its next tick and exits.
    pub fn stop(&mut self) {
        self.with(|m| m.stop());
    }

    pub fn toggle(&mut self) -> io::Result<()> {
        if self.is_playing() {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.with(|m| m.is_playing())
    }

    pub fn shared(&self) -> SharedMetronome<C, R> {
        Arc::clone(&self.core)
    }
}

impl<C, R> Drop for MetronomeRuntime<C, R>
where
    C: Clock + 'static,
    R: SoundRenderer + 'static,
{
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.ticker.take() {
            if handle.join().is_err() {
                debug!("metronome ticker panicked during shutdown");
            }
        }
    }
}

/// Lock the core, recovering from a panic on another thread
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
