//! MetronomeApp - wires the audio device, the metronome core and the TUI

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use rtrb::RingBuffer;

use saavy_metronome::{
    engine::SchedulerConfig,
    io::{AudioOutput, DEFAULT_VOICES},
    notify::Notification,
    runtime::MetronomeRuntime,
    sequencing::DEFAULT_BPM,
    Metronome,
};

use super::ui::UiApp;

/// Notifications buffered between the core and the UI
const NOTIFICATION_RING_CAPACITY: usize = 256;

/// Application builder
pub struct MetronomeApp {
    bpm: i64,
    config: SchedulerConfig,
}

impl MetronomeApp {
    pub fn new() -> Self {
        Self {
            bpm: DEFAULT_BPM as i64,
            config: SchedulerConfig::default(),
        }
    }

    /// Starting tempo (clamped to the playable range)
    pub fn bpm(mut self, bpm: i64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let (output, renderer, clock) =
            AudioOutput::open(DEFAULT_VOICES).wrap_err("failed to open audio output")?;

        let (notify_tx, notify_rx) = RingBuffer::<Notification>::new(NOTIFICATION_RING_CAPACITY);
        let mut metronome = Metronome::new(clock, renderer)
            .with_config(self.config)
            .with_notifications(notify_tx);
        metronome.set_bpm(self.bpm);

        let runtime = MetronomeRuntime::new(metronome);
        let mut ui = UiApp::new(runtime, notify_rx, output.sample_rate());

        let mut terminal = ratatui::init();
        let res = ui.run(&mut terminal);
        ratatui::restore();

        // Keep the stream alive until the UI is gone
        drop(ui);
        drop(output);
        res
    }
}

impl Default for MetronomeApp {
    fn default() -> Self {
        Self::new()
    }
}
