//! metronome - terminal metronome
//!
//! Run with: cargo run --bin metronome [BPM]

mod app;
mod ui;

use app::MetronomeApp;
use color_eyre::eyre::{Result as EyreResult, WrapErr};

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let mut app = MetronomeApp::new();
    if let Some(arg) = std::env::args().nth(1) {
        let bpm: i64 = arg
            .parse()
            .wrap_err_with(|| format!("expected a BPM, got `{arg}`"))?;
        app = app.bpm(bpm);
    }

    app.run()
}
