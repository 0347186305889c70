pub mod dsp;
pub mod engine; // Clocks and the lookahead scheduler
pub mod io;
pub mod metronome;
pub mod modifiers; // Accents, muted bars, trainer, practice timer
pub mod notify;
pub mod runtime;
pub mod sequencing; // Tempo, meter and the beat cursor
pub mod setlist;
pub mod settings;
pub mod synth; // Click sounds and the realtime click synth

pub use metronome::Metronome;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
