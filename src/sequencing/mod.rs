pub mod cursor;
pub mod error;
pub mod subdivision;
pub mod tap_tempo;
pub mod tempo;
pub mod time_signature;

pub use cursor::{Advance, BeatCursor, Position};
pub use error::TempoError;
pub use subdivision::Subdivision;
pub use tap_tempo::TapTempo;
pub use tempo::{clamp_bpm, TempoState, DEFAULT_BPM, MAX_BPM, MIN_BPM};
pub use time_signature::TimeSignature;
