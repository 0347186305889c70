//! Low-level DSP primitives used by the click voices.
//!
//! Allocation-free and realtime-safe, so they can live directly inside
//! voice structs.

/// Linear-attack, exponential-decay envelope for percussive hits.
pub mod envelope;
/// Phase-accumulating oscillator and its waveforms.
pub mod oscillator;

pub use envelope::{ClickEnvelope, EnvelopeStage};
pub use oscillator::{Oscillator, Waveform};
