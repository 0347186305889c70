use thiserror::Error;

/// Rejected meter or subdivision settings.
///
/// BPM never produces an error: it is clamped instead. These variants cover
/// values that have no sensible clamp (a measure with zero beats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TempoError {
    #[error("a measure needs at least one beat")]
    EmptyMeasure,
    #[error("note value {0} is not a power of two (2, 4, 8, 16, ...)")]
    InvalidNoteValue(u8),
    #[error("subdivision must be at least 1 pulse per beat")]
    EmptySubdivision,
}
