#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::TempoError;

/// Number of equal pulses each beat is split into.
///
/// 1 = beat only, 2 = eighths, 3 = triplets, 4 = sixteenths. Larger counts are
/// accepted; zero is not.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subdivision(u8);

impl Subdivision {
    pub const QUARTER: Subdivision = Subdivision(1);
    pub const EIGHTH: Subdivision = Subdivision(2);
    pub const TRIPLET: Subdivision = Subdivision(3);
    pub const SIXTEENTH: Subdivision = Subdivision(4);

    pub fn new(pulses: u8) -> Result<Self, TempoError> {
        if pulses == 0 {
            Err(TempoError::EmptySubdivision)
        } else {
            Ok(Self(pulses))
        }
    }

    /// Pulses per beat
    pub fn count(&self) -> u32 {
        self.0 as u32
    }

    /// Cycle quarter → eighth → triplet → sixteenth → quarter.
    pub fn next(&self) -> Self {
        match self.0 {
            1..=3 => Self(self.0 + 1),
            _ => Self::QUARTER,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "quarter",
            2 => "eighth",
            3 => "triplet",
            4 => "sixteenth",
            _ => "custom",
        }
    }
}

impl Default for Subdivision {
    fn default() -> Self {
        Self::QUARTER
    }
}

impl TryFrom<u8> for Subdivision {
    type Error = TempoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Subdivision> for u8 {
    fn from(value: Subdivision) -> Self {
        value.0
    }
}
