//! Modifiers layered on top of the plain click: accents, muted bars,
//! the tempo trainer and the practice timer.

pub mod accent;
pub mod muted_bars;
pub mod practice_timer;
pub mod trainer;

pub use accent::{Dynamics, Emphasis};
pub use muted_bars::{BarPhase, MutedBars, MutedBarsConfig};
pub use practice_timer::{PracticeStats, PracticeTimer, TimerMode, TimerTick};
pub use trainer::{TempoTrainer, TrainerConfig, TrainerStep};
