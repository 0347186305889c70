pub mod clock;
pub mod config;
pub mod event;
pub mod scheduler;

pub use clock::{Clock, FrameClock, ManualClock, SystemClock};
pub use config::SchedulerConfig;
pub use event::{EventSink, ScheduledEvent, VisualCue};
pub use scheduler::LookaheadScheduler;
