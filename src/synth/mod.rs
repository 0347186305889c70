// Purpose: Click sounds, the realtime click synth, and the renderer seam
// the scheduler plays through

pub mod message;
pub mod poly;
pub mod renderer;
pub mod sound;
pub mod voice;

pub use message::ClickTrigger;
pub use poly::ClickSynth;
pub use renderer::{ClickRenderer, SoundRenderer};
pub use sound::{SoundType, Timbre, UnknownSound};
pub use voice::{ClickVoice, VoiceState};
