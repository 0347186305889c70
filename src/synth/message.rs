use super::sound::Timbre;

/// Control-thread request for the audio thread to sound one hit.
///
/// `time` is on the audio timeline ([`crate::engine::FrameClock`]); the synth
/// starts the voice on the frame nearest to it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClickTrigger {
    pub time: f64,
    pub gain: f32,
    pub timbre: Timbre,
}
