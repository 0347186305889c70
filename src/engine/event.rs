use std::time::Duration;

/// One click decided by the scheduler.
///
/// Produced once per subdivision tick, handed to the renderer and the
/// visual path, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    /// Beat index within the measure
    pub beat: u32,
    /// Pulse index within the beat
    pub subdivision: u32,
    /// Exact audio-timeline time the click must sound at (seconds)
    pub time: f64,
    /// Emphasized downbeat
    pub is_accent: bool,
    /// On the beat itself rather than a subdivision pulse
    pub is_main_beat: bool,
    /// Final gain for the renderer
    pub volume: f32,
}

/// Best-effort prompt to flash a beat indicator.
///
/// `delay` is how long after the poll that produced it the beat actually
/// sounds; UIs fire the flash after that delay and may drop it under load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualCue {
    pub beat: u32,
    pub time: f64,
    pub delay: Duration,
}

impl VisualCue {
    /// Cue for `event` as seen from `now`; a late event fires immediately.
    pub fn for_event(event: &ScheduledEvent, now: f64) -> Self {
        let ahead = (event.time - now).max(0.0);
        Self {
            beat: event.beat,
            time: event.time,
            delay: Duration::from_secs_f64(ahead),
        }
    }
}

/// Receiver of everything a scheduler poll decides.
///
/// The scheduler stays free of renderer and UI types; the owner plugs them
/// in through this seam.
pub trait EventSink {
    /// An audible click to render at `event.time`
    fn audio(&mut self, event: &ScheduledEvent);

    /// A main-beat visual cue (also sent during muted bars)
    fn visual(&mut self, cue: VisualCue);

    /// The muted-bars modifier switched between playing and silent
    fn muted_bars_changed(&mut self, _silent: bool) {}
}
