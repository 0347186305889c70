//! Beat cursor - the two-level ring that walks through a measure
//!
//! Subdivision index cycles `[0, subdivision)`; each wrap bumps the beat
//! index, which cycles `[0, beats_per_measure)`; each beat wrap is a measure
//! boundary. The event time is recomputed from the tempo on every step so a
//! tempo change mid-measure glides in without a phase jump.

use super::tempo::TempoState;

/// Position of the next unscheduled event within the measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Beat index within the measure (0 = downbeat)
    pub beat: u32,
    /// Pulse index within the beat (0 = the beat itself)
    pub subdivision: u32,
}

impl Position {
    pub fn is_main_beat(&self) -> bool {
        self.subdivision == 0
    }

    pub fn is_downbeat(&self) -> bool {
        self.beat == 0 && self.subdivision == 0
    }
}

/// Outcome of a single [`BeatCursor::advance`] step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    /// Seconds the cursor moved forward
    pub step: f64,
    /// The beat index wrapped back to 0 (a new measure starts)
    pub measure_boundary: bool,
}

/// Tracks the measure position and absolute time of the next event.
///
/// Owned by the scheduler for the lifetime of one play session.
#[derive(Debug, Clone)]
pub struct BeatCursor {
    position: Position,
    /// Audio-timeline seconds of the next unscheduled event (only increases)
    next_event_time: f64,
}

impl BeatCursor {
    /// Start a fresh cursor on the downbeat at `start_time`
    pub fn new(start_time: f64) -> Self {
        Self {
            position: Position::default(),
            next_event_time: start_time,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn next_event_time(&self) -> f64 {
        self.next_event_time
    }

    /// Move to the next pulse using the tempo as it is right now.
    pub fn advance(&mut self, tempo: &TempoState) -> Advance {
        let step = tempo.seconds_per_subdivision();
        let mut measure_boundary = false;

        self.position.subdivision += 1;
        // `>=` also catches a subdivision or meter that shrank under us
        if self.position.subdivision >= tempo.subdivision().count() {
            self.position.subdivision = 0;
            self.position.beat += 1;

            if self.position.beat >= tempo.beats_per_measure() {
                self.position.beat = 0;
                measure_boundary = true;
            }
        }

        self.next_event_time += step;

        Advance {
            step,
            measure_boundary,
        }
    }

    /// Discard the mid-measure position (time signature changed while playing).
    ///
    /// The next event time is kept, so the phase reset is immediate but the
    /// pulse grid does not stutter.
    pub fn reset_position(&mut self) {
        self.position = Position::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::{Subdivision, TimeSignature};
    use approx::assert_relative_eq;

    fn tempo(bpm: i64, ts: TimeSignature, sub: Subdivision) -> TempoState {
        let mut t = TempoState::new();
        t.set_bpm(bpm);
        t.set_time_signature(ts);
        t.set_subdivision(sub);
        t
    }

    #[test]
    fn four_steps_complete_one_measure() {
        let t = tempo(120, TimeSignature::FOUR_FOUR, Subdivision::QUARTER);
        let mut cursor = BeatCursor::new(0.0);

        let boundaries = (0..4).filter(|_| cursor.advance(&t).measure_boundary).count();

        assert_eq!(cursor.position(), Position::default());
        assert_eq!(boundaries, 1);
    }

    #[test]
    fn constant_tempo_deltas_are_exact() {
        for (bpm, sub) in [(120, Subdivision::QUARTER), (97, Subdivision::TRIPLET), (300, Subdivision::SIXTEENTH)] {
            let t = tempo(bpm, TimeSignature::SEVEN_EIGHT, sub);
            let expected = 60.0 / bpm as f64 / sub.count() as f64;
            let mut cursor = BeatCursor::new(3.25);
            let mut last = cursor.next_event_time();

            for _ in 0..200 {
                cursor.advance(&t);
                let now = cursor.next_event_time();
                assert!(now > last, "event time must strictly increase");
                assert_relative_eq!(now - last, expected, epsilon = 1e-9);
                last = now;
            }
        }
    }

    #[test]
    fn subdivisions_walk_before_beats() {
        let t = tempo(60, TimeSignature::THREE_FOUR, Subdivision::EIGHTH);
        let mut cursor = BeatCursor::new(0.0);
        let mut visited = vec![cursor.position()];
        for _ in 0..6 {
            cursor.advance(&t);
            visited.push(cursor.position());
        }

        let pairs: Vec<_> = visited.iter().map(|p| (p.beat, p.subdivision)).collect();
        assert_eq!(
            pairs,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (0, 0)]
        );
    }

    #[test]
    fn live_tempo_change_applies_on_next_step() {
        let mut t = tempo(120, TimeSignature::FOUR_FOUR, Subdivision::QUARTER);
        let mut cursor = BeatCursor::new(0.0);

        cursor.advance(&t);
        assert_relative_eq!(cursor.next_event_time(), 0.5);

        t.set_bpm(60);
        cursor.advance(&t);
        assert_relative_eq!(cursor.next_event_time(), 1.5);
    }

    #[test]
    fn shrinking_meter_wraps_instead_of_overrunning() {
        let mut t = tempo(120, TimeSignature::FOUR_FOUR, Subdivision::QUARTER);
        let mut cursor = BeatCursor::new(0.0);
        for _ in 0..3 {
            cursor.advance(&t);
        }
        assert_eq!(cursor.position().beat, 3);

        t.set_time_signature(TimeSignature::TWO_FOUR);
        let step = cursor.advance(&t);
        assert!(step.measure_boundary);
        assert_eq!(cursor.position().beat, 0);
    }

    #[test]
    fn reset_position_keeps_time() {
        let t = tempo(120, TimeSignature::FOUR_FOUR, Subdivision::QUARTER);
        let mut cursor = BeatCursor::new(1.0);
        cursor.advance(&t);
        cursor.advance(&t);
        cursor.reset_position();

        assert_eq!(cursor.position(), Position::default());
        assert_relative_eq!(cursor.next_event_time(), 2.0);
    }
}
