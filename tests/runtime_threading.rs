//! The threaded runtime against the real clock.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use saavy_metronome::{
    engine::SystemClock,
    runtime::MetronomeRuntime,
    synth::{SoundRenderer, SoundType},
    Metronome,
};

#[derive(Clone, Default)]
struct SharedLog(Arc<Mutex<Vec<f64>>>);

impl SharedLog {
    fn times(&self) -> Vec<f64> {
        self.0.lock().unwrap().clone()
    }
}

impl SoundRenderer for SharedLog {
    fn play(&mut self, time: f64, _: f32, _: bool, _: bool, _: SoundType) {
        self.0.lock().unwrap().push(time);
    }

    fn play_completion(&mut self, _: f64) {}
}

fn runtime(bpm: i64) -> (MetronomeRuntime<SystemClock, SharedLog>, SharedLog) {
    let log = SharedLog::default();
    let mut metronome = Metronome::new(SystemClock::new(), log.clone());
    metronome.set_bpm(bpm);
    (MetronomeRuntime::new(metronome), log)
}

#[test]
fn ticker_schedules_on_a_fixed_grid() {
    let (mut rt, log) = runtime(240);
    rt.start().unwrap();
    thread::sleep(Duration::from_millis(700));
    rt.stop();

    let times = log.times();
    assert!(times.len() >= 3, "only {} clicks scheduled", times.len());
    for pair in times.windows(2) {
        assert!((pair[1] - pair[0] - 0.25).abs() < 1e-9);
    }
}

#[test]
fn stop_silences_the_ticker() {
    let (mut rt, log) = runtime(300);
    rt.start().unwrap();
    thread::sleep(Duration::from_millis(150));
    rt.stop();
    assert!(!rt.is_playing());

    let after_stop = log.times().len();
    thread::sleep(Duration::from_millis(300));
    assert_eq!(log.times().len(), after_stop);
}

#[test]
fn restart_spawns_a_fresh_session() {
    let (mut rt, log) = runtime(120);
    rt.start().unwrap();
    rt.stop();
    rt.start().unwrap();
    rt.start().unwrap();
    assert_eq!(rt.with(|m| m.session_id()), 2);

    thread::sleep(Duration::from_millis(100));
    rt.stop();

    // one downbeat per session; the second start was a no-op
    assert_eq!(log.times().len(), 2);
}
