//! Lookahead scheduler drains.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_metronome::{
    engine::{EventSink, LookaheadScheduler, ScheduledEvent, SchedulerConfig, VisualCue},
    modifiers::{Dynamics, MutedBars, MutedBarsConfig},
    sequencing::{Subdivision, TempoState},
};

/// Counts events without storing them
#[derive(Default)]
struct Counter {
    audio: usize,
    visual: usize,
}

impl EventSink for Counter {
    fn audio(&mut self, event: &ScheduledEvent) {
        black_box(event);
        self.audio += 1;
    }

    fn visual(&mut self, cue: VisualCue) {
        black_box(cue);
        self.visual += 1;
    }
}

pub fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler/drain");
    let dynamics = Dynamics::default();

    let mut tempo = TempoState::new();
    tempo.set_bpm(300);
    tempo.set_subdivision(Subdivision::SIXTEENTH);

    // === STEADY STATE ===
    // one 25 ms tick at a time, as the ticker thread runs it
    group.bench_function("steady_tick", |b| {
        let mut scheduler = LookaheadScheduler::new(
            SchedulerConfig::default(),
            0.0,
            MutedBars::new(MutedBarsConfig::default()),
        );
        let mut sink = Counter::default();
        let mut now = 0.0;
        b.iter(|| {
            now += 0.025;
            scheduler.poll(black_box(now), &tempo, &dynamics, &mut sink)
        })
    });

    // === STARVATION ===
    // a ticker that slept for N seconds drains everything it missed
    for &seconds in &[1.0f64, 10.0, 60.0] {
        group.bench_with_input(
            BenchmarkId::new("catch_up_secs", seconds as u32),
            &seconds,
            |b, &seconds| {
                b.iter(|| {
                    let mut scheduler = LookaheadScheduler::new(
                        SchedulerConfig::default(),
                        0.0,
                        MutedBars::new(MutedBarsConfig::new(true, 2, 1)),
                    );
                    let mut sink = Counter::default();
                    scheduler.poll(black_box(seconds), &tempo, &dynamics, &mut sink)
                })
            },
        );
    }

    group.finish();
}
