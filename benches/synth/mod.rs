//! Click synth rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rtrb::RingBuffer;
use saavy_metronome::{
    engine::{Clock, FrameClock},
    synth::{ClickSynth, ClickTrigger, SoundType},
};

use crate::BLOCK_SIZES;

pub fn bench_click_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/click");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Re-trigger a burst of overlapping drum hits (the longest timbre)
        // every block, so all 16 voices stay busy.
        group.bench_with_input(BenchmarkId::new("16_voices", size), &size, |b, _| {
            let (mut tx, rx) = RingBuffer::new(64);
            let clock = FrameClock::new(48_000.0);
            let mut synth = ClickSynth::new(16, rx, clock.clone());

            b.iter(|| {
                let now = clock.now();
                for i in 0..4 {
                    let _ = tx.push(ClickTrigger {
                        time: now + i as f64 * 0.001,
                        gain: 0.75,
                        timbre: SoundType::Drum.timbre(i == 0, true),
                    });
                }
                synth.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
