//! Benchmarks for the complete mono voice.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ladder_mono::synth::{params::SynthParams, voice::MonoVoice};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === HELD NOTE ===
        // three saws into the ladder at sustain
        let mut held = MonoVoice::new(SAMPLE_RATE, SynthParams::default())
            .expect("valid voice parameters");
        held.note_on(45, 100); // A2, typical bass note

        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| {
                held.render_block(black_box(&mut buffer));
            })
        });

        // === LEGATO WITH VIBRATO ===
        // long glide, mod wheel up, resonant filter
        let params = SynthParams {
            portamento_time: 0.5,
            filter_q: 3.0,
            ..SynthParams::default()
        };
        let mut legato = MonoVoice::new(SAMPLE_RATE, params).expect("valid voice parameters");
        legato.control_change(1, 100);
        legato.note_on(45, 100);

        let mut high = true;
        group.bench_with_input(BenchmarkId::new("legato", size), &size, |b, _| {
            b.iter(|| {
                // alternate between two held notes to keep the glide moving
                if high {
                    legato.note_on(57, 100);
                } else {
                    legato.note_off(57);
                }
                high = !high;
                legato.render_block(black_box(&mut buffer));
            })
        });

        // === IDLE ===
        // silent voice, measures the early-out
        let mut idle = MonoVoice::new(SAMPLE_RATE, SynthParams::default())
            .expect("valid voice parameters");
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
