//! Benchmarks for the nonlinear ladder filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ladder_mono::dsp::ladder::LadderFilter;

use crate::BLOCK_SIZES;

pub fn bench_ladder(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ladder");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Gentle lowpass
        let mut filter = LadderFilter::new(48_000.0);
        filter.set_frequency(1000.0);
        filter.set_q(0.5);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("static", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Near self-oscillation, driven hard
        let mut filter = LadderFilter::new(48_000.0);
        filter.set_frequency(800.0);
        filter.set_q(3.9);
        filter.set_drive(4.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("resonant", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Cutoff moved every sample, as the voice does
        let mut filter = LadderFilter::new(48_000.0);
        filter.set_q(1.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for (i, sample) in buffer.iter_mut().enumerate() {
                    filter.set_frequency(200.0 + 20.0 * i as f32);
                    *sample = filter.process(black_box(*sample));
                }
            })
        });
    }

    group.finish();
}
