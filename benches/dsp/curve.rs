//! Benchmarks for automation curve evaluation.

use std::hint::black_box;

use audio_cues::dsp::curve::ParamCurve;
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/curve");
    let step = 1.0 / SAMPLE_RATE as f64;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack then exponential decay, the shape of every percussive cue
        let decay = ParamCurve::decay(0.8, 0.0, 0.002, 0.5);
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                decay.fill(black_box(&mut buffer), black_box(0.1), step);
            })
        });

        // Many segments, as in a multi-burst call
        let mut stepped = ParamCurve::starting_at(0.0, 0.0);
        for i in 0..16 {
            let t = i as f64 * 0.05;
            stepped = stepped.linear_to(0.5, t + 0.01).exponential_to(0.01, t + 0.05);
        }
        group.bench_with_input(BenchmarkId::new("stepped", size), &size, |b, _| {
            b.iter(|| {
                stepped.fill(black_box(&mut buffer), black_box(0.4), step);
            })
        });
    }

    group.finish();
}
