//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use audio_cues::dsp::oscillator::OscillatorBlock;
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - uses sin() transcendental function
        let mut osc = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                osc.render_fixed(black_box(&mut buffer), black_box(440.0), SAMPLE_RATE);
            })
        });

        // Sawtooth - simple linear ramp
        let mut osc = OscillatorBlock::sawtooth();
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| {
                osc.render_fixed(black_box(&mut buffer), black_box(440.0), SAMPLE_RATE);
            })
        });

        // Square - branch per sample
        let mut osc = OscillatorBlock::square();
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                osc.render_fixed(black_box(&mut buffer), black_box(440.0), SAMPLE_RATE);
            })
        });

        // Per-sample frequency, as used by glides and vibrato
        let frequencies: Vec<f32> = (0..size)
            .map(|i| 400.0 + 200.0 * i as f32 / size as f32)
            .collect();
        let mut osc = OscillatorBlock::triangle();
        group.bench_with_input(BenchmarkId::new("triangle_swept", size), &size, |b, _| {
            b.iter(|| {
                osc.render(
                    black_box(&mut buffer),
                    black_box(&frequencies),
                    SAMPLE_RATE,
                );
            })
        });
    }

    group.finish();
}
