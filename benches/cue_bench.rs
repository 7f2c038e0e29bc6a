//! Benchmarks for DSP primitives and cue rendering.
//!
//! Run with: cargo bench
//!
//! Cues are rendered on the audio thread, so every block must finish well
//! inside its real-time deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (oscillator, filter, curves)
//!   - scenarios/*  Whole presets and overlapping cues through the device

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

pub const SAMPLE_RATE: f32 = 48_000.0;

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_oscillator,
    dsp::bench_filter,
    dsp::bench_curve,
    // Cue rendering
    scenarios::bench_presets,
    scenarios::bench_mix,
);
criterion_main!(benches);
