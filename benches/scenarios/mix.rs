//! Benchmarks for overlapping cues on one device.
//!
//! Cues are scheduled on an offline device and pulled through its mixer,
//! the same path the realtime callback takes.

use std::hint::black_box;

use audio_cues::{AssetCache, AudioCues, AudioDevice, MemoryFetcher};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");

    for &size in BLOCK_SIZES {
        // === LIGHT: a single notification ===
        group.bench_with_input(BenchmarkId::new("single", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let cues = AudioCues::new(
                        AudioDevice::offline(SAMPLE_RATE),
                        AssetCache::new(MemoryFetcher::new()),
                    );
                    cues.play_synthesized("success", 0.6);
                    cues
                },
                |cues| black_box(cues.device().render(size)),
                criterion::BatchSize::SmallInput,
            )
        });

        // === HEAVY: rapid-fire cues stacking up ===
        group.bench_with_input(BenchmarkId::new("stacked", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let cues = AudioCues::new(
                        AudioDevice::offline(SAMPLE_RATE),
                        AssetCache::new(MemoryFetcher::new()),
                    );
                    for preset in ["bell", "applause", "rain", "phone", "wind", "dog"] {
                        cues.play_synthesized(preset, 0.6);
                    }
                    cues
                },
                |cues| black_box(cues.device().render(size)),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
