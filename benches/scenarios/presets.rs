//! Benchmarks for rendering one preset's voices.

use std::hint::black_box;

use audio_cues::{
    graph::node::{GraphNode, RenderCtx},
    SynthesisEngine, Volume,
};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

/// Presets covering each voice shape: single tone, vibrato, partials,
/// filtered noise, noise swarm and glided calls.
const PRESETS: &[&str] = &["pop", "whistle", "bell", "wind", "applause", "siren"];

fn render_all(voices: &mut [Box<dyn GraphNode>], buffer: &mut [f32], ctx: &RenderCtx) {
    for voice in voices.iter_mut() {
        voice.render_block(buffer, ctx);
    }
}

pub fn bench_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/presets");
    let engine = SynthesisEngine::new();
    // Measure near the start of each cue, where every voice is sounding
    let ctx = RenderCtx::new(SAMPLE_RATE, 0.01);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for &preset in PRESETS {
            let plan = engine.render(preset, Volume::DEFAULT, 0.0);
            let mut voices: Vec<Box<dyn GraphNode>> =
                plan.voices.iter().map(|v| v.build(SAMPLE_RATE)).collect();

            group.bench_with_input(BenchmarkId::new(preset, size), &size, |b, _| {
                b.iter(|| {
                    render_all(black_box(&mut voices), black_box(&mut buffer), &ctx);
                })
            });
        }
    }

    group.finish();
}
