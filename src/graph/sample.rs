use std::sync::Arc;

use crate::graph::node::{GraphNode, RenderCtx};

/*
Buffer Playback
===============

Plays a block of mono samples once, starting at a device-clock time. Used for
decoded asset clips and for the per-voice noise of texture and swarm cues.

The read position is derived from the clock rather than counted, so a node
that is rendered late (or from the middle of a block) still lines up:

    position = (ctx.time + i / sample_rate - start) × source_rate

Source and device rates may differ; fractional positions are read with
linear interpolation. Before `start` the node outputs silence; once the read
position passes the last sample it outputs silence and reports inactive.
*/

pub struct SampleNode {
    samples: Arc<[f32]>,
    source_rate: f64,
    start: f64,
    finished: bool,
}

impl SampleNode {
    pub fn new(samples: Arc<[f32]>, source_rate: u32, start: f64) -> Self {
        Self {
            finished: samples.is_empty(),
            samples,
            source_rate: source_rate as f64,
            start,
        }
    }

    /// Playback length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.source_rate
    }

    #[inline]
    fn read(&self, position: f64) -> f32 {
        let index = position.floor() as usize;
        let frac = (position - index as f64) as f32;
        let a = self.samples[index];
        let b = self.samples.get(index + 1).copied().unwrap_or(0.0);
        a + (b - a) * frac
    }
}

impl GraphNode for SampleNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let period = ctx.sample_period();
        let last = self.samples.len() as f64;

        for (i, sample) in out.iter_mut().enumerate() {
            let elapsed = ctx.time + i as f64 * period - self.start;
            if elapsed < 0.0 {
                *sample = 0.0;
                continue;
            }
            let position = elapsed * self.source_rate;
            if position >= last {
                *sample = 0.0;
                self.finished = true;
                continue;
            }
            *sample = self.read(position);
        }
    }

    fn is_active(&self) -> bool {
        !self.finished
    }
}
