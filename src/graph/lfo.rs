use crate::{
    dsp::oscillator::OscillatorBlock,
    graph::node::{GraphNode, RenderCtx},
};

/*
LFO (Low Frequency Oscillator)
==============================

An LFO is an oscillator that runs at sub-audio frequencies to modulate
parameters over time. Unlike audio oscillators (20 Hz - 20 kHz), LFOs
typically operate between 0.01 Hz - 20 Hz. The output is bipolar
(-1.0 to +1.0), so a vibrato swings the pitch sharp AND flat.

Typical Rates
-------------

    2 - 7 Hz        Vibrato sweet spot (whistles, meows, moos)
    7 - 15 Hz       Fast trill (bird chirps)
    > 15 Hz         Approaching audio rate (FM territory)

In this crate an LfoNode wraps OscillatorBlock and renders at its own fixed
rate, independent of anything else in the graph. It is consumed by
`OscNode::with_vibrato`, which sums it into the carrier's frequency.
*/

pub struct LfoNode {
    osc: OscillatorBlock,
    frequency: f32, // Fixed rate in Hz
}

impl LfoNode {
    pub fn new(osc: OscillatorBlock, frequency: f32) -> Self {
        Self { osc, frequency }
    }

    pub fn sine(frequency: f32) -> Self {
        Self::new(OscillatorBlock::sine(), frequency)
    }

    pub fn triangle(frequency: f32) -> Self {
        Self::new(OscillatorBlock::triangle(), frequency)
    }

    pub fn square(frequency: f32) -> Self {
        Self::new(OscillatorBlock::square(), frequency)
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render_fixed(out, self.frequency, ctx.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfo_output_range() {
        for mut lfo in [LfoNode::sine(5.0), LfoNode::triangle(3.0), LfoNode::square(10.0)] {
            let mut buffer = vec![0.0; 2048];
            let ctx = RenderCtx::new(48_000.0, 0.0);
            lfo.render_block(&mut buffer, &ctx);

            for &sample in &buffer {
                assert!(
                    (-1.01..=1.01).contains(&sample),
                    "LFO sample {sample} out of range [-1.0, 1.0]"
                );
            }
        }
    }

    #[test]
    fn test_lfo_completes_one_cycle_per_period() {
        // 6 Hz at 4800 Hz sample rate: one period is 800 samples
        let mut lfo = LfoNode::sine(6.0);
        let mut buffer = vec![0.0; 800];
        lfo.render_block(&mut buffer, &RenderCtx::new(4_800.0, 0.0));

        let rising = buffer.windows(2).filter(|w| w[0] < 0.0 && w[1] >= 0.0).count();
        assert!(rising <= 1, "expected at most one rising crossing, got {rising}");
        assert!(buffer[200] > 0.99, "quarter period should peak, got {}", buffer[200]);
    }
}
