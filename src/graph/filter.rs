use crate::{
    dsp::{
        curve::ParamCurve,
        filter::{FilterType, SVFilter},
    },
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
State-Variable Filter (SVF)
===========================

A filter removes or attenuates certain frequencies from a signal. Cues use it
two ways: to tame the buzz of a sawtooth or square call, and to carve noise
into wind, rain, applause or a jet engine.

Filter Types:
-------------

Lowpass (LP): Passes frequencies BELOW the cutoff, attenuates above.
  - Higher cutoff = brighter sound
  - Lower cutoff = darker, muffled sound
  - Use: barks, horns, the rumble of an airplane

Highpass (HP): Passes frequencies ABOVE the cutoff, attenuates below.
  - Creates thin, airy sounds
  - Use: rain drops

Bandpass (BP): Passes frequencies AROUND the cutoff, attenuates both sides.
  - Creates a focused, "telephone" quality
  - Sweeping bandpass = the whoosh of something passing by
  - Use: claps, wind, whooshes

Parameters:
-----------

Cutoff (Hz): A ParamCurve, so it can sweep with sample accuracy.
  - 200 Hz:    Muffled, like through a wall
  - 1000 Hz:   Warm, round
  - 5000 Hz:   Present, clear

Resonance: Emphasis at the cutoff frequency, 0.0 to just under 1.0.
  - 0.0:  No emphasis (gentle rolloff)
  - 0.5:  Slight peak (whistling wind)

Example usage:
  // Static lowpass on a bark
  let bark = OscNode::sawtooth(420.0).through(FilterNode::lowpass(1200.0));

  // Opening sweep on noise
  let whoosh = FilterNode::new(
      FilterType::BandPass,
      ParamCurve::starting_at(400.0, t0).exponential_to(3200.0, t0 + 0.5),
      0.3,
  );
*/

pub struct FilterNode {
    filter: SVFilter,
    cutoff: ParamCurve,
    cutoff_buffer: Vec<f32>,
}

impl FilterNode {
    pub fn new(filter_type: FilterType, cutoff: ParamCurve, resonance: f32) -> Self {
        let mut filter = SVFilter::new(filter_type, cutoff.value_at(0.0));
        filter.set_resonance(resonance);
        Self {
            filter,
            cutoff,
            cutoff_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, ParamCurve::constant(cutoff_hz), 0.0)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, ParamCurve::constant(cutoff_hz), 0.0)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, ParamCurve::constant(cutoff_hz), 0.0)
    }

    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.filter.set_resonance(resonance);
        self
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.cutoff.is_constant() {
            self.filter.render(out, ctx.sample_rate);
            return;
        }

        let cutoffs = &mut self.cutoff_buffer[..out.len()];
        self.cutoff.fill(cutoffs, ctx.time, ctx.sample_period());
        self.filter.render_swept(out, cutoffs, ctx.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extensions::NodeExt, oscillator::OscNode};

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn lowpass_darkens_a_bright_tone() {
        let ctx = RenderCtx::new(48_000.0, 0.0);

        let mut dry = OscNode::sine(6_000.0);
        let mut dry_buf = vec![0.0f32; 1024];
        dry.render_block(&mut dry_buf, &ctx);

        let mut wet = OscNode::sine(6_000.0).through(FilterNode::lowpass(300.0));
        let mut wet_buf = vec![0.0f32; 1024];
        wet.render_block(&mut wet_buf, &ctx);

        assert!(rms(&wet_buf[256..]) < rms(&dry_buf[256..]) * 0.2);
    }

    #[test]
    fn swept_cutoff_uses_clock_time() {
        // Cutoff far below the tone until t = 1.0, then wide open
        let cutoff = ParamCurve::starting_at(50.0, 0.0)
            .linear_to(50.0, 1.0)
            .linear_to(20_000.0, 1.001);
        let mut node = OscNode::sine(3_000.0).through(FilterNode::new(FilterType::LowPass, cutoff, 0.0));

        let mut closed = vec![0.0f32; 1024];
        node.render_block(&mut closed, &RenderCtx::new(48_000.0, 0.0));
        let mut open = vec![0.0f32; 1024];
        node.render_block(&mut open, &RenderCtx::new(48_000.0, 2.0));

        assert!(rms(&open[256..]) > rms(&closed[256..]) * 5.0);
    }
}
