use crate::{
    dsp::curve::ParamCurve,
    graph::node::{GraphNode, RenderCtx},
};

/// Gain envelope rendered from an automation curve.
///
/// Used as the modulator of `.amplify()`: it writes the curve's value for
/// every sample of the block, on the device clock.
pub struct EnvNode {
    curve: ParamCurve,
}

impl EnvNode {
    pub fn new(curve: ParamCurve) -> Self {
        Self { curve }
    }

    /// Percussive envelope: linear attack to `peak`, exponential decay.
    pub fn decay(peak: f32, start: f64, attack: f64, end: f64) -> Self {
        Self::new(ParamCurve::decay(peak, start, attack, end))
    }

    pub fn curve(&self) -> &ParamCurve {
        &self.curve
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.curve.fill(out, ctx.time, ctx.sample_period());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::curve::EPSILON;

    #[test]
    fn envelope_tracks_clock() {
        let mut env = EnvNode::decay(0.8, 1.0, 0.01, 1.5);
        let mut buffer = vec![0.0f32; 64];

        // Before the start the gain is silent
        env.render_block(&mut buffer, &RenderCtx::new(1_000.0, 0.5));
        assert!(buffer.iter().all(|&g| g == 0.0));

        // At the end of the attack the gain hits the peak
        env.render_block(&mut buffer, &RenderCtx::new(1_000.0, 1.01));
        assert!((buffer[0] - 0.8).abs() < 1e-4, "got {}", buffer[0]);

        // After the decay only the floor remains
        env.render_block(&mut buffer, &RenderCtx::new(1_000.0, 2.0));
        assert!(buffer.iter().all(|&g| g <= EPSILON * 1.01));
    }
}
