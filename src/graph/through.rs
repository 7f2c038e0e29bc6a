use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series, passing the output of the first (source)
into the second (effect).

How It Works:
-------------
1. Render the source into the output buffer
2. Pass that buffer through the effect (in-place processing)

  Source renders:  [0.5, 0.8, -0.3, 0.9, ...]
  Effect processes in-place (e.g., filter)
  Final output:    [0.4, 0.6, -0.2, 0.7, ...]  (filtered result)

This is different from Amplify (which multiplies). Through passes audio
through a processor that transforms it.

Common Use Cases:
-----------------

1. Shaping a call:
     let bark = OscNode::new(Waveform::Sawtooth, pitch)
         .through(FilterNode::lowpass(1200.0))
         .amplify(EnvNode::decay(0.5, t0, 0.005, t0 + 0.16));

   - Sawtooth → filter (shape tone) → envelope (shape volume)

2. Carving noise:
     let wind = SampleNode::new(noise, 48_000, t0)
         .through(FilterNode::new(FilterType::BandPass, sweep, 0.5));

Signal Flow Diagram:
--------------------
  Through: [Source] ──→ [Effect] ──→ output

  Amplify: [Signal] ──┬──→ (×) ──→ output
           [Mod]    ──┘

Choose Through when audio flows from one processor to the next.
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
