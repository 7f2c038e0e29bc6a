//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with the ergonomics needed to
//! describe a cue voice: block-based rendering against the device clock,
//! parameter curves and fluent chaining. A typical voice reads
//! `source.through(filter).amplify(envelope)`.

/// Multiply two signals together (gain envelopes).
pub mod amplify;
/// Gain envelope node driven by a parameter curve.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`).
pub mod extensions;
/// Topology-preserving filter node with a sweepable cutoff.
pub mod filter;
/// Low frequency oscillators for vibrato.
pub mod lfo;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;
/// One-shot playback of decoded clips and noise buffers.
pub mod sample;
/// Serial chaining of two nodes (source → effect).
pub mod through;
