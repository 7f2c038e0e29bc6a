//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! so they can live directly inside graph nodes. They stay focused on the
//! signal-processing math; the graph layer handles clock time and chaining.

/// Time-based automation curves (set, linear and exponential ramps).
pub mod curve;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Seeded white noise buffers.
pub mod noise;
/// Band-limited oscillator waveforms.
pub mod oscillator;
