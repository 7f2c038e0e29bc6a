//! Benchmarks for low-level DSP primitives.

mod curve;
mod filter;
mod oscillator;

pub use curve::bench_curve;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
