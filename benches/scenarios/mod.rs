//! Whole-cue benchmarks.
//!
//! These model real usage: a preset's voice graphs rendered block by block,
//! and several cues overlapping on one device.

mod mix;
mod presets;

pub use mix::bench_mix;
pub use presets::bench_presets;
