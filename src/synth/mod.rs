//! Preset rendering.
//!
//! [`SynthesisEngine`] resolves a preset id, runs its recipe and returns a
//! [`RenderPlan`]: a list of [`VoiceSpec`]s with absolute device-clock
//! times. Plans are plain data; the device turns them into graphs.

pub mod engine;
pub mod plan;
pub mod voice;
pub mod volume;

pub use engine::SynthesisEngine;
pub use plan::RenderPlan;
pub use voice::{FilterSpec, LfoSpec, SourceSpec, VoiceKind, VoiceSpec};
pub use volume::Volume;
