//! The shared audio output.
//!
//! [`AudioDevice`] owns one backend, opened lazily on first use:
//!
//! - `output`: a realtime cpal stream on a dedicated thread
//! - `offline`: rendered on demand with [`AudioDevice::render`], for tests
//!   and bouncing cues to WAV
//! - `disabled`: no audio at all
//!
//! Scheduling builds the voice graphs on the calling thread and hands them
//! to the [`mixer`] through a lock-free queue. When no backend can be opened
//! every operation becomes a silent no-op.

#[cfg(feature = "cpal")]
mod cpal;
pub(crate) mod mixer;
mod offline;

use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    graph::node::GraphNode,
    synth::{plan::RenderPlan, voice::VoiceSpec},
};

use mixer::MixerCommand;
pub use offline::{ScheduleRecord, VoiceSummary};

/// Settings for the realtime output stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output device name; the host default when unset.
    pub device: Option<String>,
    /// Fixed callback size in frames; the host default when unset.
    pub buffer_frames: Option<u32>,
}

/// Opaque token for one scheduled playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(pub(crate) u64);

impl PlaybackHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A voice graph bound to device frames.
pub(crate) struct ScheduledVoice {
    pub start_frame: u64,
    pub stop_frame: u64,
    pub node: Box<dyn GraphNode>,
}

impl ScheduledVoice {
    pub fn new(spec: &VoiceSpec, sample_rate: f32) -> Self {
        let to_frame = |t: f64| (t.max(0.0) * sample_rate as f64).round() as u64;
        Self {
            start_frame: to_frame(spec.start),
            stop_frame: to_frame(spec.stop),
            node: spec.build(sample_rate),
        }
    }
}

/// Everything one play call scheduled. Disposed by the mixer once every
/// voice has passed its stop frame.
pub(crate) struct PlaybackNode {
    pub handle: PlaybackHandle,
    pub voices: Vec<ScheduledVoice>,
}

enum DeviceKind {
    Output(OutputConfig),
    Offline { sample_rate: f32 },
    Disabled,
}

enum Backend {
    #[cfg(feature = "cpal")]
    Output(cpal::CpalOutput),
    Offline(offline::OfflineOutput),
}

impl Backend {
    fn sample_rate(&self) -> f32 {
        match self {
            #[cfg(feature = "cpal")]
            Backend::Output(output) => output.sample_rate(),
            Backend::Offline(offline) => offline.sample_rate(),
        }
    }

    fn current_time(&self) -> f64 {
        match self {
            #[cfg(feature = "cpal")]
            Backend::Output(output) => output.current_time(),
            Backend::Offline(offline) => offline.current_time(),
        }
    }

    fn resume(&self) {
        match self {
            #[cfg(feature = "cpal")]
            Backend::Output(output) => output.resume(),
            Backend::Offline(_) => {}
        }
    }

    fn send(&self, command: MixerCommand) -> bool {
        match self {
            #[cfg(feature = "cpal")]
            Backend::Output(output) => output.send(command),
            Backend::Offline(offline) => offline.send(command),
        }
    }
}

pub struct AudioDevice {
    kind: DeviceKind,
    backend: OnceCell<Option<Backend>>,
    next_handle: AtomicU64,
}

impl AudioDevice {
    /// Realtime output, opened on first use.
    pub fn output(config: OutputConfig) -> Self {
        Self::with_kind(DeviceKind::Output(config))
    }

    /// Device driven by [`AudioDevice::render`].
    pub fn offline(sample_rate: f32) -> Self {
        Self::with_kind(DeviceKind::Offline { sample_rate })
    }

    /// Device with no audio capability.
    pub fn disabled() -> Self {
        Self::with_kind(DeviceKind::Disabled)
    }

    fn with_kind(kind: DeviceKind) -> Self {
        Self {
            kind,
            backend: OnceCell::new(),
            next_handle: AtomicU64::new(1),
        }
    }

    fn backend(&self) -> Option<&Backend> {
        self.backend.get_or_init(|| self.open()).as_ref()
    }

    fn open(&self) -> Option<Backend> {
        match &self.kind {
            #[cfg(feature = "cpal")]
            DeviceKind::Output(config) => match cpal::CpalOutput::open(config) {
                Ok(output) => Some(Backend::Output(output)),
                Err(err) => {
                    warn!(err = %err, "audio output unavailable, cues are disabled");
                    None
                }
            },
            #[cfg(not(feature = "cpal"))]
            DeviceKind::Output(config) => {
                warn!(
                    device = config.device.as_deref().unwrap_or("default"),
                    "built without an audio backend, cues are disabled"
                );
                None
            }
            DeviceKind::Offline { sample_rate } if !sample_rate.is_finite() || *sample_rate <= 0.0 => {
                warn!(sample_rate, "invalid offline sample rate, cues are disabled");
                None
            }
            DeviceKind::Offline { sample_rate } => {
                Some(Backend::Offline(offline::OfflineOutput::new(*sample_rate)))
            }
            DeviceKind::Disabled => {
                warn!("audio device disabled, cues are silent");
                None
            }
        }
    }

    /// Opens the backend if needed and resumes it.
    fn ready(&self) -> Option<&Backend> {
        let backend = self.backend()?;
        backend.resume();
        Some(backend)
    }

    /// Output sample rate, or `None` when audio is unavailable.
    pub fn sample_rate(&self) -> Option<f32> {
        self.ready().map(Backend::sample_rate)
    }

    /// Device clock in seconds, or `None` when audio is unavailable.
    pub fn current_time(&self) -> Option<f64> {
        self.ready().map(Backend::current_time)
    }

    pub fn is_available(&self) -> bool {
        self.backend().is_some()
    }

    /// Schedule voices as one playback node.
    ///
    /// Always returns a handle; with no audio available nothing is played.
    pub fn schedule(&self, label: &str, voices: &[VoiceSpec]) -> PlaybackHandle {
        let handle = PlaybackHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let Some(backend) = self.ready() else {
            return handle;
        };

        let sample_rate = backend.sample_rate();
        let node = PlaybackNode {
            handle,
            voices: voices
                .iter()
                .map(|spec| ScheduledVoice::new(spec, sample_rate))
                .collect(),
        };

        if backend.send(MixerCommand::Play(node)) {
            if let Backend::Offline(offline) = backend {
                offline.record(handle, label, voices);
            }
            debug!(label, handle = handle.0, voices = voices.len(), "scheduled playback");
        } else {
            warn!(label, "schedule queue full, dropping playback");
        }
        handle
    }

    pub fn schedule_plan(&self, plan: &RenderPlan) -> PlaybackHandle {
        self.schedule(&plan.preset, &plan.voices)
    }

    /// Stop a playback early. Unknown or finished handles are ignored.
    pub fn stop(&self, handle: PlaybackHandle) {
        if let Some(backend) = self.backend() {
            if !backend.send(MixerCommand::Stop(handle)) {
                warn!(handle = handle.0, "schedule queue full, stop dropped");
            }
        }
    }

    /// Pull `frames` mono samples from an offline device.
    ///
    /// Returns an empty buffer for any other kind of device.
    pub fn render(&self, frames: usize) -> Vec<f32> {
        match self.backend() {
            Some(Backend::Offline(offline)) => offline.render(frames),
            _ => Vec::new(),
        }
    }

    /// Everything scheduled on an offline device so far.
    pub fn scheduled(&self) -> Vec<ScheduleRecord> {
        match self.backend() {
            Some(Backend::Offline(offline)) => offline.scheduled(),
            _ => Vec::new(),
        }
    }
}
