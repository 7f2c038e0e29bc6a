use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use parking_lot::Mutex;

use crate::{
    device::{
        mixer::{Mixer, MixerCommand, MixerQueue},
        PlaybackHandle,
    },
    synth::voice::{VoiceKind, VoiceSpec},
};

/// Voice as seen by the schedule log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSummary {
    pub kind: VoiceKind,
    pub start: f64,
    pub stop: f64,
}

impl VoiceSummary {
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}

/// One schedule call on an offline device.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRecord {
    pub handle: PlaybackHandle,
    pub label: String,
    pub voices: Vec<VoiceSummary>,
}

impl ScheduleRecord {
    pub fn count(&self, kind: VoiceKind) -> usize {
        self.voices.iter().filter(|v| v.kind == kind).count()
    }

    pub fn of_kind(&self, kind: VoiceKind) -> impl Iterator<Item = &VoiceSummary> {
        self.voices.iter().filter(move |v| v.kind == kind)
    }
}

/// Backend rendered by hand instead of by a sound card.
pub(crate) struct OfflineOutput {
    sample_rate: f32,
    clock: Arc<AtomicU64>,
    queue: Mutex<MixerQueue>,
    mixer: Mutex<Mixer>,
    log: Mutex<Vec<ScheduleRecord>>,
}

impl OfflineOutput {
    pub fn new(sample_rate: f32) -> Self {
        let clock = Arc::new(AtomicU64::new(0));
        let (mixer, queue) = Mixer::new(sample_rate, clock.clone());
        Self {
            sample_rate,
            mixer: Mutex::new(mixer),
            clock,
            queue: Mutex::new(queue),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn current_time(&self) -> f64 {
        self.clock.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    pub fn send(&self, command: MixerCommand) -> bool {
        self.queue.lock().send(command)
    }

    pub fn record(&self, handle: PlaybackHandle, label: &str, voices: &[VoiceSpec]) {
        self.log.lock().push(ScheduleRecord {
            handle,
            label: label.to_string(),
            voices: voices
                .iter()
                .map(|v| VoiceSummary {
                    kind: v.kind(),
                    start: v.start,
                    stop: v.stop,
                })
                .collect(),
        });
    }

    pub fn render(&self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.mixer.lock().render(&mut out);
        self.queue.lock().collect();
        out
    }

    pub fn scheduled(&self) -> Vec<ScheduleRecord> {
        self.log.lock().clone()
    }
}
