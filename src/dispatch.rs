use tracing::debug;

use crate::{
    assets::AssetCache,
    device::{AudioDevice, PlaybackHandle},
    synth::{engine::SynthesisEngine, voice::VoiceSpec, volume::Volume},
};

/// Where a playback's audio came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A cached pre-recorded clip.
    Asset,
    /// A synthesized preset.
    Synthesized,
}

/// Result of a play call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    pub handle: PlaybackHandle,
    pub origin: Origin,
}

impl Playback {
    pub fn used_real_asset(&self) -> bool {
        self.origin == Origin::Asset
    }
}

/// Chooses between a cached clip and its synthesized fallback.
pub struct PlaybackDispatcher<'a> {
    device: &'a AudioDevice,
    cache: &'a AssetCache,
    engine: &'a SynthesisEngine,
}

impl<'a> PlaybackDispatcher<'a> {
    pub fn new(device: &'a AudioDevice, cache: &'a AssetCache, engine: &'a SynthesisEngine) -> Self {
        Self {
            device,
            cache,
            engine,
        }
    }

    /// Play the clip at `path`, or `fallback` when it cannot be loaded.
    ///
    /// The decision is made after the load resolves, so exactly one of the
    /// two is ever scheduled per call.
    pub fn play(&self, path: &str, fallback: &str, volume: Volume) -> Playback {
        match self.cache.load(self.device, path) {
            Some(buffer) => {
                let now = self.device.current_time().unwrap_or(0.0);
                let voice = VoiceSpec::buffer(buffer, volume.get(), now);
                let handle = self.device.schedule(path, &[voice]);
                debug!(path, volume = volume.get(), "playing asset");
                Playback {
                    handle,
                    origin: Origin::Asset,
                }
            }
            None => {
                debug!(path, preset = fallback, "asset unavailable, synthesizing");
                self.synthesize(fallback, volume)
            }
        }
    }

    /// Play a preset directly, bypassing the cache.
    pub fn synthesize(&self, preset: &str, volume: Volume) -> Playback {
        let now = self.device.current_time().unwrap_or(0.0);
        let plan = self.engine.render(preset, volume, now);
        Playback {
            handle: self.device.schedule_plan(&plan),
            origin: Origin::Synthesized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assets::MemoryFetcher, synth::voice::VoiceKind};

    #[test]
    fn miss_falls_back_to_preset() {
        let device = AudioDevice::offline(48_000.0);
        let cache = AssetCache::new(MemoryFetcher::new());
        let engine = SynthesisEngine::new();
        let dispatcher = PlaybackDispatcher::new(&device, &cache, &engine);

        let playback = dispatcher.play("/sounds/x/missing.mp3", "tap", Volume::DEFAULT);
        assert!(!playback.used_real_asset());

        let records = device.scheduled();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "tap");
        assert_eq!(records[0].count(VoiceKind::Oscillator), 1);
    }

    #[test]
    fn synthesize_uses_device_clock() {
        let device = AudioDevice::offline(1_000.0);
        device.render(2_500);
        let cache = AssetCache::new(MemoryFetcher::new());
        let engine = SynthesisEngine::new();

        PlaybackDispatcher::new(&device, &cache, &engine).synthesize("pop", Volume::FULL);
        let records = device.scheduled();
        assert!((records[0].voices[0].start - 2.5).abs() < 1e-9);
    }
}
