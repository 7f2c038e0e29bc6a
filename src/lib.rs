//! Audio feedback cues.
//!
//! Plays a pre-recorded clip for a semantic sound request when one can be
//! loaded, and otherwise synthesizes an equivalent sound in real time from
//! oscillators, envelopes, filters, noise and LFOs.
//!
//! ```ignore
//! use audio_cues::{AudioCues, AudioDevice, AssetCache, DirFetcher, OutputConfig};
//!
//! let cues = AudioCues::new(
//!     AudioDevice::output(OutputConfig::default()),
//!     AssetCache::new(DirFetcher::new("/usr/share/app")),
//! );
//!
//! // Real clip if it loads, a synthesized bell if not
//! let playback = cues.play_audio_with_fallback("/sounds/match/bell.mp3", "bell", 0.6);
//! ```

pub mod assets;
pub mod config;
pub mod device;
pub mod dispatch;
pub mod dsp;
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod presets;
pub mod synth;

use std::sync::Arc;

pub use assets::{AssetCache, BlobFetcher, DecodedBuffer, DirFetcher, MemoryFetcher};
pub use crate::config::CueConfig;
pub use device::{AudioDevice, OutputConfig, PlaybackHandle};
pub use dispatch::{Origin, Playback, PlaybackDispatcher};
pub use synth::{RenderPlan, SynthesisEngine, Volume};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// The cue engine: one device, one asset cache, one synthesis engine.
///
/// Construct once at startup and share by reference.
pub struct AudioCues {
    device: AudioDevice,
    cache: AssetCache,
    engine: SynthesisEngine,
    default_volume: Volume,
}

impl AudioCues {
    pub fn new(device: AudioDevice, cache: AssetCache) -> Self {
        Self {
            device,
            cache,
            engine: SynthesisEngine::new(),
            default_volume: Volume::DEFAULT,
        }
    }

    /// Realtime output and on-disk assets as described by `config`.
    pub fn from_config(config: &CueConfig) -> Self {
        let root = config.asset_root().unwrap_or_else(|| std::path::Path::new("."));
        let cache = AssetCache::new(DirFetcher::new(root))
            .remember_failures(config.remember_failed_loads());
        Self::new(AudioDevice::output(config.output().clone()), cache)
            .with_default_volume(config.default_volume())
    }

    pub fn with_default_volume(mut self, volume: Volume) -> Self {
        self.default_volume = volume;
        self
    }

    pub fn device(&self) -> &AudioDevice {
        &self.device
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    fn dispatcher(&self) -> PlaybackDispatcher<'_> {
        PlaybackDispatcher::new(&self.device, &self.cache, &self.engine)
    }

    /// Play `path`, or synthesize `fallback_preset` if it cannot be loaded.
    pub fn play_audio_with_fallback(
        &self,
        path: &str,
        fallback_preset: &str,
        volume: f32,
    ) -> Playback {
        self.dispatcher().play(path, fallback_preset, Volume::new(volume))
    }

    /// [`AudioCues::play_audio_with_fallback`] at the default volume.
    pub fn play_audio_with_fallback_default(&self, path: &str, fallback_preset: &str) -> Playback {
        self.dispatcher().play(path, fallback_preset, self.default_volume)
    }

    /// Pre-warm the cache for `path`.
    pub fn load_audio(&self, path: &str) -> Option<Arc<DecodedBuffer>> {
        self.cache.load(&self.device, path)
    }

    pub fn play_synthesized(&self, preset: &str, volume: f32) -> Playback {
        self.dispatcher().synthesize(preset, Volume::new(volume))
    }

    pub fn stop(&self, playback: Playback) {
        self.device.stop(playback.handle);
    }
}
