//! Decoded asset cache.
//!
//! Pre-recorded clips are fetched through a [`BlobFetcher`], decoded once to
//! mono at the device rate and kept for the life of the cache. The first
//! buffer inserted for a path wins and never changes.
//!
//! Failed loads are retried on every call unless negative caching is
//! switched on with [`AssetCache::remember_failures`].

mod decode;
mod fetch;

use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::Arc,
};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{
    device::AudioDevice,
    error::{FetchError, LoadError},
};

pub use decode::{decode, resample, DecodedBuffer};
pub use fetch::{BlobFetcher, DirFetcher, MemoryFetcher};

pub struct AssetCache {
    fetcher: Box<dyn BlobFetcher>,
    buffers: RwLock<HashMap<String, Arc<DecodedBuffer>>>,
    failed: Option<RwLock<HashSet<String>>>,
}

impl AssetCache {
    pub fn new(fetcher: impl BlobFetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            buffers: RwLock::new(HashMap::new()),
            failed: None,
        }
    }

    /// Stop refetching paths that already failed once.
    pub fn remember_failures(mut self, remember: bool) -> Self {
        self.failed = remember.then(|| RwLock::new(HashSet::new()));
        self
    }

    /// Cached buffer for `path`, loading it on first use.
    ///
    /// Returns `None` when the device has no audio (without fetching) or when
    /// the fetch or decode fails.
    pub fn load(&self, device: &AudioDevice, path: &str) -> Option<Arc<DecodedBuffer>> {
        if let Some(buffer) = self.buffers.read().get(path) {
            return Some(buffer.clone());
        }

        let sample_rate = device.sample_rate()?;

        if let Some(failed) = &self.failed {
            if failed.read().contains(path) {
                debug!(path, "skipping previously failed asset");
                return None;
            }
        }

        match self.fetch_and_decode(path, sample_rate.round() as u32) {
            Ok(buffer) => {
                info!(
                    path,
                    frames = buffer.frames(),
                    sample_rate = buffer.sample_rate,
                    "asset loaded"
                );
                let mut buffers = self.buffers.write();
                let entry = buffers
                    .entry(path.to_string())
                    .or_insert_with(|| Arc::new(buffer));
                Some(entry.clone())
            }
            Err(err) => {
                match &err {
                    LoadError::Fetch(FetchError::NotFound(_)) => {
                        debug!(path, "asset not found")
                    }
                    _ => warn!(path, err = %err, "asset unavailable"),
                }
                if let Some(failed) = &self.failed {
                    failed.write().insert(path.to_string());
                }
                None
            }
        }
    }

    fn fetch_and_decode(&self, path: &str, sample_rate: u32) -> Result<DecodedBuffer, LoadError> {
        let bytes = self.fetcher.fetch(path)?;
        let extension = Path::new(path).extension().and_then(|ext| ext.to_str());
        Ok(decode(bytes, extension, sample_rate)?)
    }

    /// Warm the cache. Returns how many of `paths` are now cached.
    pub fn preload<'a>(
        &self,
        device: &AudioDevice,
        paths: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        paths
            .into_iter()
            .filter(|path| self.load(device, path).is_some())
            .count()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.buffers.read().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.buffers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.read().is_empty()
    }

    /// Returns the total memory used by cached buffers.
    pub fn memory_size(&self) -> usize {
        self.buffers.read().values().map(|b| b.memory_size()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::Cursor,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Barrier,
        },
        thread,
    };

    fn wav(frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..frames {
                writer.write_sample((i % 64) as i16 * 256).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn fetcher() -> Arc<MemoryFetcher> {
        Arc::new(
            MemoryFetcher::new()
                .with_asset("/sounds/ui/tick.wav", wav(800))
                .with_asset("/sounds/ui/broken.wav", b"RIFF nonsense".to_vec()),
        )
    }

    #[test]
    fn second_load_is_served_from_cache() {
        let fetcher = fetcher();
        let cache = AssetCache::new(fetcher.clone());
        let device = AudioDevice::offline(8_000.0);

        let first = cache.load(&device, "/sounds/ui/tick.wav").unwrap();
        let second = cache.load(&device, "/sounds/ui/tick.wav").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.fetch_count(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.memory_size(), 800 * 4);
    }

    #[test]
    fn failures_are_retried_by_default() {
        let fetcher = fetcher();
        let cache = AssetCache::new(fetcher.clone());
        let device = AudioDevice::offline(8_000.0);

        assert!(cache.load(&device, "/sounds/ui/missing.wav").is_none());
        assert!(cache.load(&device, "/sounds/ui/broken.wav").is_none());
        assert!(cache.load(&device, "/sounds/ui/missing.wav").is_none());
        assert_eq!(fetcher.fetch_count(), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn remembered_failures_are_not_refetched() {
        let fetcher = fetcher();
        let cache = AssetCache::new(fetcher.clone()).remember_failures(true);
        let device = AudioDevice::offline(8_000.0);

        assert!(cache.load(&device, "/sounds/ui/missing.wav").is_none());
        assert!(cache.load(&device, "/sounds/ui/missing.wav").is_none());
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[test]
    fn unavailable_device_never_fetches() {
        let fetcher = fetcher();
        let cache = AssetCache::new(fetcher.clone());
        let device = AudioDevice::disabled();

        assert!(cache.load(&device, "/sounds/ui/tick.wav").is_none());
        assert_eq!(fetcher.fetch_count(), 0);
    }

    #[test]
    fn preload_counts_successes() {
        let cache = AssetCache::new(fetcher());
        let device = AudioDevice::offline(16_000.0);
        let loaded = cache.preload(
            &device,
            ["/sounds/ui/tick.wav", "/sounds/ui/missing.wav"],
        );
        assert_eq!(loaded, 1);
        assert!(cache.contains("/sounds/ui/tick.wav"));

        // Decoded at the device rate
        let buffer = cache.load(&device, "/sounds/ui/tick.wav").unwrap();
        assert_eq!(buffer.sample_rate, 16_000);
    }

    /// Holds every fetch until `threads` callers are inside it.
    struct GatedFetcher {
        gate: Barrier,
        fetches: AtomicUsize,
        bytes: Vec<u8>,
    }

    impl BlobFetcher for GatedFetcher {
        fn fetch(&self, _path: &str) -> Result<Vec<u8>, FetchError> {
            self.fetches.fetch_add(1, Ordering::Relaxed);
            self.gate.wait();
            Ok(self.bytes.clone())
        }
    }

    #[test]
    fn concurrent_first_loads_share_one_buffer() {
        const THREADS: usize = 4;
        let fetcher = Arc::new(GatedFetcher {
            gate: Barrier::new(THREADS),
            fetches: AtomicUsize::new(0),
            bytes: wav(400),
        });
        let cache = AssetCache::new(fetcher.clone());
        let device = AudioDevice::offline(8_000.0);

        let buffers: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| scope.spawn(|| cache.load(&device, "/sounds/ui/tick.wav")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
        });

        // Every caller raced past the cache, yet the first insert wins
        assert_eq!(fetcher.fetches.load(Ordering::Relaxed), THREADS);
        assert_eq!(cache.len(), 1);
        let cached = cache.load(&device, "/sounds/ui/tick.wav").unwrap();
        assert!(buffers.iter().all(|b| Arc::ptr_eq(b, &cached)));
    }
}
