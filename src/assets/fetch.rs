use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::RwLock;

use crate::error::FetchError;

/// Source of raw asset bytes, keyed by asset path (`/sounds/<group>/<name>.mp3`).
pub trait BlobFetcher: Send + Sync {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Serves asset paths from a directory on disk.
///
/// `/sounds/match/bell.mp3` maps to `<root>/sounds/match/bell.mp3`.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        // Only plain names; no escaping the root
        if relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            Some(self.root.join(relative))
        } else {
            None
        }
    }
}

impl BlobFetcher for DirFetcher {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| FetchError::NotFound(path.to_string()))?;

        std::fs::read(&file).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => FetchError::NotFound(path.to_string()),
            _ => FetchError::Io {
                path: path.to_string(),
                source,
            },
        })
    }
}

/// In-memory assets. Counts every fetch, which makes cache behaviour
/// observable.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    entries: RwLock<HashMap<String, Result<Vec<u8>, u16>>>,
    fetches: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` for `path`.
    pub fn with_asset(self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(path, bytes);
        self
    }

    /// Answer `path` with a transport failure status.
    pub fn with_status(self, path: impl Into<String>, status: u16) -> Self {
        self.entries.write().insert(path.into(), Err(status));
        self
    }

    pub fn insert(&self, path: impl Into<String>, bytes: Vec<u8>) {
        self.entries.write().insert(path.into(), Ok(bytes));
    }

    /// Total number of fetch calls so far, hits and misses alike.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl BlobFetcher for MemoryFetcher {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        match self.entries.read().get(path) {
            Some(Ok(bytes)) => Ok(bytes.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                path: path.to_string(),
                status: *status,
            }),
            None => Err(FetchError::NotFound(path.to_string())),
        }
    }
}

impl<F: BlobFetcher + ?Sized> BlobFetcher for std::sync::Arc<F> {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(path)
    }
}
