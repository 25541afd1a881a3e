//! Shared bitmap asset cache and the loader seam.
//!
//! The cache maps an asset key (URL, path or data reference) to a record
//! that is inserted exactly once and never removed. Menus referencing the
//! same key share one load and one record. Load completion marks the record
//! loaded and invalidates every subscribed menu; the completion path must
//! tolerate firing after the requesting menu is gone, which subscriptions
//! being weak guarantees.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Weak};

use thiserror::Error;

use crate::update::Invalidator;

/// A decoded RGBA8 bitmap.
#[derive(Clone, Debug)]
pub struct Bitmap {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Raw RGBA pixel data, `width * height * 4` bytes.
    pub data: Arc<Vec<u8>>,
}

/// Errors that can occur while loading an asset.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Reading the asset's bytes failed.
    #[error("Failed to read asset {path:?}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Decoding the asset's bytes into a bitmap failed.
    #[error("Failed to decode asset '{key}': {details}")]
    Decode {
        /// The asset key that failed to decode.
        key: String,
        /// Details about the decode error.
        details: String,
    },
}

/// Result of a completed load.
pub type AssetResult = Result<Bitmap, AssetError>;

/// The seam through which asset bytes are acquired and decoded.
///
/// Only the completion contract matters to the cache: `done` is invoked at
/// most once, from any thread, when the load settles.
pub trait AssetLoader: Send + Sync {
    /// Begin loading the asset behind `key`. Must not block.
    fn load(&self, key: &str, done: Box<dyn FnOnce(AssetResult) + Send>);
}

/// Snapshot of a cache record's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    /// Registered, load still in flight (or failed silently).
    Pending,
    /// Bitmap available.
    Loaded,
}

struct AssetEntry {
    bitmap: Option<Bitmap>,
    loaded: bool,
}

/// Process-level cache of loaded and in-flight bitmaps.
///
/// Construct once per application and share between menus via `Arc`.
pub struct AssetCache {
    entries: Mutex<HashMap<String, AssetEntry>>,
    loader: Arc<dyn AssetLoader>,
    subscribers: Mutex<Vec<Weak<Invalidator>>>,
}

impl AssetCache {
    /// Create a cache backed by the given loader.
    pub fn new(loader: Arc<dyn AssetLoader>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            loader,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a menu's invalidator to be poked when any load completes.
    pub fn subscribe(&self, invalidator: &Arc<Invalidator>) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(Arc::downgrade(invalidator));
        }
    }

    /// Lifecycle state of `key`, if it was ever requested.
    pub fn status(&self, key: &str) -> Option<AssetStatus> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).map(|e| {
            if e.loaded {
                AssetStatus::Loaded
            } else {
                AssetStatus::Pending
            }
        })
    }

    /// The loaded bitmap behind `key`, if available.
    pub fn bitmap(&self, key: &str) -> Option<Bitmap> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).and_then(|e| e.bitmap.clone())
    }

    /// Number of records (pending and loaded).
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Request `key`, registering it and kicking off a load on first use.
    ///
    /// A key is inserted at most once; requesting an already-registered key
    /// never re-triggers a load, whatever its state.
    pub fn request(self: &Arc<Self>, key: &str) {
        {
            let Ok(mut entries) = self.entries.lock() else {
                return;
            };
            if entries.contains_key(key) {
                return;
            }
            entries.insert(
                key.to_string(),
                AssetEntry {
                    bitmap: None,
                    loaded: false,
                },
            );
        }

        let cache = Arc::downgrade(self);
        let done_key = key.to_string();
        self.loader.load(
            key,
            Box::new(move |result| {
                let Some(cache) = cache.upgrade() else {
                    return;
                };
                cache.complete(&done_key, result);
            }),
        );
    }

    fn complete(&self, key: &str, result: AssetResult) {
        match result {
            Ok(bitmap) => {
                if let Ok(mut entries) = self.entries.lock() {
                    if let Some(entry) = entries.get_mut(key) {
                        entry.bitmap = Some(bitmap);
                        entry.loaded = true;
                    }
                }
                self.notify();
            },
            Err(err) => {
                // The record intentionally stays pending; rendering of the
                // region that wanted it stays suspended.
                log::warn!("asset '{key}' failed to load: {err}");
            },
        }
    }

    fn notify(&self) {
        let Ok(mut subs) = self.subscribers.lock() else {
            return;
        };
        subs.retain(|weak| match weak.upgrade() {
            Some(invalidator) => {
                invalidator.invalidate();
                true
            },
            None => false,
        });
    }
}

/// Filesystem-backed loader decoding with the `image` crate on the smol
/// executor.
#[derive(Default)]
pub struct FsLoader;

impl FsLoader {
    async fn read_and_decode(key: String) -> AssetResult {
        let path = PathBuf::from(&key);
        let bytes = smol::fs::read(&path).await.map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;

        let decode_key = key.clone();
        let decoded = smol::unblock(move || {
            image::load_from_memory(&bytes).map_err(|e| AssetError::Decode {
                key: decode_key,
                details: e.to_string(),
            })
        })
        .await?;

        let rgba = decoded.to_rgba8();
        Ok(Bitmap {
            width: rgba.width(),
            height: rgba.height(),
            data: Arc::new(rgba.into_raw()),
        })
    }
}

impl AssetLoader for FsLoader {
    fn load(&self, key: &str, done: Box<dyn FnOnce(AssetResult) + Send>) {
        let key = key.to_string();
        smol::spawn(async move {
            done(Self::read_and_decode(key).await);
        })
        .detach();
    }
}

/// A loader that holds every request until told to complete it. For headless
/// tests of the deferred-render path.
#[derive(Default)]
pub struct ManualLoader {
    pending: Mutex<Vec<(String, Box<dyn FnOnce(AssetResult) + Send>)>>,
    load_count: Mutex<usize>,
}

impl ManualLoader {
    /// Create a loader with no pending requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of loads ever started.
    pub fn load_count(&self) -> usize {
        self.load_count.lock().map(|c| *c).unwrap_or(0)
    }

    /// Keys currently held.
    pub fn pending_keys(&self) -> Vec<String> {
        self.pending
            .lock()
            .map(|p| p.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    /// Complete every held request with a copy of `bitmap`.
    pub fn complete_all(&self, bitmap: &Bitmap) {
        let drained: Vec<_> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return,
        };
        for (_, done) in drained {
            done(Ok(bitmap.clone()));
        }
    }

    /// Fail every held request.
    pub fn fail_all(&self) {
        let drained: Vec<_> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return,
        };
        for (key, done) in drained {
            done(Err(AssetError::Decode {
                key,
                details: "manually failed".to_string(),
            }));
        }
    }
}

impl AssetLoader for ManualLoader {
    fn load(&self, key: &str, done: Box<dyn FnOnce(AssetResult) + Send>) {
        if let Ok(mut count) = self.load_count.lock() {
            *count += 1;
        }
        if let Ok(mut pending) = self.pending.lock() {
            pending.push((key.to_string(), done));
        }
    }
}

/// A tiny opaque bitmap, handy as a stand-in in tests.
pub fn test_bitmap(width: u32, height: u32) -> Bitmap {
    Bitmap {
        width,
        height,
        data: Arc::new(vec![0xFF; (width * height * 4) as usize]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_registers_once() {
        let loader = Arc::new(ManualLoader::new());
        let cache = Arc::new(AssetCache::new(loader.clone()));

        cache.request("icons/a.png");
        cache.request("icons/a.png");

        assert_eq!(loader.load_count(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.status("icons/a.png"), Some(AssetStatus::Pending));
    }

    #[test]
    fn test_completion_marks_loaded_and_notifies() {
        let loader = Arc::new(ManualLoader::new());
        let cache = Arc::new(AssetCache::new(loader.clone()));
        let invalidator = Arc::new(Invalidator::new());
        cache.subscribe(&invalidator);

        cache.request("logo.png");
        assert!(!invalidator.is_dirty());

        loader.complete_all(&test_bitmap(8, 4));

        assert_eq!(cache.status("logo.png"), Some(AssetStatus::Loaded));
        let bitmap = cache.bitmap("logo.png").unwrap();
        assert_eq!((bitmap.width, bitmap.height), (8, 4));
        assert!(invalidator.take());
    }

    #[test]
    fn test_failed_load_stays_pending() {
        let loader = Arc::new(ManualLoader::new());
        let cache = Arc::new(AssetCache::new(loader.clone()));

        cache.request("broken.png");
        loader.fail_all();

        assert_eq!(cache.status("broken.png"), Some(AssetStatus::Pending));
        assert!(cache.bitmap("broken.png").is_none());
        // And the failure never re-triggers a load.
        cache.request("broken.png");
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn test_completion_tolerates_dead_subscribers() {
        let loader = Arc::new(ManualLoader::new());
        let cache = Arc::new(AssetCache::new(loader.clone()));

        {
            let invalidator = Arc::new(Invalidator::new());
            cache.subscribe(&invalidator);
        }

        cache.request("logo.png");
        loader.complete_all(&test_bitmap(2, 2));
        assert_eq!(cache.status("logo.png"), Some(AssetStatus::Loaded));
    }

    #[test]
    fn test_unknown_key_has_no_status() {
        let cache = Arc::new(AssetCache::new(Arc::new(ManualLoader::new())));
        assert_eq!(cache.status("nope"), None);
        assert!(cache.is_empty());
    }
}
