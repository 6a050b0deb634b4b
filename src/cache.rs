//! Disk-backed, time-limited cache for fetched documents.
//!
//! One file per cache key under a configurable root directory; file content
//! is a JSON envelope `{cached_at, data}`. The cache is best-effort and
//! single-process: write failures are logged and swallowed, read failures
//! are misses, and `get` never deletes stale entries. Concurrent writers
//! from independent processes can race on the same file; that is an
//! accepted limitation of this layer.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Key identifying one cache line: a logical document id plus the requested
/// section.
///
/// Derivation is a stable digest over both parts, so repeated requests for
/// the same logical object always collide on the same file regardless of
/// call-site formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    hash: String,
}

impl CacheKey {
    /// Derive the key for `(logical_id, section)`.
    #[must_use]
    pub fn new(logical_id: &str, section: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(logical_id.as_bytes());
        hasher.update(b":");
        hasher.update(section.as_bytes());
        Self {
            hash: hex::encode(hasher.finalize()),
        }
    }

    /// Hex digest used as the file stem.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

/// One persisted cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    cached_at: i64,
    data: String,
}

/// Disk-backed cache with a fixed time-to-live.
#[derive(Debug)]
pub struct CacheStore {
    root: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    /// Create a store rooted at `root` with the given TTL.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            ttl,
        }
    }

    /// Cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path holding the entry for `key`.
    #[must_use]
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }

    /// Store a payload under `key`, overwriting any existing entry.
    ///
    /// Best-effort: a failed write is logged and swallowed so it never
    /// fails the surrounding fetch.
    pub fn put(&self, key: &CacheKey, payload: &str) {
        if let Err(e) = self.try_put(key, payload) {
            tracing::warn!(
                key = %key.as_str(),
                error = %e,
                "cache write failed, continuing without cache"
            );
        }
    }

    fn try_put(&self, key: &CacheKey, payload: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let entry = CacheEntry {
            cached_at: Utc::now().timestamp(),
            data: payload.to_string(),
        };
        let json = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        fs::write(self.entry_path(key), json)
    }

    /// Read the payload stored under `key`.
    ///
    /// Absent, unreadable, and expired entries are all misses. Stale
    /// entries are left on disk; [`CacheStore::sweep`] removes them.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let path = self.entry_path(key);
        let raw = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "unreadable cache entry");
                return None;
            }
        };

        if self.is_fresh(entry.cached_at) {
            Some(entry.data)
        } else {
            tracing::debug!(key = %key.as_str(), "cache entry expired");
            None
        }
    }

    fn is_fresh(&self, cached_at: i64) -> bool {
        Utc::now().timestamp() - cached_at < self.ttl.as_secs() as i64
    }

    /// Remove expired and unreadable entries from the cache directory.
    ///
    /// Returns the number of files removed. A missing root directory is an
    /// empty cache, not an error.
    pub fn sweep(&self) -> usize {
        let Ok(read_dir) = fs::read_dir(&self.root) else {
            return 0;
        };

        let mut removed = 0;
        for dir_entry in read_dir.flatten() {
            let path = dir_entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let stale = match fs::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str::<CacheEntry>(&raw) {
                    Ok(entry) => !self.is_fresh(entry.cached_at),
                    Err(_) => true,
                },
                Err(_) => true,
            };

            if stale && fs::remove_file(&path).is_ok() {
                tracing::debug!(path = %path.display(), "swept cache entry");
                removed += 1;
            }
        }
        removed
    }
}
