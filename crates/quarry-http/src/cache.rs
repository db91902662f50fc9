//! Filesystem-backed response cache.
//!
//! One `<fingerprint>.json` file per request, holding the raw JSON body.
//! An entry's creation time is its file modification time. Entries older
//! than the TTL are treated as absent but are left on disk until the next
//! write for the same fingerprint overwrites them, or an operator prunes them.
//!
//! The cache is advisory: every read or write failure is logged and
//! swallowed, never surfaced to the caller.

use crate::Settings;
use serde_json::Value;
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tracing::{debug, warn};

/// Extension of cache entry files.
const ENTRY_EXTENSION: &str = "json";

/// A directory of cached JSON responses with a freshness window.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    /// Open (and create if needed) a cache directory.
    ///
    /// Failure to create the directory is logged; the store still works as a
    /// permanent miss in that case.
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "failed to create cache directory");
        }
        Self { dir, ttl }
    }

    /// Open the cache configured by `CACHE_DIR` / `CACHE_TTL`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.cache_dir, settings.cache_ttl)
    }

    /// The cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The freshness window.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Path of the entry file for a fingerprint.
    #[must_use]
    pub fn entry_path(&self, fingerprint: &str) -> PathBuf {
        self.dir.join(format!("{fingerprint}.{ENTRY_EXTENSION}"))
    }

    /// Look up a fresh entry.
    ///
    /// Returns `None` when the entry is missing, older than the TTL, or
    /// cannot be read or parsed.
    #[must_use]
    pub fn get(&self, fingerprint: &str) -> Option<Value> {
        let path = self.entry_path(fingerprint);

        let age = match fs::metadata(&path).and_then(|m| entry_age(&m)) {
            Ok(age) => age,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to stat cache file");
                return None;
            }
        };

        if !is_fresh(age, self.ttl) {
            debug!(fingerprint, age_secs = age.as_secs(), "cache entry expired");
            return None;
        }

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cache file");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse cache file");
                None
            }
        }
    }

    /// Store a payload, stamping it with the current time.
    ///
    /// Overwrites any previous entry for the fingerprint.
    pub fn put(&self, fingerprint: &str, payload: &Value) {
        let path = self.entry_path(fingerprint);

        let bytes = match serde_json::to_vec(payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(fingerprint, error = %e, "failed to serialize cache payload");
                return;
            }
        };

        if let Err(e) = fs::create_dir_all(&self.dir).and_then(|()| fs::write(&path, bytes)) {
            warn!(path = %path.display(), error = %e, "failed to write cache file");
        }
    }

    /// Delete every entry older than the TTL.
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be listed.
    pub fn prune_expired(&self) -> io::Result<usize> {
        let ttl = self.ttl;
        self.remove_entries(|age| !is_fresh(age, ttl))
    }

    /// Delete every entry.
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be listed.
    pub fn clear(&self) -> io::Result<usize> {
        self.remove_entries(|_| true)
    }

    fn remove_entries(&self, mut should_remove: impl FnMut(Duration) -> bool) -> io::Result<usize> {
        let mut removed = 0;

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }

            let age = match fs::metadata(&path).and_then(|m| entry_age(&m)) {
                Ok(age) => age,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable cache file");
                    continue;
                }
            };

            if should_remove(age) {
                match fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) => warn!(path = %path.display(), error = %e, "failed to remove cache file"),
                }
            }
        }

        debug!(dir = %self.dir.display(), removed, "cache entries removed");
        Ok(removed)
    }
}

/// Whether an entry of the given age is still usable.
#[must_use]
pub fn is_fresh(age: Duration, ttl: Duration) -> bool {
    age <= ttl
}

fn entry_age(metadata: &fs::Metadata) -> io::Result<Duration> {
    let modified = metadata.modified()?;
    // mtime in the future (clock skew) counts as brand new
    Ok(SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::File;

    const TTL: Duration = Duration::from_secs(3600);

    fn backdate(path: &Path, age: Duration) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[test]
    fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path(), TTL);

        cache.put("abc", &json!({"a": 1}));
        assert_eq!(cache.get("abc"), Some(json!({"a": 1})));
        assert!(cache.entry_path("abc").ends_with("abc.json"));
    }

    #[test]
    fn test_missing_entry_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path(), TTL);
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn test_entry_fresh_just_inside_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path(), TTL);

        cache.put("k", &json!([1, 2, 3]));
        backdate(&cache.entry_path("k"), TTL - Duration::from_secs(1));
        assert_eq!(cache.get("k"), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_entry_stale_just_past_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path(), TTL);

        cache.put("k", &json!([1, 2, 3]));
        backdate(&cache.entry_path("k"), TTL + Duration::from_secs(1));
        assert_eq!(cache.get("k"), None);
        // stale entries are not deleted on read
        assert!(cache.entry_path("k").exists());
    }

    #[test]
    fn test_put_overwrites_and_refreshes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path(), TTL);

        cache.put("k", &json!("old"));
        backdate(&cache.entry_path("k"), TTL * 2);
        cache.put("k", &json!("new"));
        assert_eq!(cache.get("k"), Some(json!("new")));
    }

    #[test]
    fn test_corrupt_entry_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path(), TTL);

        fs::write(cache.entry_path("bad"), b"{not json").unwrap();
        assert_eq!(cache.get("bad"), None);
    }

    #[test]
    fn test_unwritable_directory_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        // a regular file where the cache directory should be
        let cache = CacheStore::new(&blocker, TTL);
        cache.put("k", &json!(1));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_prune_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path(), TTL);

        cache.put("fresh", &json!(1));
        cache.put("stale", &json!(2));
        backdate(&cache.entry_path("stale"), TTL + Duration::from_secs(10));
        fs::write(dir.path().join("notes.txt"), b"keep").unwrap();

        assert_eq!(cache.prune_expired().unwrap(), 1);
        assert!(cache.entry_path("fresh").exists());
        assert!(!cache.entry_path("stale").exists());

        assert_eq!(cache.clear().unwrap(), 1);
        assert!(!cache.entry_path("fresh").exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_is_fresh_boundary() {
        assert!(is_fresh(TTL, TTL));
        assert!(!is_fresh(TTL + Duration::from_millis(1), TTL));
    }
}
