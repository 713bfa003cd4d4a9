//! File-per-URL web cache with time-based expiry
//!
//! Each response is stored as a JSON document under a path derived from the
//! SHA-224 digest of the request URL:
//!
//! ```text
//! <cache_dir>/a/b/c/d/e/abcde0123...
//! ```
//!
//! Freshness is decided purely by the age of the entry against the configured
//! expiry window. Server cache-control headers and validators are ignored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224};
use std::{
    collections::BTreeMap,
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::Result;

#[cfg(test)]
mod tests;

const MAX_EXPIRE_HOURS: u64 = 24 * 365 * 100;

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Deterministic cache key for a URL: lowercase hex SHA-224 digest.
pub fn cache_key(url: &str) -> String {
    format!("{:x}", Sha224::digest(url.as_bytes()))
}

/// A cached response as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// URL the request was made for (the cache key source)
    pub url: String,
    /// URL the response was served from, after redirects
    pub resolved_url: String,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(
        url: impl Into<String>,
        resolved_url: impl Into<String>,
        status: u16,
        headers: BTreeMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            resolved_url: resolved_url.into(),
            status,
            headers,
            body: body.into(),
            cached_at: Utc::now(),
        }
    }

    /// Whether the entry is younger than `max_age` at `now`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now.signed_duration_since(self.cached_at) < max_age
    }
}

/// Disk-backed response cache keyed by URL.
#[derive(Debug, Clone)]
pub struct WebCache {
    dir: PathBuf,
    max_age: Duration,
}

impl WebCache {
    /// Create a cache rooted at `dir` whose entries go stale after `expire_hours`.
    pub fn new(dir: impl Into<PathBuf>, expire_hours: u64) -> Self {
        // Clamp to a century so the delta stays inside chrono's range
        let hours = expire_hours.min(MAX_EXPIRE_HOURS) as i64;
        Self {
            dir: dir.into(),
            max_age: Duration::hours(hours),
        }
    }

    /// Path of the entry file for `url`, nested by the first five key characters.
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let key = cache_key(url);
        let mut path = self.dir.clone();
        for c in key.chars().take(5) {
            path.push(c.to_string());
        }
        path.push(key);
        path
    }

    /// Return the entry for `url` if one exists and is still fresh.
    pub fn get(&self, url: &str) -> Option<CacheEntry> {
        self.get_at(url, Utc::now())
    }

    /// Like [`WebCache::get`] but evaluated at an explicit point in time.
    pub fn get_at(&self, url: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        let path = self.entry_path(url);
        let content = try_read_to_string(&path)?;

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring unreadable cache entry");
                return None;
            }
        };

        if entry.is_fresh_at(now, self.max_age) {
            Some(entry)
        } else {
            debug!(url, cached_at = %entry.cached_at, "cache entry expired");
            None
        }
    }

    /// Store an entry, replacing any previous entry for the same URL.
    pub fn put(&self, entry: &CacheEntry) -> Result<()> {
        let path = self.entry_path(&entry.url);
        let content = serde_json::to_string_pretty(entry)?;
        write_string(&path, &content)?;
        Ok(())
    }
}
