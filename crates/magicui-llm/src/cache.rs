//! Cache stores for generated artifacts
//!
//! The cache is an optimization, not a correctness requirement: reads never
//! fail (a missing or corrupt backing store is a cold start) and writes are
//! best-effort (a lost write degrades to "regenerate next time"). Staleness
//! is judged by the orchestrator at read time; entries past the TTL stay
//! stored until overwritten or cleared.

use async_trait::async_trait;
use dashmap::DashMap;
use magicui_core::CacheEntry;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{error, warn};

/// Maximum age at which a cached artifact is still considered fresh: 24 hours.
pub const CACHE_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Key-value store for generated artifacts.
///
/// The persisted snapshot is replaced wholesale on write; two concurrent
/// writers lose one update (last write wins), which is acceptable because
/// entries are derived, reproducible data.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the full snapshot. Never fails: missing or malformed backing
    /// data yields an empty map.
    async fn read_all(&self) -> HashMap<String, CacheEntry>;

    /// Replace the full snapshot. Best-effort: failures are logged, not
    /// propagated.
    async fn write_all(&self, entries: &HashMap<String, CacheEntry>);

    /// Write an empty snapshot.
    async fn clear(&self) {
        self.write_all(&HashMap::new()).await;
    }
}

/// File-backed cache store: a JSON array of `[key, {code, timestamp}]`
/// pairs. Absence of the file is equivalent to an empty cache.
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Accepts both the pair-array layout and a plain object map, since
    /// hand-edited cache files tend to drift toward the latter.
    fn parse(content: &str) -> Option<HashMap<String, CacheEntry>> {
        if content.trim().is_empty() {
            return Some(HashMap::new());
        }
        let value: serde_json::Value = serde_json::from_str(content).ok()?;
        match value {
            serde_json::Value::Array(_) => {
                let pairs: Vec<(String, CacheEntry)> = serde_json::from_value(value).ok()?;
                Some(pairs.into_iter().collect())
            }
            serde_json::Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn read_all(&self) -> HashMap<String, CacheEntry> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return HashMap::new();
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read cache file, starting cold");
                return HashMap::new();
            }
        };

        match Self::parse(&content) {
            Some(entries) => entries,
            None => {
                warn!(
                    path = %self.path.display(),
                    "cache file content was not a valid entry array or object, starting cold"
                );
                HashMap::new()
            }
        }
    }

    async fn write_all(&self, entries: &HashMap<String, CacheEntry>) {
        let mut pairs: Vec<(&String, &CacheEntry)> = entries.iter().collect();
        // Stable on-disk order keeps rewrites diffable
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let serialized = match serde_json::to_string_pretty(&pairs) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!(%err, "failed to serialize cache snapshot");
                return;
            }
        };

        if let Err(err) = tokio::fs::write(&self.path, serialized).await {
            error!(path = %self.path.display(), %err, "failed to write cache file");
        }
    }
}

/// In-memory cache store backed by a concurrent map. Used by tests and by
/// embedders that do not want persistence.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry directly, bypassing the snapshot API. Test helper.
    pub fn insert(&self, key: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(key.into(), entry);
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn read_all(&self) -> HashMap<String, CacheEntry> {
        self.entries
            .iter()
            .map(|pair| (pair.key().clone(), pair.value().clone()))
            .collect()
    }

    async fn write_all(&self, entries: &HashMap<String, CacheEntry>) {
        self.entries.clear();
        for (key, entry) in entries {
            self.entries.insert(key.clone(), entry.clone());
        }
    }
}
