//! TTL-bounded in-memory response cache.
//!
//! Entries carry their own TTL, chosen by the writer at store time. An
//! entry is valid iff `now - stored_at <= ttl`; expired entries are
//! logically absent even while physically present, so a read that finds
//! one treats it as a miss and removes it. The periodic sweep (see
//! [`spawn_sweeper`](super::spawn_sweeper)) exists only to bound memory
//! growth between reads.
//!
//! The map is backed by `dashmap`, so reads and writes from concurrent
//! tasks never block the runtime. Statistics use atomics, following the
//! same lock-free pattern as the rest of the crate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use bytes::Bytes;
use dashmap::DashMap;

use super::stats::{CacheStats, SweepResult};

/// A single cached response payload.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Bytes,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) <= self.ttl
    }
}

/// In-memory, per-key, TTL-bounded cache for response payloads.
///
/// Owned exclusively by the API client that writes it; nothing else
/// mutates entries. Corruption is impossible by construction because
/// entries are only ever written through [`TtlCache::insert`].
#[derive(Debug, Default)]
pub struct TtlCache {
    entries: DashMap<String, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    expired_removed: AtomicU64,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fresh entry.
    ///
    /// Returns `Some(data)` only while the entry is within its TTL. An
    /// expired entry is removed on the way out and reported as a miss.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let now = Instant::now();

        // The guard must be dropped before removal to avoid deadlocking
        // on the shard lock.
        let state = match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now) => Some(entry.data.clone()),
            Some(_) => None,
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        match state {
            Some(data) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(data)
            }
            None => {
                self.entries.remove(key);
                self.expired_removed.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a payload under `key` with the given TTL, replacing any
    /// previous entry for the same key.
    pub fn insert(&self, key: impl Into<String>, data: Bytes, ttl: Duration) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                data,
                stored_at: Instant::now(),
                ttl,
            },
        );
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    /// Remove a single entry. Returns whether it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Unconditionally empty the cache. Always succeeds.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of entries physically present, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The TTL the writer chose for `key`, if the entry is present.
    pub(crate) fn entry_ttl(&self, key: &str) -> Option<Duration> {
        self.entries.get(key).map(|entry| entry.ttl)
    }

    /// Compute statistics without mutating the cache.
    ///
    /// Freshness is re-checked against the current time for every entry,
    /// so `valid_entries` may be smaller than `total_entries`.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let mut total_entries = 0;
        let mut valid_entries = 0;
        let mut approximate_memory_bytes = 0;

        for entry in self.entries.iter() {
            total_entries += 1;
            approximate_memory_bytes += entry.data.len();
            if entry.is_fresh(now) {
                valid_entries += 1;
            }
        }

        CacheStats {
            total_entries,
            valid_entries,
            approximate_memory_bytes,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            expired_removed: self.expired_removed.load(Ordering::Relaxed),
        }
    }

    /// Physically delete every expired entry.
    ///
    /// Not required for correctness (reads re-check freshness) but keeps
    /// the key space bounded.
    pub fn sweep(&self) -> SweepResult {
        let now = Instant::now();
        let mut result = SweepResult::default();

        self.entries.retain(|_key, entry| {
            if entry.is_fresh(now) {
                true
            } else {
                result.entries_removed += 1;
                result.bytes_freed += entry.data.len() as u64;
                false
            }
        });

        self.expired_removed
            .fetch_add(result.entries_removed as u64, Ordering::Relaxed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(len: usize) -> Bytes {
        Bytes::from(vec![0u8; len])
    }

    #[test]
    fn test_insert_and_get() {
        let cache = TtlCache::new();
        cache.insert("k", Bytes::from_static(b"data"), Duration::from_secs(60));

        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"data")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_missing_is_miss() {
        let cache = TtlCache::new();
        assert_eq!(cache.get("absent"), None);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_expired_entry_is_logically_absent() {
        let cache = TtlCache::new();
        cache.insert("k", payload(16), Duration::from_millis(10));

        std::thread::sleep(Duration::from_millis(25));

        assert_eq!(cache.get("k"), None);
        // The lazy read also removed it physically.
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().expired_removed, 1);
    }

    #[test]
    fn test_overwrite_replaces_entry() {
        let cache = TtlCache::new();
        cache.insert("k", Bytes::from_static(b"old"), Duration::from_secs(60));
        cache.insert("k", Bytes::from_static(b"new"), Duration::from_secs(60));

        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"new")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = TtlCache::new();
        cache.insert("a", payload(8), Duration::from_secs(60));
        cache.insert("b", payload(8), Duration::from_secs(60));

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_stats_valid_not_above_total() {
        let cache = TtlCache::new();
        cache.insert("fresh", payload(100), Duration::from_secs(60));
        cache.insert("stale", payload(50), Duration::from_millis(5));

        std::thread::sleep(Duration::from_millis(20));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert!(stats.valid_entries <= stats.total_entries);
        assert_eq!(stats.approximate_memory_bytes, 150);

        // Stats must not mutate: the stale entry is still physically there.
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_stats_equal_when_nothing_expired() {
        let cache = TtlCache::new();
        cache.insert("a", payload(10), Duration::from_secs(60));
        cache.insert("b", payload(10), Duration::from_secs(60));

        let stats = cache.stats();
        assert_eq!(stats.valid_entries, stats.total_entries);
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let cache = TtlCache::new();
        cache.insert("fresh", payload(100), Duration::from_secs(60));
        cache.insert("stale-1", payload(30), Duration::from_millis(5));
        cache.insert("stale-2", payload(20), Duration::from_millis(5));

        std::thread::sleep(Duration::from_millis(20));

        let result = cache.sweep();
        assert_eq!(result.entries_removed, 2);
        assert_eq!(result.bytes_freed, 50);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("fresh").is_some());
    }

    #[test]
    fn test_sweep_on_fresh_cache_is_noop() {
        let cache = TtlCache::new();
        cache.insert("k", payload(8), Duration::from_secs(60));

        let result = cache.sweep();
        assert_eq!(result.entries_removed, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_ttl_introspection() {
        let cache = TtlCache::new();
        cache.insert("k", payload(8), Duration::from_secs(600));

        assert_eq!(cache.entry_ttl("k"), Some(Duration::from_secs(600)));
        assert_eq!(cache.entry_ttl("absent"), None);
    }
}
