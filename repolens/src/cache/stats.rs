//! Cache statistics types.

use std::fmt;

use serde::Serialize;

/// Point-in-time view of the response cache.
///
/// `valid_entries` re-checks the freshness invariant against the current
/// time for every entry without mutating anything, so it can lag behind
/// `total_entries` until the next sweep (or an expired read) removes the
/// stale entries. `valid_entries <= total_entries` always holds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Entries physically present, fresh or not.
    pub total_entries: usize,

    /// Entries still within their TTL right now.
    pub valid_entries: usize,

    /// Sum of stored payload sizes in bytes.
    pub approximate_memory_bytes: usize,

    /// Reads served from a fresh entry.
    pub hits: u64,

    /// Reads that found no usable entry.
    pub misses: u64,

    /// Successful stores.
    pub insertions: u64,

    /// Entries removed because they were found expired (lazy reads and
    /// sweeps combined).
    pub expired_removed: u64,
}

impl CacheStats {
    /// Hit rate over all reads so far, `0.0` before the first read.
    pub fn hit_rate(&self) -> f64 {
        let reads = self.hits + self.misses;
        if reads == 0 {
            return 0.0;
        }
        self.hits as f64 / reads as f64
    }
}

/// Result of a sweep pass over the cache.
#[derive(Debug, Clone, Default)]
pub struct SweepResult {
    /// Number of expired entries removed.
    pub entries_removed: usize,

    /// Total payload bytes freed.
    pub bytes_freed: u64,
}

impl fmt::Display for SweepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sweep: removed {} entries, freed {} bytes",
            self.entries_removed, self.bytes_freed
        )
    }
}
