//! Bounded memoizing cache with TTL expiry.
//!
//! Entries leave the cache through exactly two doors: their age exceeds the
//! TTL (checked lazily on read and in bulk by `sweep`), or a FIFO capacity
//! eviction makes room for a new insertion. Both removals are idempotent.
//! The cache is agnostic to key shape; callers derive keys from a
//! deterministic serialization of their lookup arguments.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::Duration;
use tracing::debug;

/// Interval at which owners should drive [`TtlCache::sweep`].
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(10);

struct CacheEntry<V> {
    value: V,
    inserted_at: Duration,
    ttl: Duration,
    /// Insertion sequence number, matched against the FIFO order queue so
    /// stale order records are skipped on eviction.
    seq: u64,
}

impl<V> CacheEntry<V> {
    fn expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.inserted_at) > self.ttl
    }
}

/// Cache occupancy statistics for the diagnostics surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub utilization_percent: f32,
}

/// A bounded value cache with per-entry TTL and FIFO capacity eviction.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Insertion order; may carry stale records for replaced keys.
    order: VecDeque<(K, u64)>,
    max_entries: usize,
    next_seq: u64,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    /// Create a cache holding at most `max_entries` values.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries: max_entries.max(1),
            next_seq: 0,
        }
    }

    /// Look up a key at time `now`.
    ///
    /// An entry past its TTL is removed on read and reported as a miss —
    /// expiry does not wait for the next sweep.
    pub fn get(&mut self, key: &K, now: Duration) -> Option<V> {
        let expired = self.entries.get(key)?.expired(now);
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Insert a value with the given TTL.
    ///
    /// When the cache is full, the oldest-inserted entry is evicted first
    /// (FIFO, not LRU). Re-inserting a live key counts as a fresh insertion:
    /// age and FIFO position reset.
    pub fn insert(&mut self, key: K, value: V, ttl: Duration, now: Duration) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.push_back((key.clone(), seq));
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
                ttl,
                seq,
            },
        );
    }

    /// Remove all entries past their TTL. Returns the number removed.
    pub fn sweep(&mut self, now: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.expired(now));
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Cache sweep");
        }
        // Drop order records whose entry is gone or superseded.
        let entries = &self.entries;
        self.order
            .retain(|(key, seq)| entries.get(key).is_some_and(|e| e.seq == *seq));
        removed
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of live entries (including not-yet-swept expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occupancy statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            max_size: self.max_entries,
            utilization_percent: self.entries.len() as f32 / self.max_entries as f32 * 100.0,
        }
    }

    /// Evict the single oldest-inserted live entry.
    fn evict_oldest(&mut self) {
        while let Some((key, seq)) = self.order.pop_front() {
            if self.entries.get(&key).is_some_and(|e| e.seq == seq) {
                self.entries.remove(&key);
                return;
            }
        }
    }
}
