//! In-memory TTL cache.
//!
//! Entries expire `ttl` after insertion. The cache is bounded: when full it
//! first drops expired entries, then the oldest one. Storage is sharded, so
//! readers of different keys do not contend on one lock.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Thread-safe key/value cache with a fixed time-to-live.
pub struct TtlCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
    max_entries: usize,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `max_entries` values for `ttl` each.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a fresh value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Inserts or replaces the value for `key`.
    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Drops every entry whose key matches `predicate`.
    pub fn remove_where<F>(&self, predicate: F)
    where
        F: Fn(&K) -> bool,
    {
        self.entries.retain(|k, _| !predicate(k));
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) < self.ttl
    }

    fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if self.is_fresh(&entry, now) {
                return Some(entry.value.clone());
            }
        }
        // Read guard is dropped above; removing under it would deadlock the shard.
        self.entries.remove_if(key, |_, e| !self.is_fresh(e, now));
        None
    }

    fn insert_at(&self, key: K, value: V, now: Instant) {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.entries.retain(|_, e| self.is_fresh(e, now));

            while self.entries.len() >= self.max_entries {
                let oldest = self
                    .entries
                    .iter()
                    .min_by_key(|e| e.inserted_at)
                    .map(|e| e.key().clone());
                match oldest {
                    Some(oldest) => self.entries.remove(&oldest),
                    None => break,
                };
            }
        }

        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("max_entries", &self.max_entries)
            .field("len", &self.entries.len())
            .finish()
    }
}
