//! Storage traits shared by the eviction policies.
//!
//! A store owns the key/value pairs and enforces the entry-count capacity;
//! the policies own eviction order and metadata on top of it. Splitting the
//! two keeps a policy's ordering logic independent of how values are held.

use std::sync::Arc;

/// Snapshot of store-level counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
    pub evictions: u64,
}

/// Error returned when a bounded store is at capacity and the key is new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFull;

/// Read-side store operations common to all backends.
pub trait StoreCore<K, V> {
    /// Fetch a value by key, counting a hit or miss.
    fn get(&self, key: &K) -> Option<Arc<V>>;

    /// Check if a key exists.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Check if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum entries allowed.
    fn capacity(&self) -> usize;

    /// Snapshot the store's current counters.
    fn metrics(&self) -> StoreMetrics {
        StoreMetrics::default()
    }

    /// Record that the policy dropped an entry (capacity eviction or
    /// expiration).
    fn record_eviction(&self) {}
}

/// Write-side store operations for single-threaded backends.
pub trait StoreMut<K, V>: StoreCore<K, V> {
    /// Insert or update a value. Returns the previous value if present, or
    /// `StoreFull` when inserting a new key into a full store.
    fn try_insert(&mut self, key: K, value: Arc<V>) -> Result<Option<Arc<V>>, StoreFull>;

    /// Remove a value by key.
    fn remove(&mut self, key: &K) -> Option<Arc<V>>;

    /// Remove all entries.
    fn clear(&mut self);
}
