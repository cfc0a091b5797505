//! HashMap-backed store.
//!
//! ## Architecture
//! - Entries live in a `HashMap<K, Arc<V>>` for O(1) average lookup.
//! - Capacity is enforced by entry count, not byte size.
//! - Counters use atomics so a store behind a `RwLock` read guard can still
//!   record hits and misses.
//!
//! ## Core Operations
//! - `try_insert`: insert or update by key, rejecting new keys when full.
//! - `get` / `get_ref`: fetch by key, counting a hit or miss.
//! - `peek_ref`: fetch by key without touching counters.
//! - `remove`, `clear`.
//!
//! ## Example Usage
//! ```rust
//! use std::sync::Arc;
//!
//! use evictkit::store::hashmap::HashMapStore;
//! use evictkit::store::traits::{StoreCore, StoreMut};
//!
//! let mut store: HashMapStore<u64, String> = HashMapStore::new(2);
//! store.try_insert(1, Arc::new("a".to_string())).unwrap();
//! assert!(store.contains(&1));
//! ```
//!
//! ## Thread Safety
//! - `HashMapStore` itself is single-threaded; the concurrent cache types
//!   wrap a whole policy core (store included) in a `parking_lot::RwLock`.

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rustc_hash::FxBuildHasher;

use crate::store::traits::{StoreCore, StoreFull, StoreMetrics, StoreMut};

/// Atomic counters backing [`StoreMetrics`].
///
/// Atomics rather than plain `u64` because `get` takes `&self` and may run
/// under a shared lock guard.
#[derive(Debug, Default)]
struct StoreCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    removes: AtomicU64,
    evictions: AtomicU64,
}

impl StoreCounters {
    fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    fn inc_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn inc_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn inc_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    fn inc_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    fn inc_remove(&self) {
        self.removes.fetch_add(1, Ordering::Relaxed);
    }

    fn inc_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }
}

/// Single-threaded HashMap-backed store.
pub struct HashMapStore<K, V, S = FxBuildHasher> {
    map: HashMap<K, Arc<V>, S>,
    capacity: usize,
    metrics: StoreCounters,
}

impl<K, V, S> fmt::Debug for HashMapStore<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMapStore")
            .field("map", &self.map)
            .field("capacity", &self.capacity)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl<K, V> HashMapStore<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    /// Create a store bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, FxBuildHasher)
    }

    /// Create a store with no entry-count bound.
    ///
    /// Used by the TTL policy, which bounds the cache by deadline rather
    /// than by count.
    pub fn unbounded() -> Self {
        Self {
            map: HashMap::default(),
            capacity: usize::MAX,
            metrics: StoreCounters::default(),
        }
    }
}

impl<K, V, S> HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Create a store with a fixed capacity and custom hasher.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hasher),
            capacity,
            metrics: StoreCounters::default(),
        }
    }

    /// Fetch a value by key without cloning the `Arc`, counting a hit or
    /// miss.
    pub fn get_ref(&self, key: &K) -> Option<&Arc<V>> {
        match self.map.get(key) {
            Some(value) => {
                self.metrics.inc_hit();
                Some(value)
            },
            None => {
                self.metrics.inc_miss();
                None
            },
        }
    }

    /// Fetch a value by key without touching hit/miss counters.
    pub fn peek_ref(&self, key: &K) -> Option<&Arc<V>> {
        self.map.get(key)
    }
}

impl<K, V, S> StoreCore<K, V> for HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn get(&self, key: &K) -> Option<Arc<V>> {
        match self.map.get(key).cloned() {
            Some(value) => {
                self.metrics.inc_hit();
                Some(value)
            },
            None => {
                self.metrics.inc_miss();
                None
            },
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn metrics(&self) -> StoreMetrics {
        self.metrics.snapshot()
    }

    fn record_eviction(&self) {
        self.metrics.inc_eviction();
    }
}

impl<K, V, S> StoreMut<K, V> for HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn try_insert(&mut self, key: K, value: Arc<V>) -> Result<Option<Arc<V>>, StoreFull> {
        if !self.map.contains_key(&key) && self.map.len() >= self.capacity {
            return Err(StoreFull);
        }
        let previous = self.map.insert(key, value);
        if previous.is_some() {
            self.metrics.inc_update();
        } else {
            self.metrics.inc_insert();
        }
        Ok(previous)
    }

    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let removed = self.map.remove(key);
        if removed.is_some() {
            self.metrics.inc_remove();
        }
        removed
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut store: HashMapStore<u64, &str> = HashMapStore::new(4);
        assert_eq!(store.try_insert(1, Arc::new("one")), Ok(None));
        assert_eq!(store.get(&1).as_deref(), Some(&"one"));
        assert_eq!(store.get(&2), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_returns_previous() {
        let mut store: HashMapStore<u64, u32> = HashMapStore::new(4);
        store.try_insert(1, Arc::new(10)).unwrap();
        let previous = store.try_insert(1, Arc::new(20)).unwrap();
        assert_eq!(previous.as_deref(), Some(&10));
        assert_eq!(store.get(&1).as_deref(), Some(&20));
    }

    #[test]
    fn full_store_rejects_new_keys_but_allows_updates() {
        let mut store: HashMapStore<u64, u32> = HashMapStore::new(1);
        store.try_insert(1, Arc::new(10)).unwrap();
        assert_eq!(store.try_insert(2, Arc::new(20)), Err(StoreFull));
        assert!(store.try_insert(1, Arc::new(11)).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unbounded_store_never_fills() {
        let mut store: HashMapStore<u64, u64> = HashMapStore::unbounded();
        for key in 0..1_000 {
            store.try_insert(key, Arc::new(key)).unwrap();
        }
        assert_eq!(store.len(), 1_000);
        assert_eq!(store.capacity(), usize::MAX);
    }

    #[test]
    fn counters_track_operations() {
        let mut store: HashMapStore<u64, u32> = HashMapStore::new(4);
        store.try_insert(1, Arc::new(10)).unwrap();
        store.try_insert(1, Arc::new(11)).unwrap();
        store.get(&1);
        store.get(&2);
        store.remove(&1);
        store.remove(&1);
        store.record_eviction();

        let metrics = store.metrics();
        assert_eq!(metrics.inserts, 1);
        assert_eq!(metrics.updates, 1);
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.removes, 1);
        assert_eq!(metrics.evictions, 1);
    }

    #[test]
    fn peek_ref_skips_counters() {
        let mut store: HashMapStore<u64, u32> = HashMapStore::new(4);
        store.try_insert(1, Arc::new(10)).unwrap();
        assert!(store.peek_ref(&1).is_some());
        assert!(store.peek_ref(&2).is_none());
        let metrics = store.metrics();
        assert_eq!(metrics.hits, 0);
        assert_eq!(metrics.misses, 0);
    }
}
