//! Least-recently-used cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────┐
//!   │ LruCache<K, V>                                            │
//!   │                                                           │
//!   │   store: HashMapStore<K, V>      K -> Arc<V>              │
//!   │   index: FxHashMap<K, SlotId>    K -> list node handle    │
//!   │   order: RecencyList<K>          MRU ◄──► LRU             │
//!   └───────────────────────────────────────────────────────────┘
//!
//!   get / insert / touch ─► move node to front (MRU)
//!   capacity eviction    ─► pop node at back (LRU)
//! ```
//!
//! | Component             | Role                                          |
//! |-----------------------|-----------------------------------------------|
//! | `HashMapStore<K, V>`  | Owns `K -> Arc<V>`, enforces entry capacity   |
//! | `FxHashMap<K, SlotId>`| O(1) key to recency-node lookup               |
//! | `RecencyList<K>`      | Arena-backed list; front = MRU, back = LRU    |
//!
//! ## Core Operations
//!
//! | Operation      | Mutability | Effect                                  |
//! |----------------|------------|-----------------------------------------|
//! | `insert(k, v)` | Write      | Insert/update + move to MRU; may evict  |
//! | `get(&k)`      | Write      | Return `&Arc<V>` + move to MRU          |
//! | `peek(&k)`     | Read       | Return `Arc<V>` clone, no reorder       |
//! | `pop_lru()`    | Write      | Remove and return the LRU entry         |
//! | `touch(&k)`    | Write      | Move to MRU without fetching            |
//!
//! All operations are O(1) amortized. Updating an existing key refreshes
//! its recency as well as its value.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::{CoreCache, LruCacheTrait};
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", Arc::new(1));
//! cache.insert("b", Arc::new(2));
//!
//! // Touch "a" so "b" becomes the eviction candidate.
//! cache.get(&"a");
//! cache.insert("c", Arc::new(3));
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! assert!(cache.contains(&"c"));
//! ```
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded. [`ConcurrentLruCache`] wraps it in an
//! `Arc<parking_lot::RwLock<..>>` and exposes a `&self` API; `get` takes
//! the write lock because it reorders the list.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::store::hashmap::HashMapStore;
use crate::store::traits::{StoreCore, StoreMut};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Single-threaded LRU cache.
///
/// Values are stored as `Arc<V>`; hits hand out references to (or cheap
/// clones of) the shared handle.
#[derive(Debug)]
pub struct LruCache<K, V> {
    store: HashMapStore<K, V>,
    index: FxHashMap<K, SlotId>,
    order: RecencyList<K>,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache bounded to `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero; a cache that can
    /// hold nothing would turn every insert into an immediate eviction.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Ok(Self {
            store: HashMapStore::new(capacity),
            index,
            order: RecencyList::with_capacity(capacity),
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Creates a cache bounded to `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to
    /// handle user-configurable capacities.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("LruCache::new: {err}"),
        }
    }

    /// Fetches a value without refreshing its recency.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.store.peek_ref(key).cloned()
    }

    /// Evicts the LRU entry, returning it.
    fn evict_lru(&mut self) -> Option<(K, Arc<V>)> {
        let key = self.order.pop_back()?;
        self.index.remove(&key);
        let value = self.store.remove(&key)?;
        self.store.record_eviction();
        Some((key, value))
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates cross-structure consistency (debug/test builds only).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new("index and order lengths differ"));
        }
        if self.index.len() != self.store.len() {
            return Err(InvariantError::new("index and store lengths differ"));
        }
        if self.store.len() > self.store.capacity() {
            return Err(InvariantError::new("store exceeds capacity"));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(node_key) if node_key == key => {},
                _ => return Err(InvariantError::new("index points at wrong order node")),
            }
            if self.store.peek_ref(key).is_none() {
                return Err(InvariantError::new("indexed key missing from store"));
            }
        }
        self.order.check_invariants()
    }
}

impl<K, V> CoreCache<K, Arc<V>> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            self.order.move_to_front(id);
            return self.store.try_insert(key, value).ok().flatten();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        while self.store.len() >= self.store.capacity() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            if self.evict_lru().is_none() {
                break;
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        match self.store.try_insert(key.clone(), value) {
            Ok(previous) => {
                let id = self.order.push_front(key.clone());
                self.index.insert(key, id);
                previous
            },
            // Unreachable with capacity >= 1; kept total rather than panicking.
            Err(_) => None,
        }
    }

    /// Zero-copy get: returns a reference to the shared `Arc<V>` and moves
    /// the entry to MRU.
    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };
        self.order.move_to_front(id);
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.store.get_ref(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn capacity(&self) -> usize {
        self.store.capacity()
    }

    fn clear(&mut self) {
        self.store.clear();
        self.index.clear();
        self.order.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }
}

impl<K, V> MutableCache<K, Arc<V>> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let id = self.index.remove(key)?;
        self.order.remove(id);
        self.store.remove(key)
    }
}

impl<K, V> LruCacheTrait<K, Arc<V>> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, Arc<V>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();
        let popped = self.evict_lru();
        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_lru_found();
        }
        popped
    }

    fn peek_lru(&self) -> Option<(&K, &Arc<V>)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();
        let key = self.order.back()?;
        let value = self.store.peek_ref(key)?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();
        Some((key, value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => return false,
        };
        let moved = self.order.move_to_front(id);
        #[cfg(feature = "metrics")]
        if moved {
            self.metrics.record_touch_found();
        }
        moved
    }

    /// O(n) scan from MRU; intended for diagnostics and tests.
    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();
        for (rank, candidate) in self.order.iter().enumerate() {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            if candidate == key {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Snapshots the policy counters plus current gauges.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.store.len(),
            capacity: self.store.capacity(),
        }
    }

    /// Clears all counters; gauges are unaffected.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ---------------------------------------------------------------------------
// ConcurrentLruCache
// ---------------------------------------------------------------------------

/// Thread-safe LRU cache: an [`LruCache`] behind an `Arc<RwLock<..>>`.
///
/// Cloning the handle shares the same underlying cache. `get` takes the
/// write lock because a hit moves the entry to MRU; use
/// [`peek`](Self::peek) for read-lock lookups that skip the reorder.
///
/// # Example
///
/// ```rust
/// use evictkit::policy::lru::ConcurrentLruCache;
///
/// let cache = ConcurrentLruCache::new(64);
/// cache.insert("k", 42);
///
/// let handle = cache.clone();
/// std::thread::spawn(move || {
///     assert_eq!(handle.get(&"k").map(|v| *v), Some(42));
/// })
/// .join()
/// .unwrap();
/// ```
#[derive(Debug)]
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<RwLock<LruCache<K, V>>>,
}

impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared cache bounded to `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to
    /// handle user-configurable capacities.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Creates a shared cache, rejecting a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(LruCache::try_new(capacity)?)),
        })
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally. Returns the
    /// previous `Arc<V>` if the key existed.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        self.inner.write().insert(key, Arc::new(value))
    }

    /// Inserts an `Arc<V>` directly (zero-copy if already Arc-wrapped).
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.write().insert(key, value)
    }

    /// Fetches a value and moves it to MRU. Takes the write lock.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).cloned()
    }

    /// Fetches a value without reordering. Takes the read lock.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key)
    }

    /// Removes an entry and returns its `Arc<V>`.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().remove(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        self.inner.write().pop_lru()
    }

    /// Returns a clone of the least recently used entry without removing
    /// it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let guard = self.inner.read();
        guard.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }

    /// Marks a key as most recently used.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    /// Returns `true` if the key is present.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Snapshots the policy counters plus current gauges.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}
