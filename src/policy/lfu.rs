//! Least-frequently-used cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────┐
//!   │ LfuCache<K, V>                                            │
//!   │                                                           │
//!   │   store: HashMapStore<K, V>      K -> Arc<V>              │
//!   │   freq:  FrequencyBuckets<K>     K -> frequency class     │
//!   └───────────────────────────────────────────────────────────┘
//!
//!   get / insert(existing) ─► bump key from freq f to f + 1
//!   capacity eviction      ─► pop tail of the minimum bucket
//! ```
//!
//! | Component              | Role                                         |
//! |------------------------|----------------------------------------------|
//! | `HashMapStore<K, V>`   | Owns `K -> Arc<V>`, enforces entry capacity  |
//! | `FrequencyBuckets<K>`  | Bucket chain; O(1) bump and pop-min          |
//!
//! ## Semantics
//!
//! - A new key starts at frequency 1.
//! - `get` and updating `insert` both count as an access and bump the
//!   frequency by one.
//! - Eviction removes the lowest-frequency key; within a frequency class
//!   the least recently touched key goes first.
//!
//! All operations are O(1) amortized: a bump only ever moves a key to the
//! adjacent `f + 1` bucket, and the minimum bucket is tracked directly.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::{CoreCache, LfuCacheTrait};
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("hot", Arc::new(1));
//! cache.insert("cold", Arc::new(2));
//! cache.get(&"hot");
//! cache.get(&"hot");
//!
//! // "cold" sits at frequency 1 and is evicted first.
//! cache.insert("new", Arc::new(3));
//! assert!(cache.contains(&"hot"));
//! assert!(!cache.contains(&"cold"));
//! assert_eq!(cache.frequency(&"hot"), Some(3));
//! ```
//!
//! ## Thread Safety
//!
//! `LfuCache` is single-threaded. [`ConcurrentLfuCache`] wraps it in an
//! `Arc<parking_lot::RwLock<..>>`; `get` takes the write lock because it
//! bumps the frequency.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::store::hashmap::HashMapStore;
use crate::store::traits::{StoreCore, StoreMut};
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// Single-threaded LFU cache with LRU tie-breaking.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    store: HashMapStore<K, V>,
    freq: FrequencyBuckets<K>,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache bounded to `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self {
            store: HashMapStore::new(capacity),
            freq: FrequencyBuckets::with_capacity(capacity),
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
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
            Err(err) => panic!("LfuCache::new: {err}"),
        }
    }

    /// Fetches a value without counting an access.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.store.peek_ref(key).cloned()
    }

    /// Evicts the minimum-frequency entry, returning it.
    fn evict_lfu(&mut self) -> Option<(K, Arc<V>)> {
        let (key, _freq) = self.freq.pop_min()?;
        let value = self.store.remove(&key)?;
        self.store.record_eviction();
        Some((key, value))
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates cross-structure consistency (debug/test builds only).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.store.len() != self.freq.len() {
            return Err(InvariantError::new("store and frequency lengths differ"));
        }
        if self.store.len() > self.store.capacity() {
            return Err(InvariantError::new("store exceeds capacity"));
        }
        self.freq.check_invariants()
    }
}

impl<K, V> CoreCache<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserting an existing key replaces its value and counts as an
    /// access, bumping the frequency.
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.freq.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            self.freq.bump(&key);
            return self.store.try_insert(key, value).ok().flatten();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        while self.store.len() >= self.store.capacity() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            if self.evict_lfu().is_none() {
                break;
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        match self.store.try_insert(key.clone(), value) {
            Ok(previous) => {
                self.freq.insert(key);
                previous
            },
            // Unreachable with capacity >= 1; kept total rather than panicking.
            Err(_) => None,
        }
    }

    /// Zero-copy get: returns a reference to the shared `Arc<V>` and bumps
    /// the key's frequency.
    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        if self.freq.bump(key).is_none() {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }
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
        self.freq.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }
}

impl<K, V> MutableCache<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.freq.remove(key)?;
        self.store.remove(key)
    }
}

impl<K, V> LfuCacheTrait<K, Arc<V>> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, Arc<V>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();
        let popped = self.evict_lfu();
        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_lfu_found();
        }
        popped
    }

    fn peek_lfu(&self) -> Option<(&K, &Arc<V>)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_call();
        let (key, _freq) = self.freq.peek_min()?;
        let value = self.store.peek_ref(key)?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_found();
        Some((key, value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_frequency_call();
        let freq = self.freq.frequency(key);
        #[cfg(feature = "metrics")]
        if freq.is_some() {
            (&self.metrics).record_frequency_found();
        }
        freq
    }

    fn reset_frequency(&mut self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.record_reset_frequency_call();
        let previous = self.freq.reset(key);
        #[cfg(feature = "metrics")]
        if previous.is_some() {
            self.metrics.record_reset_frequency_found();
        }
        previous
    }

    fn increment_frequency(&mut self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.record_increment_frequency_call();
        let bumped = self.freq.bump(key);
        #[cfg(feature = "metrics")]
        if bumped.is_some() {
            self.metrics.record_increment_frequency_found();
        }
        bumped
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Snapshots the policy counters plus current gauges.
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            frequency_calls: self.metrics.frequency_calls.get(),
            frequency_found: self.metrics.frequency_found.get(),
            reset_frequency_calls: self.metrics.reset_frequency_calls,
            reset_frequency_found: self.metrics.reset_frequency_found,
            increment_frequency_calls: self.metrics.increment_frequency_calls,
            increment_frequency_found: self.metrics.increment_frequency_found,
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
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ---------------------------------------------------------------------------
// ConcurrentLfuCache
// ---------------------------------------------------------------------------

/// Thread-safe LFU cache: an [`LfuCache`] behind an `Arc<RwLock<..>>`.
///
/// Cloning the handle shares the same underlying cache. `get` takes the
/// write lock because a hit bumps the frequency; use
/// [`peek`](Self::peek) for read-lock lookups that skip the access count.
#[derive(Debug)]
pub struct ConcurrentLfuCache<K, V> {
    inner: Arc<RwLock<LfuCache<K, V>>>,
}

impl<K, V> Clone for ConcurrentLfuCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> ConcurrentLfuCache<K, V>
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
            inner: Arc::new(RwLock::new(LfuCache::new(capacity))),
        }
    }

    /// Creates a shared cache, rejecting a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(LfuCache::try_new(capacity)?)),
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

    /// Fetches a value and bumps its frequency. Takes the write lock.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).cloned()
    }

    /// Fetches a value without counting an access. Takes the read lock.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key)
    }

    /// Removes an entry and returns its `Arc<V>`.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().remove(key)
    }

    /// Removes and returns the least frequently used entry.
    pub fn pop_lfu(&self) -> Option<(K, Arc<V>)> {
        self.inner.write().pop_lfu()
    }

    /// Returns a clone of the least frequently used entry without
    /// removing it.
    pub fn peek_lfu(&self) -> Option<(K, Arc<V>)> {
        let guard = self.inner.read();
        guard.peek_lfu().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }

    /// Returns the access frequency of a key.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.read().frequency(key)
    }

    /// Resets a key's frequency to 1, returning the previous frequency.
    pub fn reset_frequency(&self, key: &K) -> Option<u64> {
        self.inner.write().reset_frequency(key)
    }

    /// Registers an access without fetching the value.
    pub fn increment_frequency(&self, key: &K) -> Option<u64> {
        self.inner.write().increment_frequency(key)
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
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let mut cache = LfuCache::new(4);
        assert_eq!(cache.insert(1u64, Arc::new("one")), None);
        assert_eq!(cache.get(&1).map(|v| **v), Some("one"));
        assert_eq!(cache.get(&2), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn eviction_prefers_least_frequently_used() {
        let mut cache = LfuCache::new(2);
        cache.insert("hot", Arc::new(1));
        cache.insert("cold", Arc::new(2));
        cache.get(&"hot");
        cache.get(&"hot");

        cache.insert("new", Arc::new(3));
        assert!(cache.contains(&"hot"));
        assert!(!cache.contains(&"cold"));
        assert!(cache.contains(&"new"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn frequency_ties_break_toward_least_recently_touched() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", Arc::new(1));
        cache.insert("b", Arc::new(2));
        cache.insert("c", Arc::new(3));

        // All at frequency 1; "a" is the oldest untouched key.
        cache.insert("d", Arc::new(4));
        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn update_replaces_value_and_counts_as_access() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", Arc::new(1));
        cache.insert("b", Arc::new(2));

        let previous = cache.insert("a", Arc::new(10));
        assert_eq!(previous.map(|v| *v), Some(1));
        assert_eq!(cache.frequency(&"a"), Some(2));

        // "b" is the minimum now.
        cache.insert("c", Arc::new(3));
        assert!(!cache.contains(&"b"));
        assert_eq!(cache.get(&"a").map(|v| **v), Some(10));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn len_never_exceeds_capacity() {
        let mut cache = LfuCache::new(3);
        for key in 0u64..50 {
            cache.insert(key, Arc::new(key));
            if key % 3 == 0 {
                cache.get(&key);
            }
            assert!(cache.len() <= 3);
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn pop_lfu_drains_lowest_frequency_first() {
        let mut cache = LfuCache::new(3);
        cache.insert("a", Arc::new(1));
        cache.insert("b", Arc::new(2));
        cache.insert("c", Arc::new(3));
        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"b");

        assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some("c"));
        assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some("b"));
        assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some("a"));
        assert_eq!(cache.pop_lfu(), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn peek_does_not_count_as_access() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", Arc::new(1));
        cache.peek(&"a");
        cache.peek(&"a");
        assert_eq!(cache.frequency(&"a"), Some(1));

        let lfu = cache.peek_lfu().map(|(k, _)| *k);
        assert_eq!(lfu, Some("a"));
        assert_eq!(cache.frequency(&"a"), Some(1));
    }

    #[test]
    fn reset_frequency_demotes_a_hot_key() {
        let mut cache = LfuCache::new(2);
        cache.insert("hot", Arc::new(1));
        cache.insert("warm", Arc::new(2));
        cache.get(&"hot");
        cache.get(&"hot");
        cache.get(&"warm");

        assert_eq!(cache.reset_frequency(&"hot"), Some(3));
        assert_eq!(cache.frequency(&"hot"), Some(1));

        // "hot" is now the eviction candidate.
        cache.insert("new", Arc::new(3));
        assert!(!cache.contains(&"hot"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn increment_frequency_without_fetch() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", Arc::new(1));
        assert_eq!(cache.increment_frequency(&"a"), Some(2));
        assert_eq!(cache.increment_frequency(&"missing"), None);
        assert_eq!(cache.frequency(&"a"), Some(2));
    }

    #[test]
    fn remove_detaches_entry_fully() {
        let mut cache = LfuCache::new(2);
        cache.insert("a", Arc::new(1));
        cache.insert("b", Arc::new(2));
        cache.get(&"a");

        assert_eq!(cache.remove(&"a").map(|v| *v), Some(1));
        assert_eq!(cache.remove(&"a"), None);
        assert_eq!(cache.frequency(&"a"), None);
        assert_eq!(cache.len(), 1);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(LfuCache::<u64, u64>::try_new(0).is_err());
        assert!(LfuCache::<u64, u64>::try_new(1).is_ok());
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_hits_misses_and_evictions() {
        let mut cache = LfuCache::new(1);
        cache.insert("a", Arc::new(1));
        cache.get(&"a");
        cache.get(&"b");
        cache.insert("c", Arc::new(3));

        let snapshot = cache.metrics_snapshot();
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.get_misses, 1);
        assert_eq!(snapshot.insert_new, 2);
        assert_eq!(snapshot.evicted_entries, 1);
        assert_eq!(snapshot.capacity, 1);
    }

    #[test]
    fn concurrent_handles_share_state() {
        let cache = ConcurrentLfuCache::new(8);
        cache.insert(1u64, "one".to_string());

        let handle = cache.clone();
        let worker = std::thread::spawn(move || {
            handle.insert(2, "two".to_string());
            handle.get(&1).map(|v| (*v).clone())
        });

        assert_eq!(worker.join().unwrap(), Some("one".to_string()));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.frequency(&1), Some(2));
    }
}
