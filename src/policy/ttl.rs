//! Time-to-live cache.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────┐
//!   │ TtlCache<K, V>                                            │
//!   │                                                           │
//!   │   store:  HashMapStore<K, V>   K -> Arc<V>  (unbounded)   │
//!   │   expiry: ExpiryQueue<K>       K -> deadline, lazy heap   │
//!   └───────────────────────────────────────────────────────────┘
//!
//!   set(k, v, ttl)  ─► schedule deadline = now + ttl
//!   sweep(now)      ─► pop every due deadline, drop its entry
//!   get(&k)         ─► plain lookup; never checks the clock
//! ```
//!
//! ## Expiration model
//!
//! Expiration is *sweep-driven*: entries are only removed when
//! [`sweep`](crate::traits::ExpiringCache::sweep) runs. A `get` between an
//! entry's deadline and the next sweep still returns the value. This keeps
//! the read path a single hash lookup with no clock reads and gives the
//! caller full control over when expiration work happens (a maintenance
//! tick, before a batch, in a background thread holding the write lock).
//!
//! Rescheduling a key leaves its old heap record in place; the record is
//! recognized as stale when it surfaces, because its deadline no longer
//! matches the authoritative deadline map. A key whose TTL was extended
//! can therefore never be expired early by a leftover record.
//!
//! ## Timestamps
//!
//! All deadlines are `u64` ticks on a scale the caller chooses. The
//! `*_at`/`sweep` methods take explicit `now` values (tests use simulated
//! clocks); the [`set`](TtlCache::set) and [`sweep_now`](TtlCache::sweep_now)
//! conveniences read Unix wall-clock seconds.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use evictkit::policy::ttl::TtlCache;
//! use evictkit::traits::ExpiringCache;
//!
//! let mut cache = TtlCache::new();
//! cache.set_at("session", Arc::new("data"), 30, 1_000);
//!
//! assert_eq!(cache.sweep(1_029), 0);
//! assert!(cache.contains(&"session"));
//!
//! assert_eq!(cache.sweep(1_030), 1);
//! assert!(!cache.contains(&"session"));
//! ```
//!
//! ## Thread Safety
//!
//! `TtlCache` is single-threaded. [`ConcurrentTtlCache`] wraps it in an
//! `Arc<parking_lot::RwLock<..>>`; `get` only takes the read lock since it
//! never mutates ordering state.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;

use crate::ds::expiry_queue::ExpiryQueue;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TtlMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TtlMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider, TtlMetricsReadRecorder,
    TtlMetricsRecorder,
};
use crate::store::hashmap::HashMapStore;
use crate::store::traits::{StoreCore, StoreMut};
use crate::traits::ExpiringCache;

/// Heap records may outnumber live deadlines by this factor before a
/// sweep compacts the heap.
const REBUILD_FACTOR: usize = 4;

/// Current Unix time in whole seconds. Clamps to 0 if the system clock
/// reads before the epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Single-threaded TTL cache with sweep-driven expiration.
///
/// Unbounded by entry count; the working set is bounded by how quickly
/// entries expire and how often the caller sweeps.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    store: HashMapStore<K, V>,
    expiry: ExpiryQueue<K>,
    #[cfg(feature = "metrics")]
    metrics: TtlMetrics,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            store: HashMapStore::unbounded(),
            expiry: ExpiryQueue::new(),
            #[cfg(feature = "metrics")]
            metrics: TtlMetrics::default(),
        }
    }

    /// Inserts or updates an entry expiring `ttl` seconds from the current
    /// Unix wall-clock time, wrapping the value in `Arc<V>`.
    pub fn set(&mut self, key: K, value: V, ttl: u64) -> Option<Arc<V>> {
        self.set_at(key, Arc::new(value), ttl, unix_now())
    }

    /// Sweeps against the current Unix wall-clock time.
    pub fn sweep_now(&mut self) -> usize {
        self.sweep(unix_now())
    }

    /// Returns the ticks left until a key's deadline, saturating at 0 for
    /// entries already due but not yet swept.
    pub fn ttl_remaining(&self, key: &K, now: u64) -> Option<u64> {
        self.expiry
            .deadline_of(key)
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Number of heap records pending, stale ones included.
    pub fn pending_deadlines(&self) -> usize {
        self.expiry.heap_len()
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates cross-structure consistency (debug/test builds only).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.store.len() != self.expiry.len() {
            return Err(InvariantError::new("store and deadline lengths differ"));
        }
        Ok(())
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ExpiringCache<K, Arc<V>> for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn set_at(&mut self, key: K, value: Arc<V>, ttl: u64, now: u64) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let deadline = now.saturating_add(ttl);
        let rescheduled = self.expiry.schedule(key.clone(), deadline);
        #[cfg(feature = "metrics")]
        if rescheduled.is_some() {
            self.metrics.record_insert_update();
            self.metrics.record_reschedule();
        } else {
            self.metrics.record_insert_new();
        }
        let _ = rescheduled;

        // Unbounded store: insert cannot fail.
        self.store.try_insert(key, value).ok().flatten()
    }

    /// Plain lookup; entries past their deadline but not yet swept are
    /// still returned.
    fn get(&self, key: &K) -> Option<Arc<V>> {
        let value = self.store.peek_ref(key).cloned();
        #[cfg(feature = "metrics")]
        if value.is_some() {
            (&self.metrics).record_get_hit();
        } else {
            (&self.metrics).record_get_miss();
        }
        value
    }

    fn sweep(&mut self, now: u64) -> usize {
        #[cfg(feature = "metrics")]
        self.metrics.record_sweep_call();

        let mut expired = 0usize;
        while let Some((key, _deadline)) = self.expiry.pop_due(now) {
            if self.store.remove(&key).is_some() {
                self.store.record_eviction();
                expired += 1;
                #[cfg(feature = "metrics")]
                self.metrics.record_expired_entry();
            }
        }

        let heap_before = self.expiry.heap_len();
        self.expiry.maybe_rebuild(REBUILD_FACTOR);
        #[cfg(feature = "metrics")]
        if self.expiry.heap_len() < heap_before {
            self.metrics.record_heap_rebuild();
        }
        let _ = heap_before;

        expired
    }

    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.expiry.cancel(key);
        self.store.remove(key)
    }

    fn expires_at(&self, key: &K) -> Option<u64> {
        self.expiry.deadline_of(key)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    fn clear(&mut self) {
        self.store.clear();
        self.expiry.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Snapshots the policy counters plus current gauges.
    pub fn metrics_snapshot(&self) -> TtlMetricsSnapshot {
        TtlMetricsSnapshot {
            get_calls: self.metrics.get_calls.get(),
            get_hits: self.metrics.get_hits.get(),
            get_misses: self.metrics.get_misses.get(),
            set_calls: self.metrics.set_calls,
            set_updates: self.metrics.set_updates,
            set_new: self.metrics.set_new,
            reschedules: self.metrics.reschedules,
            sweep_calls: self.metrics.sweep_calls,
            expired_entries: self.metrics.expired_entries,
            heap_rebuilds: self.metrics.heap_rebuilds,
            cache_len: self.store.len(),
            pending_deadlines: self.expiry.heap_len(),
        }
    }

    /// Clears all counters; gauges are unaffected.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<TtlMetricsSnapshot> for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> TtlMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ---------------------------------------------------------------------------
// ConcurrentTtlCache
// ---------------------------------------------------------------------------

/// Thread-safe TTL cache: a [`TtlCache`] behind an `Arc<RwLock<..>>`.
///
/// Cloning the handle shares the same underlying cache. Unlike the LRU and
/// LFU wrappers, `get` only takes the read lock: lookups never touch
/// ordering state. A typical deployment runs [`sweep_now`](Self::sweep_now)
/// from a periodic maintenance thread.
///
/// # Example
///
/// ```rust
/// use evictkit::policy::ttl::ConcurrentTtlCache;
///
/// let cache = ConcurrentTtlCache::new();
/// cache.set_at("token", "abc", 60, 1_000);
///
/// assert_eq!(cache.get(&"token").map(|v| *v), Some("abc"));
/// assert_eq!(cache.sweep(1_060), 1);
/// assert_eq!(cache.get(&"token"), None);
/// ```
#[derive(Debug)]
pub struct ConcurrentTtlCache<K, V> {
    inner: Arc<RwLock<TtlCache<K, V>>>,
}

impl<K, V> Clone for ConcurrentTtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> ConcurrentTtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty shared cache.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TtlCache::new())),
        }
    }

    /// Inserts or updates an entry expiring `ttl` seconds from the current
    /// Unix wall-clock time.
    pub fn set(&self, key: K, value: V, ttl: u64) -> Option<Arc<V>> {
        self.inner.write().set(key, value, ttl)
    }

    /// Inserts or updates an entry expiring `ttl` ticks after `now`.
    pub fn set_at(&self, key: K, value: V, ttl: u64, now: u64) -> Option<Arc<V>> {
        self.inner.write().set_at(key, Arc::new(value), ttl, now)
    }

    /// Inserts an `Arc<V>` directly (zero-copy if already Arc-wrapped).
    pub fn set_arc_at(&self, key: K, value: Arc<V>, ttl: u64, now: u64) -> Option<Arc<V>> {
        self.inner.write().set_at(key, value, ttl, now)
    }

    /// Fetches a value. Takes only the read lock; entries past their
    /// deadline but not yet swept are still returned.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().get(key)
    }

    /// Removes every entry due at `now`.
    pub fn sweep(&self, now: u64) -> usize {
        self.inner.write().sweep(now)
    }

    /// Sweeps against the current Unix wall-clock time.
    pub fn sweep_now(&self) -> usize {
        self.inner.write().sweep_now()
    }

    /// Removes an entry and cancels its deadline.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().remove(key)
    }

    /// Returns the absolute deadline of a key.
    pub fn expires_at(&self, key: &K) -> Option<u64> {
        self.inner.read().expires_at(key)
    }

    /// Returns the ticks left until a key's deadline.
    pub fn ttl_remaining(&self, key: &K, now: u64) -> Option<u64> {
        self.inner.read().ttl_remaining(key, now)
    }

    /// Returns `true` if the key is present, swept or not.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes all entries and deadlines.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Snapshots the policy counters plus current gauges.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> TtlMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

impl<K, V> Default for ConcurrentTtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
