//! Cache trait hierarchy.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌───────────────────┐
//!                    │  CoreCache<K, V>  │ insert / get / contains /
//!                    └─────────┬─────────┘ len / capacity / clear
//!                              │
//!                    ┌─────────▼─────────┐
//!                    │ MutableCache<K,V> │ remove / remove_batch
//!                    └─────────┬─────────┘
//!               ┌──────────────┴──────────────┐
//!     ┌─────────▼─────────┐         ┌─────────▼─────────┐
//!     │ LruCacheTrait<K,V>│         │ LfuCacheTrait<K,V>│
//!     │ pop_lru / touch   │         │ pop_lfu / frequency│
//!     └───────────────────┘         └───────────────────┘
//!
//!     ┌───────────────────────┐
//!     │ ExpiringCache<K, V>   │ deadline-bounded caches; separate root
//!     │ set / get / sweep     │ because expiration, not capacity,
//!     └───────────────────────┘ drives removal
//! ```
//!
//! Capacity-bounded policies (LRU, LFU) share the `CoreCache` →
//! `MutableCache` spine and add policy-specific inspection on top. The TTL
//! policy gets its own root trait: its `get` never reorders anything (so it
//! takes `&self`), its mutation surface carries explicit timestamps, and it
//! has no entry-count capacity.
//!
//! All three concrete caches store values as `Arc<V>`, so the `V` parameter
//! of these traits is instantiated as `Arc<V>` and hits hand out a cheap
//! clone of the shared handle.

/// Core operations shared by all capacity-bounded caches.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use evictkit::prelude::*;
///
/// let mut cache = LruCache::new(2);
/// cache.insert("a", Arc::new(1));
/// cache.insert("b", Arc::new(2));
///
/// assert_eq!(cache.get(&"a").map(|v| **v), Some(1));
/// assert_eq!(cache.len(), 2);
/// assert_eq!(cache.capacity(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates an entry, returning the previous value for the
    /// key if one existed. Inserting a new key into a full cache evicts
    /// one entry per the policy first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Fetches a value and registers the access with the policy. A miss
    /// returns `None`; it is never an error.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if the key is present, without registering an
    /// access.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries, keeping the capacity.
    fn clear(&mut self);
}

/// Caches supporting explicit removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes an entry by key, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes a batch of keys, returning each removal result in order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Least-recently-used caches.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use evictkit::prelude::*;
///
/// let mut cache = LruCache::new(2);
/// cache.insert("a", Arc::new(1));
/// cache.insert("b", Arc::new(2));
/// cache.touch(&"a");
///
/// // "b" is now the least recently used entry.
/// assert_eq!(cache.pop_lru().map(|(k, _)| k), Some("b"));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it or
    /// registering an access.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks a key as most recently used without fetching its value.
    /// Returns `false` if the key is absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Returns the key's position in recency order, 0 being most recent.
    /// O(n); intended for diagnostics and tests.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Least-frequently-used caches.
///
/// Frequencies start at 1 on insert and grow by one per registered access.
/// Ties inside a frequency class break toward the least recently touched
/// key.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use evictkit::prelude::*;
///
/// let mut cache = LfuCache::new(2);
/// cache.insert("a", Arc::new(1));
/// cache.insert("b", Arc::new(2));
/// cache.get(&"a");
///
/// assert_eq!(cache.frequency(&"a"), Some(2));
/// assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some("b"));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Returns the least frequently used entry without removing it or
    /// registering an access.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Returns the access frequency of a key.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Resets a key's frequency to 1, returning the previous frequency.
    fn reset_frequency(&mut self, key: &K) -> Option<u64>;

    /// Registers an access without fetching the value, returning the new
    /// frequency.
    fn increment_frequency(&mut self, key: &K) -> Option<u64>;
}

/// Deadline-bounded caches.
///
/// Expiration is sweep-driven: a lookup between an entry's deadline and the
/// next sweep still returns the value, and entries are only dropped when
/// [`sweep`](ExpiringCache::sweep) runs. Timestamps are caller-supplied
/// `u64` values on a monotonic or wall-clock scale of the caller's
/// choosing; the convenience methods on the concrete types use Unix
/// seconds.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use evictkit::prelude::*;
///
/// let mut cache = TtlCache::new();
/// cache.set_at("session", Arc::new(42), 10, 100); // expires at t=110
///
/// assert_eq!(cache.sweep(105), 0);
/// assert_eq!(cache.get(&"session").map(|v| *v), Some(42));
///
/// assert_eq!(cache.sweep(110), 1);
/// assert_eq!(cache.get(&"session"), None);
/// ```
pub trait ExpiringCache<K, V> {
    /// Inserts or updates an entry expiring `ttl` ticks after `now`.
    /// Updating a key replaces both its value and its deadline.
    fn set_at(&mut self, key: K, value: V, ttl: u64, now: u64) -> Option<V>;

    /// Fetches a value. Entries past their deadline but not yet swept are
    /// still returned.
    fn get(&self, key: &K) -> Option<V>;

    /// Removes every entry whose deadline is `<= now`, returning how many
    /// were dropped.
    fn sweep(&mut self, now: u64) -> usize;

    /// Removes an entry and cancels its deadline.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Returns the absolute deadline of a key.
    fn expires_at(&self, key: &K) -> Option<u64>;

    /// Current number of entries, counting any not yet swept.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the key is present, swept or not.
    fn contains(&self, key: &K) -> bool;

    /// Removes all entries and deadlines.
    fn clear(&mut self);
}
