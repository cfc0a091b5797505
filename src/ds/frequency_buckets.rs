//! Frequency bucket chain for LFU ordering.
//!
//! Tracks an access count per key and keeps the keys grouped into buckets by
//! exact frequency, so the minimum-frequency key is always reachable in O(1).
//! Within a bucket, keys are kept in recency order: the head of a bucket's
//! list is the most recently touched key at that frequency and the tail is
//! the least recently touched, which gives LFU its LRU tie-break.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        arena: SlotArena<Node<K>>
//!
//!   buckets: FxHashMap<u64, Bucket>, linked by frequency
//!
//!   min_freq ─► [freq 1] ◄──► [freq 3] ◄──► [freq 7]
//!                 │              │             │
//!               head             head          head
//!                 ▼              ▼             ▼
//!               k4 ◄► k1       k2            k5 ◄► k3
//!               (MRU..LRU per bucket)
//! ```
//!
//! A `bump` only ever moves a key from frequency `f` to `f + 1`, so the
//! target bucket is either `f`'s chain successor or is spliced in directly
//! after `f`. Empty buckets are unlinked immediately, which keeps the chain
//! dense and `min_freq` maintenance O(1).

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<K> {
    key: K,
    freq: u64,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// One frequency class: a recency-ordered list of keys plus chain links to
/// the neighbouring occupied frequencies.
#[derive(Debug)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
    prev_freq: Option<u64>,
    next_freq: Option<u64>,
}

/// Frequency-ordered key set backing the LFU policy.
///
/// All operations are O(1) amortized. Keys are unique; inserting an existing
/// key is rejected so the caller can distinguish insert from update.
///
/// # Example
///
/// ```
/// use evictkit::ds::FrequencyBuckets;
///
/// let mut buckets = FrequencyBuckets::new();
/// buckets.insert("a");
/// buckets.insert("b");
/// buckets.bump(&"a");
///
/// // "b" still sits at frequency 1, so it is the minimum.
/// assert_eq!(buckets.pop_min(), Some(("b", 1)));
/// assert_eq!(buckets.pop_min(), Some(("a", 2)));
/// ```
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    arena: SlotArena<Node<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    /// Lowest occupied frequency, or 0 when empty.
    min_freq: u64,
}

impl<K: Eq + Hash + Clone> FrequencyBuckets<K> {
    /// Creates an empty bucket chain.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Creates an empty bucket chain with reserved key capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Self {
            arena: SlotArena::with_capacity(capacity),
            index,
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency of `key`, if tracked.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.arena.get(id).map(|node| node.freq)
    }

    /// Returns the lowest occupied frequency, or `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        if self.index.is_empty() {
            None
        } else {
            Some(self.min_freq)
        }
    }

    /// Tracks a new key at frequency 1.
    ///
    /// Returns `false` (and leaves the existing entry untouched) if the key
    /// is already tracked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.arena.insert(Node {
            key: key.clone(),
            freq: 1,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);
        self.ensure_bucket_at_front(1);
        self.bucket_push_front(1, id);
        self.min_freq = 1;
        true
    }

    /// Increments the frequency of `key` by one and returns the new
    /// frequency, or `None` if the key is not tracked.
    pub fn bump(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let freq = self.arena.get(id)?.freq;
        let new_freq = freq + 1;

        self.bucket_detach(freq, id);
        self.ensure_bucket_after(freq, new_freq);
        self.remove_bucket_if_empty(freq);
        self.bucket_push_front(new_freq, id);
        if let Some(node) = self.arena.get_mut(id) {
            node.freq = new_freq;
        }
        Some(new_freq)
    }

    /// Resets the frequency of `key` back to 1, returning the previous
    /// frequency, or `None` if the key is not tracked.
    pub fn reset(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let freq = self.arena.get(id)?.freq;
        if freq == 1 {
            // Still refresh recency inside the bucket.
            self.bucket_detach(1, id);
            self.bucket_push_front(1, id);
            return Some(1);
        }

        self.bucket_detach(freq, id);
        self.ensure_bucket_at_front(1);
        self.remove_bucket_if_empty(freq);
        self.bucket_push_front(1, id);
        if let Some(node) = self.arena.get_mut(id) {
            node.freq = 1;
        }
        self.min_freq = 1;
        Some(freq)
    }

    /// Stops tracking `key`, returning its last frequency.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = self.index.remove(key)?;
        let freq = match self.arena.get(id) {
            Some(node) => node.freq,
            None => return None,
        };
        self.bucket_detach(freq, id);
        self.remove_bucket_if_empty(freq);
        self.arena.remove(id);
        Some(freq)
    }

    /// Returns the least-frequently-used key without removing it. Ties are
    /// broken toward the least recently touched key.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let bucket = self.buckets.get(&self.min_freq)?;
        let id = bucket.tail?;
        self.arena.get(id).map(|node| (&node.key, node.freq))
    }

    /// Removes and returns the least-frequently-used key and its frequency.
    /// Ties are broken toward the least recently touched key.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let bucket = self.buckets.get(&self.min_freq)?;
        let id = bucket.tail?;
        let freq = self.min_freq;

        self.bucket_detach(freq, id);
        self.remove_bucket_if_empty(freq);
        let node = self.arena.remove(id)?;
        self.index.remove(&node.key);
        Some((node.key, freq))
    }

    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    // ---- bucket chain maintenance ----

    /// Makes sure a bucket for frequency 1 exists at the head of the chain.
    fn ensure_bucket_at_front(&mut self, freq: u64) {
        if self.buckets.contains_key(&freq) {
            return;
        }
        let old_min = if self.buckets.is_empty() {
            None
        } else {
            Some(self.min_freq)
        };
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                len: 0,
                prev_freq: None,
                next_freq: old_min,
            },
        );
        if let Some(next) = old_min {
            if let Some(bucket) = self.buckets.get_mut(&next) {
                bucket.prev_freq = Some(freq);
            }
        }
        self.min_freq = freq;
    }

    /// Makes sure a bucket for `new_freq` exists immediately after `freq`
    /// in the chain. `new_freq` is always `freq + 1`, so if it exists it is
    /// already `freq`'s successor.
    fn ensure_bucket_after(&mut self, freq: u64, new_freq: u64) {
        if self.buckets.contains_key(&new_freq) {
            return;
        }
        let next = self.buckets.get(&freq).and_then(|bucket| bucket.next_freq);
        self.buckets.insert(
            new_freq,
            Bucket {
                head: None,
                tail: None,
                len: 0,
                prev_freq: Some(freq),
                next_freq: next,
            },
        );
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            bucket.next_freq = Some(new_freq);
        }
        if let Some(next_freq) = next {
            if let Some(bucket) = self.buckets.get_mut(&next_freq) {
                bucket.prev_freq = Some(new_freq);
            }
        }
    }

    /// Unlinks an emptied bucket from the chain and advances `min_freq` if
    /// the minimum bucket was the one removed.
    fn remove_bucket_if_empty(&mut self, freq: u64) {
        let (prev, next) = match self.buckets.get(&freq) {
            Some(bucket) if bucket.len == 0 => (bucket.prev_freq, bucket.next_freq),
            _ => return,
        };
        self.buckets.remove(&freq);
        if let Some(prev_freq) = prev {
            if let Some(bucket) = self.buckets.get_mut(&prev_freq) {
                bucket.next_freq = next;
            }
        }
        if let Some(next_freq) = next {
            if let Some(bucket) = self.buckets.get_mut(&next_freq) {
                bucket.prev_freq = prev;
            }
        }
        if self.min_freq == freq {
            self.min_freq = next.unwrap_or(0);
        }
    }

    // ---- per-bucket list helpers ----

    fn bucket_push_front(&mut self, freq: u64, id: SlotId) {
        let old_head = match self.buckets.get(&freq) {
            Some(bucket) => bucket.head,
            None => return,
        };
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(head_id) = old_head {
            if let Some(node) = self.arena.get_mut(head_id) {
                node.prev = Some(id);
            }
        }
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            bucket.head = Some(id);
            if bucket.tail.is_none() {
                bucket.tail = Some(id);
            }
            bucket.len += 1;
        }
    }

    fn bucket_detach(&mut self, freq: u64, id: SlotId) {
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        if let Some(prev_id) = prev {
            if let Some(node) = self.arena.get_mut(prev_id) {
                node.next = next;
            }
        }
        if let Some(next_id) = next {
            if let Some(node) = self.arena.get_mut(next_id) {
                node.prev = prev;
            }
        }
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            if bucket.head == Some(id) {
                bucket.head = next;
            }
            if bucket.tail == Some(id) {
                bucket.tail = prev;
            }
            bucket.len -= 1;
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates bucket chain structure (debug/test builds only).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.arena.len() {
            return Err(InvariantError::new("index and arena lengths differ"));
        }
        if self.index.is_empty() {
            if !self.buckets.is_empty() {
                return Err(InvariantError::new("buckets present while empty"));
            }
            return Ok(());
        }

        // Walk the frequency chain from min_freq.
        let mut total = 0usize;
        let mut prev_freq: Option<u64> = None;
        let mut current = Some(self.min_freq);
        let mut visited = 0usize;
        while let Some(freq) = current {
            let bucket = self
                .buckets
                .get(&freq)
                .ok_or_else(|| InvariantError::new("chain references missing bucket"))?;
            if bucket.prev_freq != prev_freq {
                return Err(InvariantError::new("bucket back-link mismatch"));
            }
            if let Some(prev) = prev_freq {
                if prev >= freq {
                    return Err(InvariantError::new("bucket chain not strictly increasing"));
                }
            }
            if bucket.len == 0 {
                return Err(InvariantError::new("empty bucket left in chain"));
            }

            // Walk the bucket's node list.
            let mut count = 0usize;
            let mut node_prev: Option<SlotId> = None;
            let mut node_current = bucket.head;
            while let Some(id) = node_current {
                let node = self
                    .arena
                    .get(id)
                    .ok_or_else(|| InvariantError::new("bucket references dead slot"))?;
                if node.freq != freq {
                    return Err(InvariantError::new("node frequency disagrees with bucket"));
                }
                if node.prev != node_prev {
                    return Err(InvariantError::new("node back-link mismatch"));
                }
                count += 1;
                if count > self.arena.len() {
                    return Err(InvariantError::new("cycle detected in bucket list"));
                }
                node_prev = node_current;
                node_current = node.next;
            }
            if node_prev != bucket.tail {
                return Err(InvariantError::new("bucket tail mismatch"));
            }
            if count != bucket.len {
                return Err(InvariantError::new("bucket length mismatch"));
            }

            total += count;
            visited += 1;
            if visited > self.buckets.len() {
                return Err(InvariantError::new("cycle detected in bucket chain"));
            }
            prev_freq = Some(freq);
            current = bucket.next_freq;
        }
        if total != self.index.len() {
            return Err(InvariantError::new("chain does not cover all keys"));
        }
        if visited != self.buckets.len() {
            return Err(InvariantError::new("unreachable buckets present"));
        }
        Ok(())
    }
}

impl<K: Eq + Hash + Clone> Default for FrequencyBuckets<K> {
    fn default() -> Self {
        Self::new()
    }
}
