//! Lazy-deletion expiry queue.
//!
//! A min-heap of `(deadline, key)` records paired with an authoritative
//! deadline map. Rescheduling or cancelling a key never touches the heap;
//! it only updates the map, leaving a stale record behind. Stale records
//! are discarded when they surface at the top of the heap during
//! [`ExpiryQueue::pop_due`].
//!
//! ## Why lazy deletion
//!
//! `BinaryHeap` has no O(log n) arbitrary removal. The classic answer is to
//! leave superseded records in place and validate each record against the
//! deadline map on pop:
//!
//! ```text
//!   deadlines: FxHashMap<K, u64>        heap: BinaryHeap<Reverse<Record>>
//!   ┌─────┬──────────┐                  top
//!   │ "a" │ 1000     │◄── authoritative  │
//!   │ "b" │ 2500     │                   ▼
//!   └─────┴──────────┘            (1000, "a")  live: matches map
//!                                 (1200, "b")  stale: map says 2500
//!                                 (2500, "b")  live
//! ```
//!
//! A record is live only if its deadline equals the map entry for its key,
//! so a key rescheduled to a later deadline can never be expired early by
//! the record of its old deadline.
//!
//! Records carry a monotonically increasing sequence number so equal
//! deadlines pop in schedule order and `K` needs no `Ord` implementation.
//!
//! The heap can accumulate garbage under reschedule-heavy workloads.
//! [`ExpiryQueue::maybe_rebuild`] compacts it once the heap grows past a
//! multiple of the live count.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
struct Record<K> {
    deadline: u64,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Record<K> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<K> Eq for Record<K> {}

impl<K> PartialOrd for Record<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Record<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Deadline tracker backing the TTL policy.
///
/// # Example
///
/// ```
/// use evictkit::ds::ExpiryQueue;
///
/// let mut queue = ExpiryQueue::new();
/// queue.schedule("session", 1_000);
/// queue.schedule("token", 500);
///
/// // Nothing is due yet at t=400.
/// assert_eq!(queue.pop_due(400), None);
///
/// // At t=1000 both are due, earliest deadline first.
/// assert_eq!(queue.pop_due(1_000), Some(("token", 500)));
/// assert_eq!(queue.pop_due(1_000), Some(("session", 1_000)));
/// assert_eq!(queue.pop_due(1_000), None);
/// ```
#[derive(Debug)]
pub struct ExpiryQueue<K> {
    /// Authoritative deadline per key. Heap records disagreeing with this
    /// map are stale and get dropped on pop.
    deadlines: FxHashMap<K, u64>,
    heap: BinaryHeap<Reverse<Record<K>>>,
    seq: u64,
}

impl<K: Eq + Hash + Clone> ExpiryQueue<K> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            deadlines: FxHashMap::default(),
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Creates an empty queue with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut deadlines = FxHashMap::default();
        deadlines.reserve(capacity);
        Self {
            deadlines,
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
        }
    }

    /// Returns the number of scheduled keys.
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Returns `true` if no keys are scheduled.
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Returns the number of heap records, including stale ones.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Returns the scheduled deadline for `key`, if any.
    pub fn deadline_of(&self, key: &K) -> Option<u64> {
        self.deadlines.get(key).copied()
    }

    /// Schedules (or reschedules) `key` to expire at `deadline`.
    ///
    /// Returns the previously scheduled deadline, if the key already had
    /// one. The old heap record is left in place and invalidated lazily.
    pub fn schedule(&mut self, key: K, deadline: u64) -> Option<u64> {
        let previous = self.deadlines.insert(key.clone(), deadline);
        self.heap.push(Reverse(Record {
            deadline,
            seq: self.seq,
            key,
        }));
        self.seq += 1;
        previous
    }

    /// Cancels the schedule for `key`, returning its deadline if one was
    /// set. The heap record becomes stale.
    pub fn cancel(&mut self, key: &K) -> Option<u64> {
        self.deadlines.remove(key)
    }

    /// Pops the earliest-deadline key whose deadline is `<= now`.
    ///
    /// Stale records (cancelled or superseded by a reschedule) are
    /// discarded along the way. Returns `None` when nothing is due.
    pub fn pop_due(&mut self, now: u64) -> Option<(K, u64)> {
        loop {
            let record = &self.heap.peek()?.0;
            match self.deadlines.get(&record.key) {
                Some(&live) if live == record.deadline => {
                    if record.deadline > now {
                        return None;
                    }
                    let Reverse(record) = self.heap.pop()?;
                    self.deadlines.remove(&record.key);
                    return Some((record.key, record.deadline));
                },
                // Cancelled, or superseded by a newer schedule.
                _ => {
                    self.heap.pop();
                },
            }
        }
    }

    /// Returns the earliest live deadline without removing it.
    pub fn peek_deadline(&mut self) -> Option<u64> {
        loop {
            let record = &self.heap.peek()?.0;
            match self.deadlines.get(&record.key) {
                Some(&live) if live == record.deadline => return Some(record.deadline),
                _ => {
                    self.heap.pop();
                },
            }
        }
    }

    /// Rebuilds the heap from the deadline map, discarding all stale
    /// records. O(n log n) in the number of live keys.
    pub fn rebuild(&mut self) {
        self.heap.clear();
        for (key, &deadline) in &self.deadlines {
            self.heap.push(Reverse(Record {
                deadline,
                seq: self.seq,
                key: key.clone(),
            }));
            self.seq += 1;
        }
    }

    /// Rebuilds the heap when stale records dominate: triggers once the
    /// heap holds more than `factor` times the live key count.
    pub fn maybe_rebuild(&mut self, factor: usize) {
        let threshold = self.deadlines.len().saturating_mul(factor).max(64);
        if self.heap.len() > threshold {
            self.rebuild();
        }
    }

    /// Drops all schedules and records.
    pub fn clear(&mut self) {
        self.deadlines.clear();
        self.heap.clear();
    }
}

impl<K: Eq + Hash + Clone> Default for ExpiryQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
