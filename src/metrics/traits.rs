//! # Metrics Trait Hierarchy
//!
//! Mirrors the cache trait design by separating *recording* from
//! *snapshotting*, so a policy can count its own operations without
//! coupling eviction logic to how the counters are consumed.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get_hit/get_miss/insert    │
//!                 │  evict/clear                │
//!                 └──────────────┬──────────────┘
//!                ┌───────────────┼───────────────┐
//!                ▼               ▼               ▼
//!         ┌──────────┐    ┌──────────┐    ┌──────────┐
//!         │   Lru    │    │   Lfu    │    │   Ttl    │
//!         │ Recorder │    │ Recorder │    │ Recorder │
//!         └──────────┘    └──────────┘    └──────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │ bench/test inspection
//!   └──────────────────────────────┘
//! ```
//!
//! Each policy also has a `*MetricsReadRecorder` companion for operations
//! that only take `&self` (peeks, ranks, the TTL cache's `get`); those
//! counters use [`MetricsCell`](crate::metrics::cell::MetricsCell)
//! interior mutability instead of `&mut`.

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU metrics for &self methods (uses interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Metrics for LFU behavior (frequency order).
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
    fn record_reset_frequency_call(&mut self);
    fn record_reset_frequency_found(&mut self);
    fn record_increment_frequency_call(&mut self);
    fn record_increment_frequency_found(&mut self);
}

/// Read-only LFU metrics for &self methods (uses interior mutability).
pub trait LfuMetricsReadRecorder {
    fn record_peek_lfu_call(&self);
    fn record_peek_lfu_found(&self);
    fn record_frequency_call(&self);
    fn record_frequency_found(&self);
}

/// Metrics for TTL behavior (deadline-driven expiration).
pub trait TtlMetricsRecorder: CoreMetricsRecorder {
    fn record_sweep_call(&mut self);
    fn record_expired_entry(&mut self);
    fn record_reschedule(&mut self);
    fn record_heap_rebuild(&mut self);
}

/// Read-only TTL metrics for &self methods (uses interior mutability).
///
/// The TTL cache's `get` never reorders anything, so it takes `&self` and
/// records through these.
pub trait TtlMetricsReadRecorder {
    fn record_get_hit(&self);
    fn record_get_miss(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
