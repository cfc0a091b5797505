//! Counter structs backing the recorder traits.
//!
//! Fields recorded from `&mut self` paths are plain `u64`; fields recorded
//! from `&self` paths (peeks, ranks, TTL `get`) are [`MetricsCell`]s.

use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, LruMetricsReadRecorder,
    LruMetricsRecorder, MetricsReset, TtlMetricsReadRecorder, TtlMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl LruMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        // No explicit counter today; kept for trait completeness.
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl LruMetricsReadRecorder for LruMetrics {
    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

impl MetricsReset for LruMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct LfuMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: MetricsCell,
    pub peek_lfu_found: MetricsCell,
    pub frequency_calls: MetricsCell,
    pub frequency_found: MetricsCell,
    pub reset_frequency_calls: u64,
    pub reset_frequency_found: u64,
    pub increment_frequency_calls: u64,
    pub increment_frequency_found: u64,
}

impl LfuMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoreMetricsRecorder for LfuMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        // No explicit counter today; kept for trait completeness.
    }
}

impl LfuMetricsRecorder for LfuMetrics {
    fn record_pop_lfu_call(&mut self) {
        self.pop_lfu_calls += 1;
    }

    fn record_pop_lfu_found(&mut self) {
        self.pop_lfu_found += 1;
    }

    fn record_reset_frequency_call(&mut self) {
        self.reset_frequency_calls += 1;
    }

    fn record_reset_frequency_found(&mut self) {
        self.reset_frequency_found += 1;
    }

    fn record_increment_frequency_call(&mut self) {
        self.increment_frequency_calls += 1;
    }

    fn record_increment_frequency_found(&mut self) {
        self.increment_frequency_found += 1;
    }
}

impl LfuMetricsReadRecorder for LfuMetrics {
    fn record_peek_lfu_call(&self) {
        self.peek_lfu_calls.incr();
    }

    fn record_peek_lfu_found(&self) {
        self.peek_lfu_found.incr();
    }

    fn record_frequency_call(&self) {
        self.frequency_calls.incr();
    }

    fn record_frequency_found(&self) {
        self.frequency_found.incr();
    }
}

impl MetricsReset for LfuMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct TtlMetrics {
    pub get_calls: MetricsCell,
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub set_calls: u64,
    pub set_updates: u64,
    pub set_new: u64,
    pub reschedules: u64,
    pub sweep_calls: u64,
    pub expired_entries: u64,
    pub heap_rebuilds: u64,
}

impl TtlMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoreMetricsRecorder for TtlMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls.incr();
        self.get_hits.incr();
    }

    fn record_get_miss(&mut self) {
        self.get_calls.incr();
        self.get_misses.incr();
    }

    fn record_insert_call(&mut self) {
        self.set_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.set_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.set_updates += 1;
    }

    fn record_evict_call(&mut self) {
        // TTL has no bulk evict pass; removals are counted per entry.
    }

    fn record_evicted_entry(&mut self) {
        self.expired_entries += 1;
    }

    fn record_clear(&mut self) {
        // No explicit counter today; kept for trait completeness.
    }
}

impl TtlMetricsRecorder for TtlMetrics {
    fn record_sweep_call(&mut self) {
        self.sweep_calls += 1;
    }

    fn record_expired_entry(&mut self) {
        self.expired_entries += 1;
    }

    fn record_reschedule(&mut self) {
        self.reschedules += 1;
    }

    fn record_heap_rebuild(&mut self) {
        self.heap_rebuilds += 1;
    }
}

impl TtlMetricsReadRecorder for TtlMetrics {
    fn record_get_hit(&self) {
        self.get_calls.incr();
        self.get_hits.incr();
    }

    fn record_get_miss(&self) {
        self.get_calls.incr();
        self.get_misses.incr();
    }
}

impl MetricsReset for TtlMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_metrics_record_and_reset() {
        let mut metrics = LruMetrics::new();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_pop_lru_call();
        metrics.record_peek_lru_call();

        assert_eq!(metrics.get_calls, 2);
        assert_eq!(metrics.get_hits, 1);
        assert_eq!(metrics.get_misses, 1);
        assert_eq!(metrics.pop_lru_calls, 1);
        assert_eq!(metrics.peek_lru_calls.get(), 1);

        metrics.reset_metrics();
        assert_eq!(metrics.get_calls, 0);
        assert_eq!(metrics.peek_lru_calls.get(), 0);
    }

    #[test]
    fn ttl_metrics_get_records_through_shared_ref() {
        let metrics = TtlMetrics::new();
        TtlMetricsReadRecorder::record_get_hit(&metrics);
        TtlMetricsReadRecorder::record_get_miss(&metrics);

        assert_eq!(metrics.get_calls.get(), 2);
        assert_eq!(metrics.get_hits.get(), 1);
        assert_eq!(metrics.get_misses.get(), 1);
    }

    #[test]
    fn ttl_removals_all_land_in_expired_entries() {
        let mut metrics = TtlMetrics::new();
        metrics.record_evict_call();
        metrics.record_evicted_entry();
        metrics.record_expired_entry();

        // Both recording paths feed the one counter the snapshot exposes.
        assert_eq!(metrics.expired_entries, 2);
    }

    #[test]
    fn lfu_metrics_frequency_counters() {
        let mut metrics = LfuMetrics::new();
        metrics.record_increment_frequency_call();
        metrics.record_increment_frequency_found();
        metrics.record_frequency_call();

        assert_eq!(metrics.increment_frequency_calls, 1);
        assert_eq!(metrics.increment_frequency_found, 1);
        assert_eq!(metrics.frequency_calls.get(), 1);
    }
}
