//! Policy operation counters, behind the `metrics` feature.
//!
//! Recording is split from consumption: policies write through the
//! recorder traits, tests and benches read via
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use cell::MetricsCell;
pub use metrics_impl::{LfuMetrics, LruMetrics, TtlMetrics};
pub use snapshot::{LfuMetricsSnapshot, LruMetricsSnapshot, TtlMetricsSnapshot};
pub use traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, LruMetricsReadRecorder,
    LruMetricsRecorder, MetricsReset, MetricsSnapshotProvider, TtlMetricsReadRecorder,
    TtlMetricsRecorder,
};
