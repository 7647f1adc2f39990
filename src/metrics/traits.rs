//! # Metrics Trait Hierarchy
//!
//! Recording and reading are split: engines write through the recorder
//! traits, callers read through [`MetricsSnapshotProvider`].
//!
//! ```text
//!                  ┌─────────────────────────────┐
//!                  │     CoreMetricsRecorder     │
//!                  │  get_hit/get_miss/insert    │
//!                  │  evict/clear                │
//!                  └──────────────┬──────────────┘
//!                                 │
//!                 ┌───────────────┴───────────────┐
//!                 ▼                               ▼
//!          ┌──────────────┐                ┌──────────────┐
//!          │ LruMetrics   │                │ LfuMetrics   │
//!          │ Recorder     │                │ Recorder     │
//!          └──────────────┘                └──────────────┘
//!
//!   Read-path recorders (`&self` methods) are implemented for `&LruMetrics`
//!   and `&LfuMetrics` and bump `MetricsCell` counters.
//! ```

/// Counters shared by every policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_clear(&mut self);
}

/// LRU counters recorded from `&mut self` methods.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// LRU counters recorded from `&self` methods.
pub trait LruMetricsReadRecorder {
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// LFU counters recorded from `&mut self` methods.
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
}

/// LFU counters recorded from `&self` methods.
pub trait LfuMetricsReadRecorder {
    fn record_peek_lfu_call(&self);
    fn record_peek_lfu_found(&self);
    fn record_frequency_call(&self);
    fn record_frequency_found(&self);
}

/// Point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Zeroes the counters, e.g. between benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
