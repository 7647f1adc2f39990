use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::{CoreMetricsSnapshot, LfuMetricsSnapshot, LruMetricsSnapshot};
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, LruMetricsReadRecorder,
    LruMetricsRecorder,
};

/// Counters every engine keeps.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreCounters {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub clear_calls: u64,
}

impl CoreCounters {
    pub fn snapshot(&self) -> CoreMetricsSnapshot {
        CoreMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            remove_calls: self.remove_calls,
            remove_found: self.remove_found,
            clear_calls: self.clear_calls,
        }
    }
}

impl CoreMetricsRecorder for CoreCounters {
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

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

// Forwards `CoreMetricsRecorder` to the embedded `core` counters.
macro_rules! forward_core_recorder {
    ($ty:ty) => {
        impl CoreMetricsRecorder for $ty {
            fn record_get_hit(&mut self) {
                self.core.record_get_hit();
            }
            fn record_get_miss(&mut self) {
                self.core.record_get_miss();
            }
            fn record_insert_call(&mut self) {
                self.core.record_insert_call();
            }
            fn record_insert_new(&mut self) {
                self.core.record_insert_new();
            }
            fn record_insert_update(&mut self) {
                self.core.record_insert_update();
            }
            fn record_evict_call(&mut self) {
                self.core.record_evict_call();
            }
            fn record_evicted_entry(&mut self) {
                self.core.record_evicted_entry();
            }
            fn record_remove_call(&mut self) {
                self.core.record_remove_call();
            }
            fn record_remove_found(&mut self) {
                self.core.record_remove_found();
            }
            fn record_clear(&mut self) {
                self.core.record_clear();
            }
        }
    };
}

#[derive(Debug, Default)]
pub struct LruMetrics {
    pub core: CoreCounters,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl LruMetrics {
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            core: self.core.snapshot(),
            pop_lru_calls: self.pop_lru_calls,
            pop_lru_found: self.pop_lru_found,
            peek_lru_calls: self.peek_lru_calls.get(),
            peek_lru_found: self.peek_lru_found.get(),
            touch_calls: self.touch_calls,
            touch_found: self.touch_found,
            recency_rank_calls: self.recency_rank_calls.get(),
            recency_rank_found: self.recency_rank_found.get(),
            recency_rank_scan_steps: self.recency_rank_scan_steps.get(),
            cache_len,
            capacity,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

forward_core_recorder!(LruMetrics);

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

impl LruMetricsReadRecorder for &LruMetrics {
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

#[derive(Debug, Default)]
pub struct LfuMetrics {
    pub core: CoreCounters,
    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: MetricsCell,
    pub peek_lfu_found: MetricsCell,
    pub frequency_calls: MetricsCell,
    pub frequency_found: MetricsCell,
}

impl LfuMetrics {
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            core: self.core.snapshot(),
            pop_lfu_calls: self.pop_lfu_calls,
            pop_lfu_found: self.pop_lfu_found,
            peek_lfu_calls: self.peek_lfu_calls.get(),
            peek_lfu_found: self.peek_lfu_found.get(),
            frequency_calls: self.frequency_calls.get(),
            frequency_found: self.frequency_found.get(),
            cache_len,
            capacity,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

forward_core_recorder!(LfuMetrics);

impl LfuMetricsRecorder for LfuMetrics {
    fn record_pop_lfu_call(&mut self) {
        self.pop_lfu_calls += 1;
    }

    fn record_pop_lfu_found(&mut self) {
        self.pop_lfu_found += 1;
    }
}

impl LfuMetricsReadRecorder for &LfuMetrics {
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
