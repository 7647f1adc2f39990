//! Operation counters for the cache engines (feature `metrics`).
//!
//! Each engine owns a recorder ([`LruMetrics`] or [`LfuMetrics`]) and bumps
//! it from its operations. Methods that only borrow the cache (`peek_lru`,
//! `frequency`, ...) record through [`MetricsCell`] counters so they can stay
//! `&self`. Callers read the counters through
//! [`MetricsSnapshotProvider::snapshot`].
//!
//! ```
//! use boundcache::metrics::traits::MetricsSnapshotProvider;
//! use boundcache::policy::lru::LruCache;
//! use boundcache::traits::CoreCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert(1, "a");
//! cache.get(&1);
//! cache.get(&2);
//!
//! let snap = cache.snapshot();
//! assert_eq!(snap.core.get_hits, 1);
//! assert_eq!(snap.core.get_misses, 1);
//! assert_eq!(snap.core.hit_rate(), 0.5);
//! ```

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use cell::MetricsCell;
pub use metrics_impl::{CoreCounters, LfuMetrics, LruMetrics};
pub use snapshot::{CoreMetricsSnapshot, LfuMetricsSnapshot, LruMetricsSnapshot};
