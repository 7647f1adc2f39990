pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::config::CacheConfig;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{CoreMetricsSnapshot, LfuMetricsSnapshot, LruMetricsSnapshot};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider};
#[cfg(feature = "concurrency")]
pub use crate::policy::lfu::ConcurrentLfuCache;
pub use crate::policy::lfu::LfuCache;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{
    ConcurrentCache, CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache, ReadOnlyCache,
};
