//! Policy-agnostic construction.
//!
//! [`CacheBuilder`] turns a capacity (or a [`CacheConfig`]) and a
//! [`CachePolicy`] into a [`Cache`], which forwards to the matching engine.
//! Use it when the policy is picked at runtime; otherwise construct
//! [`LruCache`] or [`LfuCache`] directly.
//!
//! ## Example
//!
//! ```rust
//! use boundcache::builder::{CacheBuilder, CachePolicy};
//! use boundcache::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! assert_eq!(cache.policy(), CachePolicy::Lru);
//!
//! let err = CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lfu);
//! assert!(err.is_err());
//! ```

use std::fmt;
use std::hash::Hash;

use crate::config::CacheConfig;
use crate::error::{ConfigError, InvariantError};
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache, ReadOnlyCache};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, least recent among equal counts.
    Lfu,
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachePolicy::Lru => f.write_str("lru"),
            CachePolicy::Lfu => f.write_str("lfu"),
        }
    }
}

/// A bounded cache whose policy was chosen at construction.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }

    /// Access count for LFU caches; always 0 for LRU caches.
    pub fn frequency(&self, key: &K) -> u64 {
        match &self.inner {
            CacheInner::Lru(_) => 0,
            CacheInner::Lfu(lfu) => lfu.frequency(key),
        }
    }

    /// Reads a value without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.peek(key),
            CacheInner::Lfu(lfu) => lfu.peek(key),
        }
    }

    /// Keys in eviction order: the next victim comes first.
    pub fn keys(&self) -> Vec<K> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.keys(),
            CacheInner::Lfu(lfu) => lfu.keys(),
        }
    }

    /// Values in eviction order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        match &self.inner {
            CacheInner::Lru(lru) => lru.values(),
            CacheInner::Lfu(lfu) => lfu.values(),
        }
    }

    /// # Errors
    ///
    /// Returns the first broken structural invariant of the engine.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.check_invariants(),
            CacheInner::Lfu(lfu) => lfu.check_invariants(),
        }
    }

    pub fn as_lru(&self) -> Option<&LruCache<K, V>> {
        match &self.inner {
            CacheInner::Lru(lru) => Some(lru),
            CacheInner::Lfu(_) => None,
        }
    }

    pub fn as_lfu(&self) -> Option<&LfuCache<K, V>> {
        match &self.inner {
            CacheInner::Lru(_) => None,
            CacheInner::Lfu(lfu) => Some(lfu),
        }
    }
}

impl<K, V> ReadOnlyCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.insert(key, value),
            CacheInner::Lfu(lfu) => lfu.insert(key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
        }
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Lfu(lfu) => lfu.remove(key),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            CacheInner::Lru(lru) => f.debug_tuple("Cache").field(lru).finish(),
            CacheInner::Lfu(lfu) => f.debug_tuple("Cache").field(lfu).finish(),
        }
    }
}

impl<K, V> From<LruCache<K, V>> for Cache<K, V> {
    fn from(cache: LruCache<K, V>) -> Self {
        Self {
            inner: CacheInner::Lru(cache),
        }
    }
}

impl<K, V> From<LfuCache<K, V>> for Cache<K, V> {
    fn from(cache: LfuCache<K, V>) -> Self {
        Self {
            inner: CacheInner::Lfu(cache),
        }
    }
}

/// Builder for [`Cache`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Starts a builder for a cache of `capacity` entries.
    ///
    /// The capacity is checked when the cache is built.
    pub fn new(capacity: usize) -> Self {
        Self::from_config(CacheConfig::new(capacity))
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Builds a cache with the given policy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero; see [`try_build`](Self::try_build).
    ///
    /// ```rust
    /// use boundcache::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let lfu = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lfu);
    /// assert_ne!(lru.policy(), lfu.policy());
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a cache with the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::from_config(self.config)?),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::from_config(self.config)?),
        };
        tracing::trace!(%policy, capacity = self.config.capacity, "built cache");
        Ok(Cache { inner })
    }
}
