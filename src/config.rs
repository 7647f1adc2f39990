//! Cache construction configuration.
//!
//! A cache recognizes a single option, `capacity`: the fixed maximum number of
//! entries. It must be greater than zero and cannot change after construction.
//!
//! `CacheConfig` stores the capacity as `usize`, so a negative value can only
//! arrive through one of the signed `TryFrom` conversions, which reject it.
//!
//! ```
//! use boundcache::config::CacheConfig;
//!
//! let config = CacheConfig::new(64);
//! assert!(config.validate().is_ok());
//!
//! assert!(CacheConfig::try_from(-5i64).is_err());
//! assert!(CacheConfig::try_from(0i64).is_err());
//! assert_eq!(CacheConfig::try_from(10i64).unwrap().capacity, 10);
//! ```

use crate::error::ConfigError;

/// Upper bound on up-front allocation; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 4096;

/// Configuration for cache creation.
///
/// | Field      | Type    | Default | Description               |
/// |------------|---------|---------|---------------------------|
/// | `capacity` | `usize` | 1000    | Maximum number of entries |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    pub capacity: usize,
}

impl CacheConfig {
    /// Default capacity used by [`CacheConfig::default`].
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Creates a configuration with the given capacity.
    ///
    /// The value is not checked here; see [`validate`](Self::validate).
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Checks that the configuration can back a cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            tracing::debug!(capacity = self.capacity, "rejecting cache config");
            return Err(ConfigError::capacity(self.capacity));
        }
        Ok(())
    }

    /// Number of entries an engine reserves at construction.
    pub(crate) fn prealloc_len(&self) -> usize {
        self.capacity.min(PREALLOC_LIMIT)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl TryFrom<i64> for CacheConfig {
    type Error = ConfigError;

    fn try_from(capacity: i64) -> Result<Self, Self::Error> {
        if capacity <= 0 {
            tracing::debug!(capacity, "rejecting cache config");
            return Err(ConfigError::capacity(capacity));
        }
        let capacity = usize::try_from(capacity).map_err(|_| {
            ConfigError::new(
                "capacity",
                format!("capacity {} does not fit in usize", capacity),
            )
        })?;
        Ok(Self::new(capacity))
    }
}

impl TryFrom<i32> for CacheConfig {
    type Error = ConfigError;

    fn try_from(capacity: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(capacity))
    }
}

impl TryFrom<usize> for CacheConfig {
    type Error = ConfigError;

    fn try_from(capacity: usize) -> Result<Self, Self::Error> {
        let config = Self::new(capacity);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity() {
        assert_eq!(CacheConfig::default().capacity, 1000);
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_fails_validation() {
        let err = CacheConfig::new(0).validate().unwrap_err();
        assert_eq!(err.field(), "capacity");
    }

    #[test]
    fn signed_conversions_reject_non_positive() {
        for bad in [0i64, -1, i64::MIN] {
            assert!(CacheConfig::try_from(bad).is_err(), "{} accepted", bad);
        }
        assert!(CacheConfig::try_from(-7i32).is_err());
        assert_eq!(CacheConfig::try_from(3i32).unwrap(), CacheConfig::new(3));
    }

    #[test]
    fn usize_conversion_validates() {
        assert!(CacheConfig::try_from(0usize).is_err());
        assert_eq!(CacheConfig::try_from(1usize).unwrap().capacity, 1);
    }

    #[test]
    fn prealloc_is_capped() {
        assert_eq!(CacheConfig::new(10).prealloc_len(), 10);
        assert_eq!(CacheConfig::new(PREALLOC_LIMIT).prealloc_len(), PREALLOC_LIMIT);
        assert_eq!(CacheConfig::new(usize::MAX).prealloc_len(), PREALLOC_LIMIT);
    }
}
