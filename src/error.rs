//! Error types for boundcache.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache is constructed with an invalid
//!   configuration (a zero or negative capacity). This is the only failure a
//!   cache can report; lookups and removals of absent keys are ordinary
//!   `None` results.
//! - [`InvariantError`]: Returned by `check_invariants` on the cache engines
//!   when an internal structural invariant does not hold.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::error::ConfigError;
//! use boundcache::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u64, String>, ConfigError> = LruCache::try_new(128);
//! assert!(cache.is_ok());
//!
//! let err = LruCache::<u64, String>::try_new(0).unwrap_err();
//! assert_eq!(err.field(), "capacity");
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`CacheConfig::validate`](crate::config::CacheConfig::validate),
/// the `TryFrom` conversions on [`CacheConfig`](crate::config::CacheConfig),
/// the engines' `try_new` constructors and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
/// A cache that failed construction never exists, so there is nothing to
/// recover: rebuild with a valid configuration.
///
/// # Example
///
/// ```
/// use boundcache::error::ConfigError;
/// use boundcache::policy::lfu::LfuCache;
///
/// let err = LfuCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    field: &'static str,
    message: String,
}

impl ConfigError {
    /// Creates a new `ConfigError` for the named configuration field.
    #[inline]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for the zero/negative capacity rejection.
    pub(crate) fn capacity(got: impl fmt::Display) -> Self {
        Self::new(
            "capacity",
            format!("capacity must be greater than zero, got {}", got),
        )
    }

    /// Returns the name of the rejected field.
    #[inline]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cache config: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when an internal cache invariant is violated.
///
/// Produced by [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants)
/// and [`LfuCache::check_invariants`](crate::policy::lfu::LfuCache::check_invariants).
/// Carries a human-readable description of the first invariant that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
