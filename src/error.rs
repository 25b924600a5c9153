//! Error types for the tiercache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when configuration parameters are invalid
//!   (zero capacity, duplicate level name, write-through into an empty
//!   hierarchy, out-of-range workload ratios).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   bookkeeping structures disagree with the entry store.
//!
//! Missing keys are never errors: `get`/`delete`/`contains` report absence
//! in-band via `Option` and `bool`.
//!
//! ## Example Usage
//!
//! ```
//! use tiercache::error::ConfigError;
//! use tiercache::policy::LruCache;
//!
//! let cache: Result<LruCache<u64, String>, ConfigError> = LruCache::new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking.
//! let bad = LruCache::<u64, String>::new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when configuration parameters are invalid.
///
/// Produced by fallible constructors (`new`, `WorkloadSpec::build`) and by
/// [`CacheHierarchy::add_level`](crate::hierarchy::CacheHierarchy::add_level)
/// and [`CacheHierarchy::put`](crate::hierarchy::CacheHierarchy::put). Carries
/// a human-readable description of which parameter failed validation. The
/// caller never receives a partially constructed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
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

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on the policy types (e.g.
/// [`LfuCache::check_invariants`](crate::policy::LfuCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
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
