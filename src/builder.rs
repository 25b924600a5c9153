//! Unified builder for all eviction policies.
//!
//! Produces boxed [`CachePolicy`] trait objects behind an explicit
//! [`PolicyKind`] tag, so hierarchy levels and configuration code pick a
//! policy by value instead of by concrete type.
//!
//! ## Example Usage
//!
//! ```
//! use tiercache::builder::CacheBuilder;
//! use tiercache::traits::{CachePolicy, PolicyKind};
//!
//! let mut cache = CacheBuilder::new(100)
//!     .name("session-cache")
//!     .build::<u64, String>(PolicyKind::Lru)
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! assert_eq!(cache.name(), "session-cache");
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::{FifoCache, LfuCache, LruCache};
use crate::traits::{BoxedPolicy, PolicyKind};

/// Accumulates cache configuration before the policy kind is chosen.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    capacity: usize,
    name: Option<String>,
}

impl CacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            name: None,
        }
    }

    /// Instance name; defaults to the policy tag ("FIFO"/"LRU"/"LFU").
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds a boxed policy of the requested kind.
    ///
    /// Fails when the configured capacity is zero.
    pub fn build<K, V>(self, kind: PolicyKind) -> Result<BoxedPolicy<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Clone + Send + 'static,
    {
        let name = self.name.unwrap_or_else(|| kind.as_str().to_string());
        Ok(match kind {
            PolicyKind::Fifo => Box::new(FifoCache::with_name(self.capacity, name)?),
            PolicyKind::Lru => Box::new(LruCache::with_name(self.capacity, name)?),
            PolicyKind::Lfu => Box::new(LfuCache::with_name(self.capacity, name)?),
        })
    }
}
