//! # Cache Policy Contract
//!
//! One object-safe trait, [`CachePolicy`], covers the lifecycle shared by all
//! eviction policies, so a [`CacheHierarchy`](crate::hierarchy::CacheHierarchy)
//! can own `Box<dyn CachePolicy<K, V>>` levels without caring which policy
//! backs each level.
//!
//! ## Architecture
//!
//! ```text
//!              ┌─────────────────────────────────────────────┐
//!              │            CachePolicy<K, V>                │
//!              │                                             │
//!              │  get(&mut, &K) → Option<&V>    (counted)    │
//!              │  put / put_sized               (write)      │
//!              │  delete(&mut, &K) → bool                    │
//!              │  contains(&, &K) → bool        (pure)       │
//!              │  peek_entry(&, &K)             (pure)       │
//!              │  clear / reset_stats                        │
//!              │  stats / kind / name / capacity / len       │
//!              │  keys / items (policy-native ordering)      │
//!              └─────────────────────┬───────────────────────┘
//!                                    │
//!            ┌───────────────────────┼───────────────────────┐
//!            ▼                       ▼                       ▼
//!       FifoCache               LruCache                LfuCache
//!   (insertion queue)        (recency list)       (frequency buckets)
//! ```
//!
//! ## Contract Summary
//!
//! | Operation    | Mutates ordering | Counts hit/miss | Notes                     |
//! |--------------|------------------|-----------------|---------------------------|
//! | `get`        | policy-specific  | yes             | touches the entry         |
//! | `put`        | policy-specific  | no              | evicts exactly once when full |
//! | `delete`     | removes key      | no              | `false` when absent       |
//! | `contains`   | never            | no              | pure membership test      |
//! | `peek_entry` | never            | no              | pure entry inspection     |
//! | `clear`      | empties          | no              | hit/miss/evictions survive |
//! | `reset_stats`| never            | resets          | reseeds size + capacity   |
//!
//! Capacity is enforced on insert: a `put` of a *new* key into a full cache
//! evicts exactly one entry first, so `len() <= capacity()` holds after every
//! operation.
//!
//! Policy identity travels as an explicit [`PolicyKind`] tag rather than a
//! type name, so display layers and builders can match on it.

use std::fmt;

use crate::stats::{CacheEntry, CacheStats};

/// Discriminant tag identifying a policy variant.
///
/// # Example
///
/// ```
/// use tiercache::traits::PolicyKind;
///
/// assert_eq!(PolicyKind::Lru.to_string(), "LRU");
/// assert_eq!(PolicyKind::Fifo.as_str(), "FIFO");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PolicyKind {
    /// First In, First Out: evict in insertion order, accesses never reorder.
    Fifo,
    /// Least Recently Used: evict the entry untouched for the longest time.
    Lru,
    /// Least Frequently Used: evict the entry with the lowest access count,
    /// FIFO among ties.
    Lfu,
}

impl PolicyKind {
    /// Canonical display name of the variant.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Lfu => "LFU",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared lifecycle of a bounded in-memory cache.
///
/// Implemented by [`FifoCache`](crate::policy::FifoCache),
/// [`LruCache`](crate::policy::LruCache) and
/// [`LfuCache`](crate::policy::LfuCache). Object safe: hierarchies hold
/// `Box<dyn CachePolicy<K, V>>`.
///
/// # Example
///
/// ```
/// use tiercache::prelude::*;
///
/// fn warm<K: Clone, V, C: CachePolicy<K, V> + ?Sized>(cache: &mut C, data: &[(K, V)])
/// where
///     V: Clone,
/// {
///     for (key, value) in data {
///         cache.put(key.clone(), value.clone());
///     }
/// }
///
/// let mut cache: LruCache<u64, &str> = LruCache::new(10).unwrap();
/// warm(&mut cache, &[(1, "one"), (2, "two")]);
/// assert_eq!(cache.len(), 2);
/// ```
/// Owned, type-erased policy as stored by hierarchy levels and produced by
/// the builder. `Send` so hierarchies can sit behind a shared-state wrapper.
pub type BoxedPolicy<K, V> = Box<dyn CachePolicy<K, V> + Send>;

pub trait CachePolicy<K, V> {
    /// Policy discriminant for display and dispatch.
    fn kind(&self) -> PolicyKind;

    /// Instance name, chosen at construction.
    fn name(&self) -> &str;

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the cache is at capacity.
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Snapshot of the current counters.
    fn stats(&self) -> CacheStats;

    /// Looks up a key, counting a hit or miss and touching the entry.
    ///
    /// A hit updates the entry's timestamp and access count and lets the
    /// policy reorder its structures (FIFO ignores accesses by design).
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Inserts or updates a key with the default logical size of 1.
    ///
    /// Updating an existing key overwrites value and size and is treated as
    /// an access for ordering purposes (LRU/LFU) but is not counted in the
    /// hit/miss statistics. Inserting a new key into a full cache evicts
    /// exactly one entry first; capacity is never exceeded.
    fn put(&mut self, key: K, value: V) {
        self.put_sized(key, value, 1);
    }

    /// Inserts or updates a key with an explicit logical size.
    fn put_sized(&mut self, key: K, value: V, size: usize);

    /// Removes a key and all its bookkeeping. Returns whether it was present.
    fn delete(&mut self, key: &K) -> bool;

    /// Pure membership test: no counters, no reordering.
    fn contains(&self, key: &K) -> bool;

    /// Inspects an entry without counting an access or reordering.
    fn peek_entry(&self, key: &K) -> Option<&CacheEntry<V>>;

    /// Removes all entries and resets the ordering structures.
    ///
    /// Only `current_size` drops to 0; hit/miss/eviction counters survive
    /// (use [`reset_stats`](Self::reset_stats) to zero those).
    fn clear(&mut self);

    /// Keys in the policy's native order.
    ///
    /// FIFO: insertion order (next eviction first). LRU: MRU first.
    /// LFU: ascending frequency, insertion order within a frequency.
    fn keys(&self) -> Vec<K>;

    /// `(key, value)` pairs in the same order as [`keys`](Self::keys).
    fn items(&self) -> Vec<(K, V)>;

    /// Replaces the counters with a fresh set seeded with the current entry
    /// count and the original capacity.
    fn reset_stats(&mut self);
}
