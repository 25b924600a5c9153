//! Passive data model: cached entries and per-policy statistics.
//!
//! ## Key Components
//!
//! - [`CacheEntry`]: one cached item as the owning policy sees it (value,
//!   last-touch timestamp, access count, logical size). No behavior beyond
//!   field updates performed by the engine.
//! - [`CacheStats`]: aggregate hit/miss/eviction counters plus derived rates.
//!
//! ## Ownership
//!
//! Both types are owned exclusively by the policy instance that holds them:
//! entries are created on insert, mutated on access/update, and destroyed on
//! delete, eviction, or clear. [`CacheStats::reset`] replaces the counter set
//! with a fresh one seeded with the *current* size and the *original*
//! capacity; `clear` on a policy only zeroes `current_size` and leaves the
//! hit/miss/eviction counters untouched.

use std::time::Instant;

/// A single cached item.
///
/// The key is not duplicated here; it lives as the key of the policy's entry
/// map, and the ordering structures carry their own clones of it.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Stored value.
    pub value: V,
    /// Timestamp of the last insert, update, or counted access.
    pub last_touch: Instant,
    /// Number of touches, starting at 1 on insert.
    pub access_count: u64,
    /// Logical size of the entry. Defaults to 1.
    pub size: usize,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new(value: V, size: usize) -> Self {
        Self {
            value,
            last_touch: Instant::now(),
            access_count: 1,
            size,
        }
    }

    /// Records a touch: refreshes the timestamp and bumps the access count.
    pub(crate) fn touch(&mut self) {
        self.last_touch = Instant::now();
        self.access_count += 1;
    }
}

/// Aggregate counters for one policy instance.
///
/// `current_size` is always recomputed from the entry map after a mutation,
/// never tracked independently, so it cannot drift.
///
/// # Example
///
/// ```
/// use tiercache::prelude::*;
///
/// let mut cache: FifoCache<u64, &str> = FifoCache::new(2).unwrap();
/// cache.put(1, "a");
/// cache.get(&1);
/// cache.get(&2);
///
/// let stats = cache.stats();
/// assert_eq!(stats.hits, 1);
/// assert_eq!(stats.misses, 1);
/// assert_eq!(stats.hit_rate(), 0.5);
/// assert_eq!(stats.utilization(), 0.5);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CacheStats {
    /// Lookups that found the key.
    pub hits: u64,
    /// Lookups that did not find the key.
    pub misses: u64,
    /// Entries removed by capacity enforcement.
    pub evictions: u64,
    /// Number of entries currently stored.
    pub current_size: usize,
    /// Configured capacity.
    pub max_size: usize,
}

impl CacheStats {
    pub(crate) fn for_capacity(capacity: usize) -> Self {
        Self {
            max_size: capacity,
            ..Self::default()
        }
    }

    /// Replaces all counters with a fresh set seeded with the current entry
    /// count and the original capacity.
    pub(crate) fn reset(&mut self, current_size: usize) {
        *self = Self {
            current_size,
            max_size: self.max_size,
            ..Self::default()
        };
    }

    /// Fraction of lookups that hit, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let accesses = self.hits + self.misses;
        if accesses == 0 {
            0.0
        } else {
            self.hits as f64 / accesses as f64
        }
    }

    /// Complement of [`hit_rate`](Self::hit_rate).
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }

    /// Occupancy as a fraction of capacity, or 0.0 for capacity 0.
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            self.current_size as f64 / self.max_size as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_starts_with_one_access() {
        let entry = CacheEntry::new("v", 1);
        assert_eq!(entry.access_count, 1);
        assert_eq!(entry.size, 1);
    }

    #[test]
    fn touch_bumps_count_and_timestamp() {
        let mut entry = CacheEntry::new("v", 1);
        let before = entry.last_touch;
        entry.touch();
        assert_eq!(entry.access_count, 2);
        assert!(entry.last_touch >= before);
    }

    #[test]
    fn rates_are_zero_before_any_access() {
        let stats = CacheStats::for_capacity(10);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 1.0);
        assert_eq!(stats.utilization(), 0.0);
    }

    #[test]
    fn derived_rates() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            evictions: 0,
            current_size: 5,
            max_size: 10,
        };
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(stats.miss_rate(), 0.25);
        assert_eq!(stats.utilization(), 0.5);
    }

    #[test]
    fn reset_keeps_size_and_capacity_only() {
        let mut stats = CacheStats {
            hits: 9,
            misses: 4,
            evictions: 2,
            current_size: 7,
            max_size: 10,
        };
        stats.reset(7);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.current_size, 7);
        assert_eq!(stats.max_size, 10);
    }
}
