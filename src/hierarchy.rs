//! # Multilevel cache hierarchy
//!
//! An ordered stack of cache levels, fastest first, each pairing a boxed
//! policy with a simulated lookup latency and its own counters. Reads walk
//! the stack top-down; a hit at a lower level copies the value back into
//! every level above it (promotion) so the next read hits sooner:
//!
//! ```text
//!   get(k)         L0 (LRU, 1 ms)   miss          ── level miss counted
//!      │           L1 (LRU, 5 ms)   miss          ── level miss counted
//!      └─────────► L2 (LFU, 20 ms)  hit ──┐
//!                                         │ promote k into L1, L0
//!                  L0 ◄── L1 ◄────────────┘
//! ```
//!
//! ## Accounting rules
//!
//! | Event                    | Level counters                  | Global counters          |
//! |--------------------------|---------------------------------|--------------------------|
//! | level traversed          | `total_latency_ms += latency`   | —                        |
//! | level misses, deeper hit | `misses += 1`                   | —                        |
//! | level hits               | `hits += 1`                     | `total_hits += 1`, `total_latency_ms += cumulative` |
//! | no level hits            | every level's `misses += 1`     | `total_misses += 1`      |
//! | promotion into a level   | `promotions += 1`               | `total_promotions += 1`  |
//!
//! Latency is accounting only; nothing sleeps. The global latency total
//! accrues the cumulative latency down to the hitting level, so
//! `avg_latency_ms` reflects how deep reads had to travel. `demotions` is
//! reserved in [`LevelStats`]; no demotion protocol exists yet.
//!
//! Writes are write-through: `put` stores into every level, top to bottom,
//! with no rollback. Each level's policy evicts independently, so a key can
//! survive at a large lower level after a small upper level evicted it.
//!
//! ## Example Usage
//!
//! ```
//! use tiercache::prelude::*;
//!
//! let mut tiers: CacheHierarchy<&str, u32> = CacheHierarchy::new("demo");
//! tiers.add_level(Box::new(LruCache::new(2).unwrap()), "L1", 1.0).unwrap();
//! tiers.add_level(Box::new(LfuCache::new(8).unwrap()), "L2", 10.0).unwrap();
//!
//! tiers.put("a", 1).unwrap();
//! assert_eq!(tiers.get(&"a"), Some(1));
//!
//! let stats = tiers.get_all_stats();
//! assert_eq!(stats.global.total_hits, 1);
//! assert_eq!(stats.levels[0].hits, 1);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::backend::Backend;
use crate::error::ConfigError;
use crate::stats::CacheStats;
use crate::traits::{BoxedPolicy, CachePolicy, PolicyKind};

/// Per-level counters, live and snapshot form at once.
///
/// `hits`/`misses` count this level's own lookups during hierarchy reads:
/// a level that misses is counted even when a deeper level later hits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelStats {
    pub name: String,
    pub hits: u64,
    pub misses: u64,
    pub promotions: u64,
    /// Reserved for a future demotion protocol; never incremented.
    pub demotions: u64,
    pub total_latency_ms: f64,
}

impl LevelStats {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hits: 0,
            misses: 0,
            promotions: 0,
            demotions: 0,
            total_latency_ms: 0.0,
        }
    }

    /// Hit fraction of this level's own lookups; 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Mean latency charged per lookup at this level.
    pub fn avg_latency_ms(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.total_latency_ms / total as f64
        }
    }
}

/// One tier: a boxed policy plus its latency and counters.
pub struct CacheLevel<K, V> {
    cache: BoxedPolicy<K, V>,
    name: String,
    latency_ms: f64,
    stats: LevelStats,
}

impl<K, V> CacheLevel<K, V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency_ms
    }

    pub fn stats(&self) -> &LevelStats {
        &self.stats
    }

    pub fn cache(&self) -> &dyn CachePolicy<K, V> {
        self.cache.as_ref()
    }

    /// Direct mutable access to the level's policy, bypassing hierarchy
    /// accounting. Level counters are untouched; the policy's own stats
    /// still apply.
    pub fn cache_mut(&mut self) -> &mut dyn CachePolicy<K, V> {
        self.cache.as_mut()
    }
}

impl<K, V> fmt::Debug for CacheLevel<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheLevel")
            .field("name", &self.name)
            .field("policy", &self.cache.kind())
            .field("capacity", &self.cache.capacity())
            .field("size", &self.cache.len())
            .field("latency_ms", &self.latency_ms)
            .finish()
    }
}

/// Hierarchy-wide aggregate snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GlobalStats {
    pub total_hits: u64,
    pub total_misses: u64,
    pub total_accesses: u64,
    pub global_hit_rate: f64,
    pub total_promotions: u64,
    pub total_latency_ms: f64,
    pub avg_latency_ms: f64,
    pub num_levels: usize,
    pub total_capacity: usize,
    pub total_size: usize,
}

/// Full statistics snapshot: global aggregates plus per-level counters in
/// level order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HierarchyStats {
    pub global: GlobalStats,
    pub levels: Vec<LevelStats>,
}

/// Configuration-and-state snapshot of one level, for dashboards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelDetails {
    pub name: String,
    pub policy: PolicyKind,
    pub capacity: usize,
    pub current_size: usize,
    pub utilization: f64,
    pub latency_ms: f64,
    pub cache_stats: CacheStats,
    pub level_stats: LevelStats,
}

/// Ordered multilevel cache. See the module docs for the traversal and
/// accounting protocol.
pub struct CacheHierarchy<K, V> {
    name: String,
    levels: Vec<CacheLevel<K, V>>,
    total_hits: u64,
    total_misses: u64,
    total_promotions: u64,
    total_latency_ms: f64,
}

impl<K, V> CacheHierarchy<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            levels: Vec::new(),
            total_hits: 0,
            total_misses: 0,
            total_promotions: 0,
            total_latency_ms: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of levels.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Alias for [`num_levels`](Self::num_levels).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Sum of level capacities.
    pub fn total_capacity(&self) -> usize {
        self.levels.iter().map(|level| level.cache.capacity()).sum()
    }

    /// Sum of resident entries across levels. A key cached at several
    /// levels counts once per level.
    pub fn total_size(&self) -> usize {
        self.levels.iter().map(|level| level.cache.len()).sum()
    }

    /// Appends a level below all existing ones.
    ///
    /// Fails if another level already uses `name`.
    pub fn add_level(
        &mut self,
        cache: BoxedPolicy<K, V>,
        name: impl Into<String>,
        latency_ms: f64,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if self.levels.iter().any(|level| level.name == name) {
            return Err(ConfigError::new(format!(
                "a cache level named '{name}' already exists"
            )));
        }
        self.levels.push(CacheLevel {
            cache,
            stats: LevelStats::new(name.clone()),
            name,
            latency_ms,
        });
        Ok(())
    }

    /// Appends a level taking its name and latency from a storage backend
    /// descriptor.
    pub fn add_backend_level(
        &mut self,
        cache: BoxedPolicy<K, V>,
        backend: &Backend,
    ) -> Result<(), ConfigError> {
        self.add_level(cache, backend.name.clone(), backend.latency_ms)
    }

    /// Looks up `key` top-down, promoting on a hit below level 0.
    ///
    /// Counter effects follow the table in the module docs.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let mut cumulative_latency = 0.0;
        let mut hit: Option<(usize, V)> = None;

        for (index, level) in self.levels.iter_mut().enumerate() {
            cumulative_latency += level.latency_ms;
            level.stats.total_latency_ms += level.latency_ms;

            if let Some(value) = level.cache.get(key) {
                let value = value.clone();
                level.stats.hits += 1;
                self.total_hits += 1;
                self.total_latency_ms += cumulative_latency;
                hit = Some((index, value));
                break;
            }
            level.stats.misses += 1;
        }

        match hit {
            Some((index, value)) => {
                if index > 0 {
                    self.promote(key, &value, index);
                }
                Some(value)
            }
            None => {
                self.total_misses += 1;
                None
            }
        }
    }

    /// Writes `key` into every level above the hit, top to bottom.
    fn promote(&mut self, key: &K, value: &V, hit_index: usize) {
        for level in &mut self.levels[..hit_index] {
            level.cache.put(key.clone(), value.clone());
            level.stats.promotions += 1;
            self.total_promotions += 1;
        }
    }

    /// Write-through: stores into every level, top to bottom.
    ///
    /// Fails if the hierarchy has no levels. Per-level evictions may fire
    /// independently; there is no rollback.
    pub fn put(&mut self, key: K, value: V) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::new("cache hierarchy has no levels"));
        }
        for level in &mut self.levels {
            level.cache.put(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Deletes `key` from every level; true if any level held it.
    pub fn delete(&mut self, key: &K) -> bool {
        let mut deleted = false;
        for level in &mut self.levels {
            if level.cache.delete(key) {
                deleted = true;
            }
        }
        deleted
    }

    /// True if any level holds `key`. Touches no counters or orderings.
    pub fn contains(&self, key: &K) -> bool {
        self.levels.iter().any(|level| level.cache.contains(key))
    }

    /// Empties every level. Level and global counters survive, matching
    /// per-policy `clear` semantics.
    pub fn clear(&mut self) {
        for level in &mut self.levels {
            level.cache.clear();
        }
    }

    /// Zeroes level counters, per-policy counters, and global counters.
    pub fn reset_stats(&mut self) {
        for level in &mut self.levels {
            level.stats = LevelStats::new(level.name.clone());
            level.cache.reset_stats();
        }
        self.total_hits = 0;
        self.total_misses = 0;
        self.total_promotions = 0;
        self.total_latency_ms = 0.0;
    }

    pub fn get_level(&self, name: &str) -> Option<&CacheLevel<K, V>> {
        self.levels.iter().find(|level| level.name == name)
    }

    pub fn get_level_mut(&mut self, name: &str) -> Option<&mut CacheLevel<K, V>> {
        self.levels.iter_mut().find(|level| level.name == name)
    }

    pub fn get_level_stats(&self, name: &str) -> Option<&LevelStats> {
        self.get_level(name).map(|level| &level.stats)
    }

    /// Global aggregates plus per-level counters, in level order.
    pub fn get_all_stats(&self) -> HierarchyStats {
        let total_accesses = self.total_hits + self.total_misses;
        let global = GlobalStats {
            total_hits: self.total_hits,
            total_misses: self.total_misses,
            total_accesses,
            global_hit_rate: if total_accesses == 0 {
                0.0
            } else {
                self.total_hits as f64 / total_accesses as f64
            },
            total_promotions: self.total_promotions,
            total_latency_ms: self.total_latency_ms,
            avg_latency_ms: if total_accesses == 0 {
                0.0
            } else {
                self.total_latency_ms / total_accesses as f64
            },
            num_levels: self.num_levels(),
            total_capacity: self.total_capacity(),
            total_size: self.total_size(),
        };
        HierarchyStats {
            global,
            levels: self.levels.iter().map(|level| level.stats.clone()).collect(),
        }
    }

    /// Per-level configuration-and-state snapshots, in level order.
    pub fn get_level_details(&self) -> Vec<LevelDetails> {
        self.levels
            .iter()
            .map(|level| LevelDetails {
                name: level.name.clone(),
                policy: level.cache.kind(),
                capacity: level.cache.capacity(),
                current_size: level.cache.len(),
                utilization: level.cache.stats().utilization(),
                latency_ms: level.latency_ms,
                cache_stats: level.cache.stats(),
                level_stats: level.stats.clone(),
            })
            .collect()
    }
}

impl<K, V> Default for CacheHierarchy<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new("MultilevelCache")
    }
}

impl<K, V> fmt::Display for CacheHierarchy<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_accesses = self.total_hits + self.total_misses;
        let hit_rate = if total_accesses == 0 {
            0.0
        } else {
            self.total_hits as f64 / total_accesses as f64
        };
        let levels = self
            .levels
            .iter()
            .map(|level| format!("{}({}/{})", level.name, level.cache.kind(), level.cache.capacity()))
            .collect::<Vec<_>>()
            .join(" -> ");
        write!(
            f,
            "CacheHierarchy(name='{}', levels=[{}], hit_rate={:.2}%, size={}/{})",
            self.name,
            levels,
            hit_rate * 100.0,
            self.total_size(),
            self.total_capacity()
        )
    }
}

impl<K, V> fmt::Debug for CacheHierarchy<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheHierarchy")
            .field("name", &self.name)
            .field("levels", &self.levels)
            .field("total_hits", &self.total_hits)
            .field("total_misses", &self.total_misses)
            .field("total_promotions", &self.total_promotions)
            .field("total_latency_ms", &self.total_latency_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{FifoCache, LfuCache, LruCache};

    fn three_tier() -> CacheHierarchy<&'static str, u32> {
        let mut tiers = CacheHierarchy::new("test");
        tiers
            .add_level(Box::new(LruCache::new(2).unwrap()), "L1", 1.0)
            .unwrap();
        tiers
            .add_level(Box::new(LruCache::new(4).unwrap()), "L2", 5.0)
            .unwrap();
        tiers
            .add_level(Box::new(LfuCache::new(16).unwrap()), "L3", 20.0)
            .unwrap();
        tiers
    }

    #[test]
    fn put_writes_through_all_levels() {
        let mut tiers = three_tier();
        tiers.put("a", 1).unwrap();
        for name in ["L1", "L2", "L3"] {
            assert!(tiers.get_level(name).unwrap().cache().contains(&"a"));
        }
        assert_eq!(tiers.total_size(), 3);
    }

    #[test]
    fn put_without_levels_is_an_error() {
        let mut tiers: CacheHierarchy<u32, u32> = CacheHierarchy::new("empty");
        assert!(tiers.put(1, 1).is_err());
    }

    #[test]
    fn duplicate_level_name_is_rejected() {
        let mut tiers: CacheHierarchy<u32, u32> = CacheHierarchy::new("test");
        tiers
            .add_level(Box::new(LruCache::new(2).unwrap()), "L1", 1.0)
            .unwrap();
        let err = tiers
            .add_level(Box::new(FifoCache::new(2).unwrap()), "L1", 5.0)
            .unwrap_err();
        assert!(err.to_string().contains("L1"));
        assert_eq!(tiers.num_levels(), 1);
    }

    fn drop_from_level(tiers: &mut CacheHierarchy<&'static str, u32>, name: &str, key: &&'static str) {
        tiers.get_level_mut(name).unwrap().cache_mut().delete(key);
    }

    #[test]
    fn deep_hit_promotes_into_upper_levels() {
        let mut tiers = three_tier();
        tiers.put("x", 7).unwrap();
        drop_from_level(&mut tiers, "L1", &"x");
        drop_from_level(&mut tiers, "L2", &"x");

        assert_eq!(tiers.get(&"x"), Some(7));
        assert!(tiers.get_level("L1").unwrap().cache().contains(&"x"));
        assert!(tiers.get_level("L2").unwrap().cache().contains(&"x"));

        let stats = tiers.get_all_stats();
        assert_eq!(stats.global.total_promotions, 2);
        assert_eq!(stats.levels[0].promotions, 1);
        assert_eq!(stats.levels[1].promotions, 1);
        assert_eq!(stats.levels[2].promotions, 0);
        // Levels traversed before the hit count their own misses.
        assert_eq!(stats.levels[0].misses, 1);
        assert_eq!(stats.levels[1].misses, 1);
        assert_eq!(stats.levels[2].hits, 1);
        assert_eq!(stats.global.total_misses, 0);
    }

    #[test]
    fn global_miss_counts_once() {
        let mut tiers = three_tier();
        assert_eq!(tiers.get(&"ghost"), None);

        let stats = tiers.get_all_stats();
        assert_eq!(stats.global.total_misses, 1);
        assert_eq!(stats.global.total_hits, 0);
        for level in &stats.levels {
            assert_eq!(level.misses, 1);
        }
    }

    #[test]
    fn latency_accrues_per_traversed_level() {
        let mut tiers = three_tier();
        tiers.put("a", 1).unwrap();

        // L1 hit: only L1 traversed.
        tiers.get(&"a");
        let stats = tiers.get_all_stats();
        assert_eq!(stats.levels[0].total_latency_ms, 1.0);
        assert_eq!(stats.levels[1].total_latency_ms, 0.0);
        assert_eq!(stats.global.total_latency_ms, 1.0);

        // Full miss traverses everything but adds no global latency.
        tiers.get(&"ghost");
        let stats = tiers.get_all_stats();
        assert_eq!(stats.levels[0].total_latency_ms, 2.0);
        assert_eq!(stats.levels[1].total_latency_ms, 5.0);
        assert_eq!(stats.levels[2].total_latency_ms, 20.0);
        assert_eq!(stats.global.total_latency_ms, 1.0);
        assert_eq!(stats.global.total_accesses, 2);
        assert_eq!(stats.global.avg_latency_ms, 0.5);
    }

    #[test]
    fn deep_hit_charges_cumulative_latency_globally() {
        let mut tiers = three_tier();
        tiers.put("x", 7).unwrap();
        drop_from_level(&mut tiers, "L1", &"x");
        drop_from_level(&mut tiers, "L2", &"x");

        tiers.get(&"x"); // hits L3 at 1 + 5 + 20 cumulative
        let stats = tiers.get_all_stats();
        assert_eq!(stats.global.total_latency_ms, 26.0);
        assert_eq!(stats.global.avg_latency_ms, 26.0);
    }

    #[test]
    fn single_level_hierarchy_promotes_nothing() {
        let mut tiers: CacheHierarchy<u32, u32> = CacheHierarchy::new("solo");
        tiers
            .add_level(Box::new(LruCache::new(4).unwrap()), "only", 2.0)
            .unwrap();
        tiers.put(1, 10).unwrap();
        assert_eq!(tiers.get(&1), Some(10));
        assert_eq!(tiers.get_all_stats().global.total_promotions, 0);
    }

    #[test]
    fn delete_reports_any_level() {
        let mut tiers = three_tier();
        tiers.put("a", 1).unwrap();
        drop_from_level(&mut tiers, "L1", &"a");

        assert!(tiers.delete(&"a"));
        assert!(!tiers.contains(&"a"));
        assert!(!tiers.delete(&"a"));
    }

    #[test]
    fn contains_is_pure() {
        let mut tiers = three_tier();
        tiers.put("a", 1).unwrap();
        assert!(tiers.contains(&"a"));
        assert!(!tiers.contains(&"b"));

        let stats = tiers.get_all_stats();
        assert_eq!(stats.global.total_accesses, 0);
        for level in &stats.levels {
            assert_eq!(level.hits + level.misses, 0);
        }
    }

    #[test]
    fn clear_preserves_counters() {
        let mut tiers = three_tier();
        tiers.put("a", 1).unwrap();
        tiers.get(&"a");
        tiers.get(&"ghost");
        tiers.clear();

        assert_eq!(tiers.total_size(), 0);
        let stats = tiers.get_all_stats();
        assert_eq!(stats.global.total_hits, 1);
        assert_eq!(stats.global.total_misses, 1);
    }

    #[test]
    fn reset_stats_zeroes_everything() {
        let mut tiers = three_tier();
        tiers.put("a", 1).unwrap();
        tiers.get(&"a");
        tiers.get(&"ghost");
        tiers.reset_stats();

        let stats = tiers.get_all_stats();
        assert_eq!(stats.global.total_hits, 0);
        assert_eq!(stats.global.total_misses, 0);
        assert_eq!(stats.global.total_promotions, 0);
        assert_eq!(stats.global.total_latency_ms, 0.0);
        assert_eq!(stats.levels[0], LevelStats::new("L1"));
        // Entries survive a stats reset.
        assert!(tiers.contains(&"a"));
    }

    #[test]
    fn level_details_snapshot() {
        let mut tiers = three_tier();
        tiers.put("a", 1).unwrap();
        tiers.put("b", 2).unwrap();

        let details = tiers.get_level_details();
        assert_eq!(details.len(), 3);
        assert_eq!(details[0].name, "L1");
        assert_eq!(details[0].policy, PolicyKind::Lru);
        assert_eq!(details[0].capacity, 2);
        assert_eq!(details[0].current_size, 2);
        assert_eq!(details[0].utilization, 1.0);
        assert_eq!(details[2].policy, PolicyKind::Lfu);
        assert_eq!(details[2].latency_ms, 20.0);
    }

    #[test]
    fn display_names_each_level() {
        let tiers = three_tier();
        let text = tiers.to_string();
        assert!(text.contains("L1(LRU/2)"));
        assert!(text.contains("L2(LRU/4)"));
        assert!(text.contains("L3(LFU/16)"));
    }
}
