pub use crate::backend::{Backend, StorageClass};
pub use crate::builder::CacheBuilder;
pub use crate::ds::{NodeId, OrderList};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::hierarchy::{
    CacheHierarchy, CacheLevel, GlobalStats, HierarchyStats, LevelDetails, LevelStats,
};
pub use crate::policy::{EvictionStrategy, FifoCache, LfuCache, LruCache, PolicyCache};
pub use crate::stats::{CacheEntry, CacheStats};
pub use crate::traits::{BoxedPolicy, CachePolicy, PolicyKind};
pub use crate::workload::{
    replay, KeyDistribution, Op, ReplayReport, Workload, WorkloadSpec, XorShift64,
};

#[cfg(feature = "concurrency")]
pub use crate::sync::SharedHierarchy;
