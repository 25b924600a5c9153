//! tiercache: pluggable cache eviction policies composed into a multilevel
//! hierarchy.
//!
//! The crate has two halves:
//!
//! - **Policies**: [`policy::FifoCache`], [`policy::LruCache`] and
//!   [`policy::LfuCache`] share one lifecycle engine (lookup, insert/update,
//!   delete, clear, capacity enforcement, statistics) and differ only in the
//!   eviction hooks that maintain their internal ordering structures. All
//!   three implement the object-safe [`traits::CachePolicy`] contract.
//! - **Hierarchy**: [`hierarchy::CacheHierarchy`] chains boxed policy
//!   instances into ordered levels with simulated per-level latency,
//!   write-through inserts, and on-hit promotion into faster levels.
//!
//! ```
//! use tiercache::builder::CacheBuilder;
//! use tiercache::hierarchy::CacheHierarchy;
//! use tiercache::traits::PolicyKind;
//!
//! let mut hierarchy = CacheHierarchy::new("demo");
//! hierarchy
//!     .add_level(CacheBuilder::new(4).build::<u64, String>(PolicyKind::Lru).unwrap(), "L1", 1.0)
//!     .unwrap();
//! hierarchy
//!     .add_level(CacheBuilder::new(16).build::<u64, String>(PolicyKind::Lfu).unwrap(), "L2", 10.0)
//!     .unwrap();
//!
//! hierarchy.put(1, "hot".to_string()).unwrap();
//! assert_eq!(hierarchy.get(&1), Some("hot".to_string()));
//! ```
//!
//! Supporting modules: [`backend`] (storage tier descriptors used to
//! parameterize level latency), [`workload`] (deterministic synthetic access
//! streams and a hierarchy replay driver), [`builder`] (policy construction
//! behind an explicit [`traits::PolicyKind`] tag).
//!
//! Everything is single-threaded and synchronous. With the `concurrency`
//! feature, [`sync::SharedHierarchy`] wraps a hierarchy in a mutex whose
//! critical section spans a full traversal-plus-promotion sequence.

pub mod backend;
pub mod builder;
pub mod ds;
pub mod error;
pub mod hierarchy;
pub mod policy;
pub mod prelude;
pub mod stats;
#[cfg(feature = "concurrency")]
pub mod sync;
pub mod traits;
pub mod workload;
