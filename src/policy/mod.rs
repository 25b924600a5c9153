//! Eviction policies.
//!
//! [`engine::PolicyCache`] implements the lifecycle shared by every policy
//! (lookup, insert/update, delete, clear, capacity enforcement, statistics)
//! and delegates ordering decisions to an [`engine::EvictionStrategy`]. The
//! three strategies live in their own modules:
//!
//! | Policy         | Ordering structure                    | Evicts            |
//! |----------------|---------------------------------------|-------------------|
//! | [`FifoCache`]  | insertion queue (`VecDeque`)          | oldest insert     |
//! | [`LruCache`]   | recency list (arena-backed)           | least recent use  |
//! | [`LfuCache`]   | frequency buckets + `min_freq`        | lowest frequency, FIFO tie-break |

pub mod engine;
pub mod fifo;
pub mod lfu;
pub mod lru;

pub use engine::{EvictionStrategy, PolicyCache};
pub use fifo::FifoCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
