//! Synthetic access-pattern generators and a hierarchy replay driver.
//!
//! Deterministic key streams for exercising policies and hierarchies without
//! pulling in external RNG crates: a XorShift64 generator drives uniform
//! draws, and Zipfian sampling uses the YCSB inverse-CDF construction so
//! skewed runs are reproducible from a seed.
//!
//! A [`WorkloadSpec`] validates its parameters and builds a [`Workload`],
//! a finite restartable iterator of [`Op`]s. [`replay`] feeds a workload
//! through a [`CacheHierarchy`] and reports what happened.
//!
//! ## Example Usage
//!
//! ```
//! use tiercache::workload::{KeyDistribution, WorkloadSpec};
//!
//! let workload = WorkloadSpec {
//!     universe: 100,
//!     operations: 1_000,
//!     read_ratio: 0.8,
//!     distribution: KeyDistribution::Zipfian { theta: 0.99 },
//!     seed: 42,
//! }
//! .build()
//! .unwrap();
//!
//! assert_eq!(workload.count(), 1_000);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::hierarchy::CacheHierarchy;

/// How keys are drawn from `[0, universe)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyDistribution {
    /// Every key equally likely.
    Uniform,
    /// Skewed toward low-numbered keys; `theta` controls skew
    /// (0.0 = uniform, 0.99 = YCSB default).
    Zipfian { theta: f64 },
    /// Cycles 0, 1, …, universe-1, 0, … — the adversarial scan pattern.
    Sequential,
}

/// One cache operation against key `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read(u64),
    Write(u64),
}

impl Op {
    pub fn key(&self) -> u64 {
        match *self {
            Op::Read(key) | Op::Write(key) => key,
        }
    }
}

/// Parameters for a synthetic workload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadSpec {
    /// Number of distinct keys; draws land in `[0, universe)`.
    pub universe: u64,
    /// Total operations the workload emits.
    pub operations: usize,
    /// Probability an operation is a read, in `[0, 1]`.
    pub read_ratio: f64,
    pub distribution: KeyDistribution,
    pub seed: u64,
}

impl WorkloadSpec {
    /// Validates the parameters and builds the generator.
    pub fn build(self) -> Result<Workload, ConfigError> {
        if self.universe == 0 {
            return Err(ConfigError::new("workload universe must be positive"));
        }
        if self.operations == 0 {
            return Err(ConfigError::new("workload must emit at least one operation"));
        }
        if !(0.0..=1.0).contains(&self.read_ratio) {
            return Err(ConfigError::new(format!(
                "read_ratio must be within [0, 1], got {}",
                self.read_ratio
            )));
        }
        let zipfian = match self.distribution {
            KeyDistribution::Zipfian { theta } => Some(ZipfianState::new(self.universe, theta)),
            _ => None,
        };
        Ok(Workload {
            spec: self,
            rng: XorShift64::new(self.seed),
            zipfian,
            scan_pos: 0,
            emitted: 0,
        })
    }
}

/// Finite, restartable, deterministic operation stream.
#[derive(Debug, Clone)]
pub struct Workload {
    spec: WorkloadSpec,
    rng: XorShift64,
    zipfian: Option<ZipfianState>,
    scan_pos: u64,
    emitted: usize,
}

impl Workload {
    pub fn spec(&self) -> &WorkloadSpec {
        &self.spec
    }

    /// Operations not yet emitted.
    pub fn remaining(&self) -> usize {
        self.spec.operations - self.emitted
    }

    /// Rewinds to the start; the replayed stream is identical.
    pub fn reset(&mut self) {
        self.rng = XorShift64::new(self.spec.seed);
        self.scan_pos = 0;
        self.emitted = 0;
    }

    fn next_key(&mut self) -> u64 {
        match self.spec.distribution {
            KeyDistribution::Uniform => self.rng.next_u64() % self.spec.universe,
            KeyDistribution::Zipfian { .. } => {
                let u = self.rng.next_f64();
                self.zipfian.as_ref().expect("zipfian state").sample(u)
            }
            KeyDistribution::Sequential => {
                let key = self.scan_pos;
                self.scan_pos = (self.scan_pos + 1) % self.spec.universe;
                key
            }
        }
    }
}

impl Iterator for Workload {
    type Item = Op;

    fn next(&mut self) -> Option<Op> {
        if self.emitted >= self.spec.operations {
            return None;
        }
        self.emitted += 1;
        let key = self.next_key();
        if self.rng.next_f64() < self.spec.read_ratio {
            Some(Op::Read(key))
        } else {
            Some(Op::Write(key))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Workload {}

/// Outcome of replaying a workload against a hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReplayReport {
    pub reads: u64,
    pub writes: u64,
    pub hits: u64,
    pub misses: u64,
}

impl ReplayReport {
    /// Hit fraction of reads; 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            self.hits as f64 / self.reads as f64
        }
    }
}

/// Drains `workload` into `hierarchy`: reads go through `get`, writes store
/// `value_for_key(key)` through `put`.
///
/// Read misses do not install the key; only explicit writes populate the
/// hierarchy. Fails if the hierarchy has no levels.
pub fn replay<K, V, F>(
    hierarchy: &mut CacheHierarchy<K, V>,
    workload: &mut Workload,
    value_for_key: F,
) -> Result<ReplayReport, ConfigError>
where
    K: Eq + Hash + Clone + From<u64>,
    V: Clone,
    F: Fn(u64) -> V,
{
    let mut report = ReplayReport::default();
    for op in workload {
        match op {
            Op::Read(key) => {
                report.reads += 1;
                if hierarchy.get(&K::from(key)).is_some() {
                    report.hits += 1;
                } else {
                    report.misses += 1;
                }
            }
            Op::Write(key) => {
                report.writes += 1;
                hierarchy.put(K::from(key), value_for_key(key))?;
            }
        }
    }
    Ok(report)
}

/// Zipfian inverse-CDF sampler (YCSB construction). Pre-computes zeta so
/// each sample is O(1).
#[derive(Debug, Clone)]
struct ZipfianState {
    n: u64,
    theta: f64,
    zeta_n: f64,
    alpha: f64,
    eta: f64,
}

impl ZipfianState {
    fn new(n: u64, theta: f64) -> Self {
        let theta = theta.clamp(0.0, 0.9999); // theta=1 divides by zero below
        let zeta_2 = Self::zeta(2, theta);
        let zeta_n = Self::zeta(n, theta);
        let alpha = 1.0 / (1.0 - theta);
        let eta = (1.0 - (2.0 / n as f64).powf(1.0 - theta)) / (1.0 - zeta_2 / zeta_n);
        Self {
            n,
            theta,
            zeta_n,
            alpha,
            eta,
        }
    }

    /// zeta(n, theta) = sum(1/i^theta for i in 1..=n)
    fn zeta(n: u64, theta: f64) -> f64 {
        let mut sum = 0.0;
        for i in 1..=n {
            sum += 1.0 / (i as f64).powf(theta);
        }
        sum
    }

    /// Maps uniform `u` in `[0, 1)` to a key, rank 0 most popular.
    fn sample(&self, u: f64) -> u64 {
        let uz = u * self.zeta_n;
        if uz < 1.0 {
            return 0;
        }
        if uz < 1.0 + 0.5_f64.powf(self.theta) {
            return 1;
        }
        let spread = (self.n as f64) * (self.eta * u - self.eta + 1.0).powf(self.alpha);
        (spread as u64).min(self.n - 1)
    }
}

/// Seedable xorshift generator; state is never zero.
#[derive(Debug, Clone, Copy)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}
