//! Storage backend descriptors.
//!
//! Pure configuration data modeling where a cache level physically lives.
//! The hierarchy reads only the name and latency when a level is added via
//! [`add_backend_level`](crate::hierarchy::CacheHierarchy::add_backend_level);
//! capacity and throughput exist for reporting.
//!
//! Latency figures are order-of-magnitude defaults for each medium:
//!
//! | Preset        | Latency  | Throughput  |
//! |---------------|----------|-------------|
//! | `cpu_cache(1)`| 0.001 ms | 100 GB/s    |
//! | `memory()`    | 0.1 ms   | 25 GB/s     |
//! | `ssd()`       | 0.5 ms   | 3.5 GB/s    |
//! | `hdd()`       | 10 ms    | 160 MB/s    |
//! | `network()`   | 50 ms    | 125 MB/s    |

/// Physical medium a backend models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StorageClass {
    CpuCache,
    Memory,
    Ssd,
    Hdd,
    Network,
}

impl StorageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::CpuCache => "CPU_CACHE",
            StorageClass::Memory => "MEMORY",
            StorageClass::Ssd => "SSD",
            StorageClass::Hdd => "HDD",
            StorageClass::Network => "NETWORK",
        }
    }
}

/// Descriptor of one storage tier. All fields are public configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Backend {
    pub name: String,
    pub storage_class: StorageClass,
    pub latency_ms: f64,
    pub capacity_mb: Option<u64>,
    pub throughput_mbps: Option<u64>,
}

impl Backend {
    /// CPU cache at the given level (1, 2 or 3); unknown levels fall back
    /// to L1 latency.
    pub fn cpu_cache(level: u8) -> Self {
        let latency_ms = match level {
            2 => 0.003,
            3 => 0.010,
            _ => 0.001,
        };
        Self {
            name: format!("L{level} CPU Cache"),
            storage_class: StorageClass::CpuCache,
            latency_ms,
            capacity_mb: None,
            throughput_mbps: Some(100_000),
        }
    }

    /// DDR4-class main memory, 16 GB.
    pub fn memory() -> Self {
        Self {
            name: "RAM".to_string(),
            storage_class: StorageClass::Memory,
            latency_ms: 0.1,
            capacity_mb: Some(16_384),
            throughput_mbps: Some(25_000),
        }
    }

    /// NVMe solid-state drive, 500 GB.
    pub fn ssd() -> Self {
        Self {
            name: "SSD".to_string(),
            storage_class: StorageClass::Ssd,
            latency_ms: 0.5,
            capacity_mb: Some(512_000),
            throughput_mbps: Some(3_500),
        }
    }

    /// 7200 RPM spinning disk, 4 TB.
    pub fn hdd() -> Self {
        Self {
            name: "HDD".to_string(),
            storage_class: StorageClass::Hdd,
            latency_ms: 10.0,
            capacity_mb: Some(4_000_000),
            throughput_mbps: Some(160),
        }
    }

    /// LAN-attached storage; capacity unbounded from the cache's view.
    pub fn network() -> Self {
        Self {
            name: "Network".to_string(),
            storage_class: StorageClass::Network,
            latency_ms: 50.0,
            capacity_mb: None,
            throughput_mbps: Some(125),
        }
    }

    /// Human-readable summary, e.g. `"MEMORY - 16GB - 0.1ms latency - 24GB/s"`.
    pub fn description(&self) -> String {
        let mut parts = vec![self.storage_class.as_str().to_string()];
        if let Some(capacity) = self.capacity_mb {
            if capacity >= 1024 {
                parts.push(format!("{}GB", capacity / 1024));
            } else {
                parts.push(format!("{capacity}MB"));
            }
        }
        parts.push(format!("{}ms latency", self.latency_ms));
        if let Some(throughput) = self.throughput_mbps {
            if throughput >= 1024 {
                parts.push(format!("{}GB/s", throughput / 1024));
            } else {
                parts.push(format!("{throughput}MB/s"));
            }
        }
        parts.join(" - ")
    }
}

/// The usual three-tier memory hierarchy: RAM over NVMe over spinning disk,
/// latencies rounded to bench-friendly values.
pub fn typical_hierarchy() -> Vec<Backend> {
    vec![
        Backend {
            name: "L1-RAM".to_string(),
            latency_ms: 1.0,
            capacity_mb: Some(1_024),
            ..Backend::memory()
        },
        Backend {
            name: "L2-SSD".to_string(),
            latency_ms: 5.0,
            capacity_mb: Some(10_240),
            ..Backend::ssd()
        },
        Backend {
            name: "L3-HDD".to_string(),
            latency_ms: 50.0,
            capacity_mb: Some(100_000),
            ..Backend::hdd()
        },
    ]
}
