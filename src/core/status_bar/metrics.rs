use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The system statistics sysbar knows how to display.
///
/// The set is fixed at build time; configuration only selects and orders
/// members of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CpuLoad,
    LoadAvg,
    MemoryUsage,
    NetworkSpeed,
    Uptime,
    GpuLoad,
}

impl MetricKind {
    /// All kinds in canonical display order.
    pub const ALL: [MetricKind; 6] = [
        MetricKind::CpuLoad,
        MetricKind::LoadAvg,
        MetricKind::MemoryUsage,
        MetricKind::NetworkSpeed,
        MetricKind::Uptime,
        MetricKind::GpuLoad,
    ];

    /// Human-readable name, used as the default slot tooltip.
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::CpuLoad => "CPU Load",
            MetricKind::LoadAvg => "Load Average",
            MetricKind::MemoryUsage => "Memory Usage",
            MetricKind::NetworkSpeed => "Network Speed",
            MetricKind::Uptime => "Uptime",
            MetricKind::GpuLoad => "GPU Load",
        }
    }

    /// Configuration key for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            MetricKind::CpuLoad => "cpu_load",
            MetricKind::LoadAvg => "load_avg",
            MetricKind::MemoryUsage => "memory_usage",
            MetricKind::NetworkSpeed => "network_speed",
            MetricKind::Uptime => "uptime",
            MetricKind::GpuLoad => "gpu_load",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .iter()
            .find(|kind| kind.key() == s)
            .copied()
            .ok_or_else(|| format!("unknown metric kind: {}", s))
    }
}

/// Raw value produced by a source adapter for one kind.
///
/// Produced fresh each tick and consumed immediately by the formatter;
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    /// Global CPU usage percent (0-100).
    CpuLoad(f64),
    /// 1/5/15-minute load averages; entries the platform cannot provide
    /// are `None`.
    LoadAvg([Option<f64>; 3]),
    Memory(MemoryReading),
    Network(NetworkRates),
    /// Seconds since boot.
    Uptime(u64),
    Gpu(Vec<GpuReading>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryReading {
    pub used_bytes: u64,
    pub total_bytes: u64,
    /// Kernel memory-pressure ratio in 0..1, macOS only.
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkRates {
    pub up_bytes_per_sec: f64,
    pub down_bytes_per_sec: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpuReading {
    /// Utilization percent (0-100).
    pub utilization: f64,
    pub memory_used_mb: f64,
    pub memory_total_mb: f64,
}

/// Sentinel text meaning "no data" for this tick.
pub const NO_DATA: &str = "-";

/// One formatted metric, ready to be written into a display slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedMetric {
    pub kind: MetricKind,
    pub text: String,
    pub tooltip: String,
}

impl FormattedMetric {
    /// The "no data" result for a kind.
    pub fn no_data(kind: MetricKind) -> Self {
        Self {
            kind,
            text: NO_DATA.to_string(),
            tooltip: kind.label().to_string(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.text == NO_DATA
    }
}
