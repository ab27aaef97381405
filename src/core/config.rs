use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::status_bar::{BarSide, MetricKind};

/// Default refresh interval in milliseconds.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;

/// Lower bound for the refresh interval; anything smaller in the settings
/// file is clamped up to this.
pub const MIN_REFRESH_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Global on/off switch for the whole bar.
    pub enabled: bool,
    /// Enabled metric kinds, in display order.
    pub metrics: Vec<MetricKind>,
    /// Side of the bar the slots are anchored to.
    pub location: BarSide,
    /// Base priority; slot *i* is created with `priority - i` so the
    /// configured order survives hosts that sort by priority.
    pub priority: i32,
    pub refresh_interval_ms: u64,
    pub templates: Templates,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            metrics: MetricKind::ALL.to_vec(),
            location: BarSide::Right,
            priority: 100,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            templates: Templates::default(),
        }
    }
}

/// One format-template string per metric kind.
///
/// Placeholders use `{name}` syntax and are substituted per tick; see
/// `ui::template::format_by_dict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    pub cpu_load: String,
    pub load_avg: String,
    pub memory_usage: String,
    pub network_speed: String,
    pub uptime: String,
    pub gpu_load: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            cpu_load: "CPU {percent}%".to_string(),
            load_avg: "Load {1} {5} {15}".to_string(),
            memory_usage: "Mem {used}/{total}{unit} {percent}%".to_string(),
            network_speed: "↓{down}{down-unit} ↑{up}{up-unit}".to_string(),
            uptime: "Up {days}d {hours}h {minutes}m".to_string(),
            gpu_load: "GPU {percent}%".to_string(),
        }
    }
}

impl Templates {
    pub fn for_kind(&self, kind: MetricKind) -> &str {
        match kind {
            MetricKind::CpuLoad => &self.cpu_load,
            MetricKind::LoadAvg => &self.load_avg,
            MetricKind::MemoryUsage => &self.memory_usage,
            MetricKind::NetworkSpeed => &self.network_speed,
            MetricKind::Uptime => &self.uptime,
            MetricKind::GpuLoad => &self.gpu_load,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing, empty, or malformed file falls back to defaults; the
    /// settings file is never required to exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Ok(Self::load_from(&path))
    }

    /// Load settings from an explicit path, falling back to defaults on
    /// any read or parse failure.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Settings::default();
        }

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("failed to read settings file {:?}: {}", path, err);
                return Settings::default();
            }
        };

        if data.is_empty() {
            return Settings::default();
        }

        serde_json::from_slice(&data).unwrap_or_else(|err| {
            log::warn!("malformed settings file {:?}: {}", path, err);
            Settings::default()
        })
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize settings")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write settings file: {:?}", path))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("sysbar").join("settings.json"))
    }

    /// Enabled kinds in display order, with duplicates removed (first
    /// occurrence wins). An empty list means the bar has nothing to show.
    pub fn enabled_kinds(&self) -> Vec<MetricKind> {
        if !self.enabled {
            return Vec::new();
        }

        let mut kinds = Vec::with_capacity(self.metrics.len());
        for kind in &self.metrics {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        kinds
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(MIN_REFRESH_INTERVAL_MS))
    }
}
