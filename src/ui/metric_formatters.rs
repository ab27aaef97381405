//! Per-kind metric formatting.
//!
//! Turns raw readings into the short strings shown in the bar, driven by
//! the user's format templates.

use crate::core::config::Templates;
use crate::core::status_bar::{
    FormattedMetric, GpuReading, MemoryReading, MetricKind, NetworkRates, Reading,
};
use crate::ui::template::{format_by_dict, TemplateDict};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Format one metric for display.
///
/// A missing reading, a reading of the wrong shape, or an empty GPU list
/// all produce the "no data" result; the driver decides what that means
/// for the slot.
pub fn format_metric(
    kind: MetricKind,
    reading: Option<Reading>,
    templates: &Templates,
) -> FormattedMetric {
    let dict = match (kind, reading) {
        (MetricKind::CpuLoad, Some(Reading::CpuLoad(load))) => Some(cpu_load_dict(load)),
        (MetricKind::LoadAvg, Some(Reading::LoadAvg(averages))) => Some(load_avg_dict(averages)),
        (MetricKind::MemoryUsage, Some(Reading::Memory(memory))) => Some(memory_dict(memory)),
        (MetricKind::NetworkSpeed, Some(Reading::Network(rates))) => Some(network_dict(rates)),
        (MetricKind::Uptime, Some(Reading::Uptime(seconds))) => Some(uptime_dict(seconds)),
        (MetricKind::GpuLoad, Some(Reading::Gpu(gpus))) => gpu_dict(&gpus),
        (_, None) => None,
        (kind, Some(other)) => {
            log::debug!("reading shape {:?} does not match kind {}", other, kind);
            None
        }
    };

    match dict {
        Some(dict) => FormattedMetric {
            kind,
            text: format_by_dict(templates.for_kind(kind), &dict),
            tooltip: kind.label().to_string(),
        },
        None => FormattedMetric::no_data(kind),
    }
}

fn cpu_load_dict(load: f64) -> TemplateDict {
    TemplateDict::from([("percent", round_percent(load))])
}

fn load_avg_dict(averages: [Option<f64>; 3]) -> TemplateDict {
    let entry = |value: Option<f64>| match value {
        Some(value) => format!("{:.2}", value),
        None => "0".to_string(),
    };

    TemplateDict::from([
        ("1", entry(averages[0])),
        ("5", entry(averages[1])),
        ("15", entry(averages[2])),
    ])
}

fn memory_dict(memory: MemoryReading) -> TemplateDict {
    let percent = if memory.total_bytes > 0 {
        memory.used_bytes as f64 / memory.total_bytes as f64 * 100.0
    } else {
        0.0
    };
    let pressure_percent = memory.pressure.map(|p| p * 100.0).unwrap_or(0.0);

    TemplateDict::from([
        ("used", format!("{:.2}", memory.used_bytes as f64 / GIB)),
        ("total", format!("{:.2}", memory.total_bytes as f64 / GIB)),
        ("unit", "GB".to_string()),
        ("percent", round_percent(percent)),
        ("pressurePercent", round_percent(pressure_percent)),
    ])
}

fn network_dict(rates: NetworkRates) -> TemplateDict {
    let (up, up_unit) = scale_rate(rates.up_bytes_per_sec);
    let (down, down_unit) = scale_rate(rates.down_bytes_per_sec);

    TemplateDict::from([
        ("up", up),
        ("up-unit", format!("{}/s", up_unit)),
        ("down", down),
        ("down-unit", format!("{}/s", down_unit)),
    ])
}

fn uptime_dict(seconds: u64) -> TemplateDict {
    TemplateDict::from([
        ("days", (seconds / 86_400).to_string()),
        ("hours", (seconds % 86_400 / 3_600).to_string()),
        ("minutes", (seconds % 3_600 / 60).to_string()),
    ])
}

/// Only the first reported GPU is displayed; an empty list means no data.
fn gpu_dict(gpus: &[GpuReading]) -> Option<TemplateDict> {
    let gpu = gpus.first()?;

    Some(TemplateDict::from([
        ("percent", round_percent(gpu.utilization)),
        ("used", format!("{:.2}", gpu.memory_used_mb / 1024.0)),
        ("total", format!("{:.2}", gpu.memory_total_mb / 1024.0)),
        ("unit", "GB".to_string()),
    ]))
}

fn round_percent(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Scale a byte rate to a human unit (B, KB, MB, GB, TB in 1024 steps).
fn scale_rate(bytes_per_sec: f64) -> (String, &'static str) {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes_per_sec.max(0.0);
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    (format!("{:.1}", value), UNITS[unit])
}
