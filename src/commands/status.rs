//! One-shot metrics report.

use anyhow::{Context, Result};
use chrono::Local;
use clap::ArgMatches;
use colored::Colorize;
use futures_util::future::join_all;

use crate::core::config::Settings;
use crate::core::status_bar::{MetricKind, MetricSource, Reading, SystemMetricSource};
use crate::ui::metric_formatters::format_metric;

const FLAG_KINDS: [(&str, MetricKind); 6] = [
    ("cpu", MetricKind::CpuLoad),
    ("load", MetricKind::LoadAvg),
    ("memory", MetricKind::MemoryUsage),
    ("network", MetricKind::NetworkSpeed),
    ("uptime", MetricKind::Uptime),
    ("gpu", MetricKind::GpuLoad),
];

/// Execute the status command.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let settings = Settings::load()?;
    let kinds = selected_kinds(matches, &settings);
    let json = matches.get_flag("json");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build runtime")?;

    runtime.block_on(async {
        let source = SystemMetricSource::init().await;

        // CPU usage and network rates are deltas against the previous
        // sample; fetch twice so the one-shot report has a baseline.
        let _ = join_all(kinds.iter().map(|kind| source.fetch(*kind))).await;
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
        let readings = join_all(kinds.iter().map(|kind| source.fetch(*kind))).await;

        if json {
            print_json(&kinds, &readings)
        } else {
            print_report(&settings, &kinds, readings);
            Ok(())
        }
    })
}

/// Kinds selected by filter flags; no flags means everything the
/// settings enable (or all kinds when the settings enable nothing).
fn selected_kinds(matches: &ArgMatches, settings: &Settings) -> Vec<MetricKind> {
    let flagged: Vec<MetricKind> = FLAG_KINDS
        .iter()
        .filter(|(flag, _)| matches.get_flag(flag))
        .map(|(_, kind)| *kind)
        .collect();

    if !flagged.is_empty() {
        return flagged;
    }

    let enabled = settings.enabled_kinds();
    if enabled.is_empty() {
        MetricKind::ALL.to_vec()
    } else {
        enabled
    }
}

fn print_json(kinds: &[MetricKind], readings: &[Option<Reading>]) -> Result<()> {
    let mut map = serde_json::Map::new();
    for (kind, reading) in kinds.iter().zip(readings) {
        map.insert(kind.key().to_string(), serde_json::to_value(reading)?);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(map))?
    );
    Ok(())
}

fn print_report(settings: &Settings, kinds: &[MetricKind], readings: Vec<Option<Reading>>) {
    println!(
        "{} {}",
        "System status at".bold(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!();

    for (kind, reading) in kinds.iter().zip(readings) {
        let formatted = format_metric(*kind, reading, &settings.templates);
        println!(
            "  {} {}",
            format!("{:<15}", kind.label()).cyan(),
            formatted.text
        );
    }
}
