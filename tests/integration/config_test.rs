use std::fs;

use tempfile::TempDir;

use sysbar::core::config::{Settings, DEFAULT_REFRESH_INTERVAL_MS};
use sysbar::core::status_bar::{BarSide, MetricKind};

#[test]
fn defaults_enable_every_kind_in_canonical_order() {
    let settings = Settings::default();

    assert!(settings.enabled);
    assert_eq!(settings.metrics, MetricKind::ALL.to_vec());
    assert_eq!(settings.location, BarSide::Right);
    assert_eq!(settings.refresh_interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_from(&dir.path().join("does-not-exist.json"));
    assert_eq!(settings.metrics, MetricKind::ALL.to_vec());
}

#[test]
fn empty_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "").unwrap();

    let settings = Settings::load_from(&path);
    assert!(settings.enabled);
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json ]").unwrap();

    let settings = Settings::load_from(&path);
    assert_eq!(settings.metrics, MetricKind::ALL.to_vec());
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "metrics": ["uptime", "cpu_load"] }"#).unwrap();

    let settings = Settings::load_from(&path);
    assert_eq!(
        settings.metrics,
        vec![MetricKind::Uptime, MetricKind::CpuLoad]
    );
    assert!(settings.enabled);
    assert_eq!(settings.refresh_interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.metrics = vec![MetricKind::MemoryUsage, MetricKind::GpuLoad];
    settings.location = BarSide::Left;
    settings.refresh_interval_ms = 5_000;
    settings.templates.cpu_load = "cpu={percent}".to_string();

    settings.save_to(&path).unwrap();
    let loaded = Settings::load_from(&path);

    assert_eq!(loaded.metrics, settings.metrics);
    assert_eq!(loaded.location, BarSide::Left);
    assert_eq!(loaded.refresh_interval_ms, 5_000);
    assert_eq!(loaded.templates.cpu_load, "cpu={percent}");
}

#[test]
fn enabled_kinds_is_empty_when_globally_disabled() {
    let settings = Settings {
        enabled: false,
        ..Settings::default()
    };
    assert!(settings.enabled_kinds().is_empty());
}

#[test]
fn enabled_kinds_deduplicates_preserving_first_occurrence() {
    let settings = Settings {
        metrics: vec![
            MetricKind::Uptime,
            MetricKind::CpuLoad,
            MetricKind::Uptime,
        ],
        ..Settings::default()
    };
    assert_eq!(
        settings.enabled_kinds(),
        vec![MetricKind::Uptime, MetricKind::CpuLoad]
    );
}

#[test]
fn interval_is_clamped_to_a_sane_minimum() {
    let settings = Settings {
        refresh_interval_ms: 1,
        ..Settings::default()
    };
    assert_eq!(settings.interval().as_millis(), 100);
}
