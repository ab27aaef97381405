use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use sysbar::core::config::Settings;
use sysbar::core::status_bar::{
    BarSide, GpuReading, MemoryReading, MetricKind, MetricSource, Reading, StatusBarDriver,
    StatusHost, StatusItem,
};

/// Source whose readings the test scripts between ticks.
#[derive(Clone, Default)]
struct MockSource {
    readings: Arc<Mutex<HashMap<MetricKind, Reading>>>,
}

impl MockSource {
    fn set(&self, kind: MetricKind, reading: Reading) {
        self.readings.lock().insert(kind, reading);
    }

    fn fail(&self, kind: MetricKind) {
        self.readings.lock().remove(&kind);
    }
}

impl MetricSource for MockSource {
    fn fetch(&self, kind: MetricKind) -> impl Future<Output = Option<Reading>> + Send {
        let reading = self.readings.lock().get(&kind).cloned();
        async move { reading }
    }
}

#[derive(Debug, Default, Clone)]
struct SlotRecord {
    text: String,
    tooltip: String,
    visible: bool,
    disposed: bool,
    side: BarSide,
    priority: i32,
}

/// Host that records every slot it hands out.
#[derive(Clone, Default)]
struct MockHost {
    slots: Arc<Mutex<Vec<Arc<Mutex<SlotRecord>>>>>,
}

impl MockHost {
    fn live_slots(&self) -> Vec<SlotRecord> {
        self.slots
            .lock()
            .iter()
            .map(|slot| slot.lock().clone())
            .filter(|slot| !slot.disposed)
            .collect()
    }

    fn all_slots(&self) -> Vec<SlotRecord> {
        self.slots.lock().iter().map(|slot| slot.lock().clone()).collect()
    }
}

struct MockItem {
    record: Arc<Mutex<SlotRecord>>,
}

impl StatusItem for MockItem {
    fn set_text(&mut self, text: &str) {
        self.record.lock().text = text.to_string();
    }

    fn set_tooltip(&mut self, tooltip: &str) {
        self.record.lock().tooltip = tooltip.to_string();
    }

    fn show(&mut self) {
        self.record.lock().visible = true;
    }

    fn dispose(&mut self) {
        let mut record = self.record.lock();
        record.disposed = true;
        record.visible = false;
    }
}

impl StatusHost for MockHost {
    type Item = MockItem;

    fn create_item(&mut self, side: BarSide, priority: i32) -> MockItem {
        let record = Arc::new(Mutex::new(SlotRecord {
            side,
            priority,
            ..Default::default()
        }));
        self.slots.lock().push(Arc::clone(&record));
        MockItem { record }
    }
}

fn settings_for(kinds: &[MetricKind]) -> Settings {
    Settings {
        metrics: kinds.to_vec(),
        ..Settings::default()
    }
}

fn driver_for(
    kinds: &[MetricKind],
) -> (StatusBarDriver<MockSource, MockHost>, MockSource, MockHost) {
    let source = MockSource::default();
    let host = MockHost::default();
    let mut driver = StatusBarDriver::new(source.clone(), host.clone(), settings_for(kinds));
    driver.init();
    (driver, source, host)
}

#[test]
fn slots_match_enabled_kinds() {
    let (_driver, _source, host) = driver_for(&[
        MetricKind::CpuLoad,
        MetricKind::MemoryUsage,
        MetricKind::Uptime,
    ]);

    let slots = host.live_slots();
    assert_eq!(slots.len(), 3);
    // Descending priority preserves the configured order on hosts that
    // sort by priority
    assert_eq!(
        slots.iter().map(|s| s.priority).collect::<Vec<_>>(),
        vec![100, 99, 98]
    );
    assert!(slots.iter().all(|s| s.side == BarSide::Right));
    assert!(slots.iter().all(|s| !s.visible));
}

#[test]
fn global_disable_creates_no_slots() {
    let source = MockSource::default();
    let host = MockHost::default();
    let settings = Settings {
        enabled: false,
        ..Settings::default()
    };

    let mut driver = StatusBarDriver::new(source, host.clone(), settings);
    driver.init();

    assert!(!driver.is_running());
    assert!(host.all_slots().is_empty());
}

#[test]
fn empty_metric_list_creates_no_slots() {
    let (driver, _source, host) = driver_for(&[]);
    assert!(!driver.is_running());
    assert!(host.all_slots().is_empty());
}

#[test]
fn duplicate_kinds_collapse_to_one_slot() {
    let (_driver, _source, host) = driver_for(&[
        MetricKind::CpuLoad,
        MetricKind::CpuLoad,
        MetricKind::Uptime,
    ]);
    assert_eq!(host.live_slots().len(), 2);
}

#[tokio::test]
async fn tick_updates_slots_positionally() {
    let (mut driver, source, host) = driver_for(&[
        MetricKind::CpuLoad,
        MetricKind::Uptime,
        MetricKind::MemoryUsage,
    ]);

    source.set(MetricKind::CpuLoad, Reading::CpuLoad(42.4));
    source.set(MetricKind::Uptime, Reading::Uptime(90_065));
    source.set(
        MetricKind::MemoryUsage,
        Reading::Memory(MemoryReading {
            used_bytes: 8 * 1024 * 1024 * 1024,
            total_bytes: 16 * 1024 * 1024 * 1024,
            pressure: None,
        }),
    );

    driver.tick().await;

    let slots = host.live_slots();
    assert_eq!(slots[0].text, "CPU 42%");
    assert_eq!(slots[0].tooltip, "CPU Load");
    assert_eq!(slots[1].text, "Up 1d 1h 1m");
    assert_eq!(slots[1].tooltip, "Uptime");
    assert_eq!(slots[2].text, "Mem 8.00/16.00GB 50%");
    assert!(slots.iter().all(|s| s.visible));
}

#[tokio::test]
async fn failed_adapter_leaves_its_slot_untouched() {
    let (mut driver, source, host) =
        driver_for(&[MetricKind::CpuLoad, MetricKind::Uptime]);

    source.set(MetricKind::CpuLoad, Reading::CpuLoad(10.0));
    source.set(MetricKind::Uptime, Reading::Uptime(60));
    driver.tick().await;

    // Second tick: CPU adapter fails, uptime moves on
    source.fail(MetricKind::CpuLoad);
    source.set(MetricKind::Uptime, Reading::Uptime(120));
    driver.tick().await;

    let slots = host.live_slots();
    assert_eq!(slots[0].text, "CPU 10%");
    assert!(slots[0].visible, "stale slot stays visible");
    assert_eq!(slots[1].text, "Up 0d 0h 2m");
}

#[tokio::test]
async fn slot_without_data_is_never_shown() {
    let (mut driver, _source, host) = driver_for(&[MetricKind::GpuLoad]);

    driver.tick().await;

    let slots = host.live_slots();
    assert!(!slots[0].visible);
    assert!(slots[0].text.is_empty());
}

#[tokio::test]
async fn empty_gpu_list_counts_as_no_data() {
    let (mut driver, source, host) = driver_for(&[MetricKind::GpuLoad]);

    source.set(MetricKind::GpuLoad, Reading::Gpu(Vec::new()));
    driver.tick().await;
    assert!(!host.live_slots()[0].visible);

    source.set(
        MetricKind::GpuLoad,
        Reading::Gpu(vec![GpuReading {
            utilization: 61.7,
            memory_used_mb: 1536.0,
            memory_total_mb: 4096.0,
        }]),
    );
    driver.tick().await;

    let slots = host.live_slots();
    assert!(slots[0].visible);
    assert_eq!(slots[0].text, "GPU 62%");
}

#[tokio::test]
async fn settings_update_rebuilds_slots() {
    let (mut driver, source, host) = driver_for(&[
        MetricKind::CpuLoad,
        MetricKind::Uptime,
        MetricKind::MemoryUsage,
    ]);

    source.set(MetricKind::Uptime, Reading::Uptime(60));
    driver.tick().await;

    driver.on_settings_update(settings_for(&[MetricKind::Uptime]));

    let live = host.live_slots();
    assert_eq!(live.len(), 1);
    assert!(!live[0].visible, "new slots start hidden");
    assert_eq!(host.all_slots().len(), 4, "old slots were disposed, not reused");

    driver.tick().await;
    assert_eq!(host.live_slots()[0].text, "Up 0d 0h 1m");
}

#[tokio::test]
async fn deactivating_shutdown_releases_everything() {
    let (mut driver, source, host) = driver_for(&[MetricKind::CpuLoad]);
    source.set(MetricKind::CpuLoad, Reading::CpuLoad(5.0));
    driver.tick().await;

    driver.shutdown(true);
    assert!(host.live_slots().is_empty());
    assert!(!driver.is_running());

    // Re-init after deactivation stays idle: the source is gone
    driver.init();
    assert!(!driver.is_running());

    // And a stray tick is a no-op rather than a panic
    driver.tick().await;
}
