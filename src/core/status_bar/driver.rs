//! Display driver: owns the slots and runs the fetch-format-update cycle.

use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, Interval, MissedTickBehavior};

use super::host::{StatusHost, StatusItem};
use super::sampler::{MetricSource, SystemMetricSource};
use crate::core::config::Settings;
use crate::core::status_bar::MetricKind;
use crate::error::Result;
use crate::ui::metric_formatters::format_metric;

/// Control messages from the embedding thread to the driver loop.
enum Control {
    Reload(Settings),
    Stop { deactivate: bool },
}

/// The status bar driver.
///
/// Idle until `init` arms it; Running while it owns slots. Slot count and
/// order always mirror the enabled-kind list: slot *i* shows kind *i*.
pub struct StatusBarDriver<S, H: StatusHost> {
    source: Option<S>,
    host: H,
    settings: Settings,
    enabled: Vec<MetricKind>,
    slots: Vec<H::Item>,
}

impl<S: MetricSource, H: StatusHost> StatusBarDriver<S, H> {
    pub fn new(source: S, host: H, settings: Settings) -> Self {
        Self {
            source: Some(source),
            host,
            settings,
            enabled: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Arm the driver: one slot per enabled kind, in configured order.
    ///
    /// Stays idle when the bar is globally disabled, no kinds are
    /// selected, or a deactivating shutdown already released the source.
    pub fn init(&mut self) {
        if !self.slots.is_empty() {
            self.teardown();
        }

        let kinds = self.settings.enabled_kinds();
        if self.source.is_none() || kinds.is_empty() {
            log::info!("status bar idle (disabled or no metrics selected)");
            return;
        }

        for (position, _) in kinds.iter().enumerate() {
            let priority = self.settings.priority - position as i32;
            let item = self.host.create_item(self.settings.location, priority);
            self.slots.push(item);
        }
        self.enabled = kinds;

        log::info!("status bar running with {} metrics", self.enabled.len());
    }

    pub fn is_running(&self) -> bool {
        !self.slots.is_empty()
    }

    pub fn interval(&self) -> Duration {
        self.settings.interval()
    }

    /// One fetch-format-update cycle.
    ///
    /// All fetches run concurrently; results come back in kind order and
    /// are applied only after every fetch has settled. A "no data" result
    /// leaves its slot untouched so transient failures never flicker the
    /// bar, and never prevents the other slots from updating.
    pub async fn tick(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        let Some(source) = self.source.as_ref() else {
            return;
        };

        let readings = join_all(self.enabled.iter().map(|kind| source.fetch(*kind))).await;

        for (position, (kind, reading)) in self.enabled.iter().zip(readings).enumerate() {
            let formatted = format_metric(*kind, reading, &self.settings.templates);
            if formatted.is_no_data() {
                continue;
            }

            let slot = &mut self.slots[position];
            slot.set_text(&formatted.text);
            slot.set_tooltip(&formatted.tooltip);
            slot.show();
        }

        self.host.refresh();
    }

    /// Tear down slots and re-evaluate from idle with new settings.
    pub fn on_settings_update(&mut self, settings: Settings) {
        self.teardown();
        self.settings = settings;
        self.init();
    }

    /// Stop updating. A deactivating shutdown also drops the source,
    /// releasing any platform acquisition made at init.
    pub fn shutdown(&mut self, deactivate: bool) {
        self.teardown();
        if deactivate {
            self.source = None;
        }
    }

    fn teardown(&mut self) {
        for slot in &mut self.slots {
            slot.dispose();
        }
        self.slots.clear();
        self.enabled.clear();
        self.host.refresh();
    }
}

/// Wrapper around the driver loop and its dedicated runtime.
///
/// This is the embedding-facing handle: construct once, feed it settings
/// updates, shut it down on exit.
pub struct StatusBarRuntime {
    control_tx: mpsc::Sender<Control>,
    shutdown_tx: broadcast::Sender<()>,
    _runtime: tokio::runtime::Runtime,
}

impl StatusBarRuntime {
    /// Build the runtime, detect platform capabilities, and start the
    /// driver loop. The first tick fires immediately.
    pub fn start<H: StatusHost>(host: H, settings: Settings) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .enable_io()
            .thread_name("sysbar-worker")
            .build()?;

        let (control_tx, control_rx) = mpsc::channel::<Control>(8);
        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);

        runtime.spawn(async move {
            let source = SystemMetricSource::init().await;
            let mut driver = StatusBarDriver::new(source, host, settings);
            driver.init();
            drive(driver, control_rx, shutdown_rx).await;
        });

        Ok(Self {
            control_tx,
            shutdown_tx,
            _runtime: runtime,
        })
    }

    /// Restart the driver with new settings (full teardown and re-init).
    pub fn on_settings_update(&self, settings: Settings) {
        let _ = self.control_tx.blocking_send(Control::Reload(settings));
    }

    /// Stop the timer without releasing platform acquisitions; a later
    /// settings update starts it again.
    pub fn cancel_update(&self) {
        let _ = self
            .control_tx
            .blocking_send(Control::Stop { deactivate: false });
    }

    /// Shut down the driver loop and the runtime.
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        // The runtime finishes the in-flight tick when dropped
    }
}

async fn drive<S: MetricSource, H: StatusHost>(
    mut driver: StatusBarDriver<S, H>,
    mut control_rx: mpsc::Receiver<Control>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = make_ticker(driver.interval());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if driver.is_running() {
                    driver.tick().await;
                }
            }
            control = control_rx.recv() => match control {
                Some(Control::Reload(settings)) => {
                    driver.on_settings_update(settings);
                    ticker = make_ticker(driver.interval());
                }
                Some(Control::Stop { deactivate }) => {
                    driver.shutdown(deactivate);
                }
                // Embedder dropped its handle; nothing can restart us
                None => {
                    driver.shutdown(true);
                    break;
                }
            },
            _ = shutdown.recv() => {
                driver.shutdown(true);
                break;
            }
        }
    }
}

fn make_ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    // A tick slower than the interval delays later updates instead of
    // bursting to catch up.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}
