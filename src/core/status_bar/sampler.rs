use std::future::Future;
use std::time::Instant;

use parking_lot::Mutex;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

use super::metrics::{MemoryReading, MetricKind, NetworkRates, Reading};
use crate::platform;
use crate::platform::gpu::GpuProbe;

/// Source of raw metric readings.
///
/// One fetch per kind per tick. Adapters never raise: any failure is
/// converted to "no value" at this boundary, and the slot for that kind
/// simply keeps its previous content.
pub trait MetricSource: Send + Sync + 'static {
    fn fetch(&self, kind: MetricKind) -> impl Future<Output = Option<Reading>> + Send;
}

/// Production source backed by sysinfo plus the platform GPU probe.
pub struct SystemMetricSource {
    system: Mutex<System>,
    network: Mutex<NetworkState>,
    gpu: Option<Box<dyn GpuProbe>>,
}

/// Previous interface totals, kept across ticks for rate calculation.
struct NetworkState {
    networks: Networks,
    last_sample: Option<(Instant, u64, u64)>, // (when, rx total, tx total)
}

impl SystemMetricSource {
    /// Detect platform capabilities and build the source.
    ///
    /// The GPU probe acquired here lives as long as the source and is
    /// released when the source is dropped.
    pub async fn init() -> Self {
        let refresh = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::everything());

        Self {
            system: Mutex::new(System::new_with_specifics(refresh)),
            network: Mutex::new(NetworkState {
                networks: Networks::new_with_refreshed_list(),
                last_sample: None,
            }),
            gpu: platform::gpu::probe_for_platform().await,
        }
    }

    fn cpu_load(&self) -> Option<Reading> {
        let mut system = self.system.lock();
        system.refresh_cpu_usage();
        let usage = system.global_cpu_usage();
        if usage.is_nan() {
            return None;
        }
        Some(Reading::CpuLoad(usage as f64))
    }

    fn load_avg(&self) -> Option<Reading> {
        let avg = System::load_average();
        Some(Reading::LoadAvg([
            Some(avg.one),
            Some(avg.five),
            Some(avg.fifteen),
        ]))
    }

    fn memory(&self) -> Option<Reading> {
        let (used, total) = {
            let mut system = self.system.lock();
            system.refresh_memory();
            (system.used_memory(), system.total_memory())
        };
        if total == 0 {
            return None;
        }

        Some(Reading::Memory(MemoryReading {
            used_bytes: used,
            total_bytes: total,
            pressure: platform::memory::memory_pressure(),
        }))
    }

    fn network(&self) -> Option<Reading> {
        let mut state = self.network.lock();
        state.networks.refresh(true);

        let now = Instant::now();
        let (rx, tx) = state
            .networks
            .iter()
            .fold((0u64, 0u64), |(rx, tx), (_, data)| {
                (rx + data.total_received(), tx + data.total_transmitted())
            });

        // The first sample has no baseline; report zero rather than a
        // bogus since-boot rate.
        let (down, up) = match state.last_sample {
            Some((when, prev_rx, prev_tx)) => {
                let elapsed = now.duration_since(when).as_secs_f64().max(0.001);
                (
                    rx.saturating_sub(prev_rx) as f64 / elapsed,
                    tx.saturating_sub(prev_tx) as f64 / elapsed,
                )
            }
            None => (0.0, 0.0),
        };
        state.last_sample = Some((now, rx, tx));

        Some(Reading::Network(NetworkRates {
            up_bytes_per_sec: up,
            down_bytes_per_sec: down,
        }))
    }

    fn uptime(&self) -> Option<Reading> {
        Some(Reading::Uptime(System::uptime()))
    }

    async fn gpu(&self) -> Option<Reading> {
        let probe = self.gpu.as_ref()?;
        match probe.query().await {
            Ok(gpus) => Some(Reading::Gpu(gpus)),
            Err(err) => {
                log::debug!("{} query failed: {}", probe.name(), err);
                None
            }
        }
    }
}

impl MetricSource for SystemMetricSource {
    fn fetch(&self, kind: MetricKind) -> impl Future<Output = Option<Reading>> + Send {
        async move {
            match kind {
                MetricKind::CpuLoad => self.cpu_load(),
                MetricKind::LoadAvg => self.load_avg(),
                MetricKind::MemoryUsage => self.memory(),
                MetricKind::NetworkSpeed => self.network(),
                MetricKind::Uptime => self.uptime(),
                MetricKind::GpuLoad => self.gpu().await,
            }
        }
    }
}
