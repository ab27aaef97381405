//! GPU-specific platform code.
//!
//! GPU load is read by shelling out to vendor tools and parsing their
//! text output. Probes sit behind the `GpuProbe` capability trait so the
//! rest of the system can be tested without spawning real processes.

mod nvidia;
mod tegra;

pub use nvidia::{parse_smi_output, NvidiaSmiProbe};
pub use tegra::{parse_tegrastats_line, TegrastatsProbe};

use futures_util::future::BoxFuture;

use crate::core::status_bar::GpuReading;
use crate::error::Result;
use crate::platform::machine_arch;

/// Capability interface over whatever tool reports GPU statistics.
pub trait GpuProbe: Send + Sync {
    /// Tool name, for logging.
    fn name(&self) -> &'static str;

    /// Query current readings for every visible GPU.
    fn query(&self) -> BoxFuture<'_, Result<Vec<GpuReading>>>;
}

/// Pick the probe matching the current machine.
///
/// `x86_64`/`i686` machines get the NVIDIA vendor query; machines whose
/// architecture string mentions `tegra` get the embedded Tegra statistics
/// tool; everything else has no GPU probe.
pub async fn probe_for_platform() -> Option<Box<dyn GpuProbe>> {
    let arch = machine_arch().await?;

    if arch == "x86_64" || arch == "i686" {
        match NvidiaSmiProbe::detect() {
            Ok(probe) => {
                log::info!("GPU probe: {}", probe.name());
                Some(Box::new(probe))
            }
            Err(err) => {
                log::debug!("no NVIDIA probe: {}", err);
                None
            }
        }
    } else if arch.contains("tegra") {
        match TegrastatsProbe::detect() {
            Ok(probe) => {
                log::info!("GPU probe: {}", probe.name());
                Some(Box::new(probe))
            }
            Err(err) => {
                log::debug!("no Tegra probe: {}", err);
                None
            }
        }
    } else {
        log::debug!("no GPU probe for architecture {}", arch);
        None
    }
}
