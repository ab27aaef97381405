use std::path::PathBuf;

use futures_util::future::BoxFuture;
use tokio::process::Command;

use super::GpuProbe;
use crate::core::status_bar::GpuReading;
use crate::error::{Result, SysbarError};

const QUERY_ARG: &str = "--query-gpu=utilization.gpu,memory.used,memory.total";
const FORMAT_ARG: &str = "--format=csv,noheader,nounits";

/// GPU probe shelling out to `nvidia-smi`.
pub struct NvidiaSmiProbe {
    binary: PathBuf,
}

impl NvidiaSmiProbe {
    /// Locate `nvidia-smi` on PATH.
    pub fn detect() -> Result<Self> {
        let binary = which::which("nvidia-smi")
            .map_err(|err| SysbarError::gpu(format!("nvidia-smi not found: {}", err)))?;
        Ok(Self { binary })
    }
}

impl GpuProbe for NvidiaSmiProbe {
    fn name(&self) -> &'static str {
        "nvidia-smi"
    }

    fn query(&self) -> BoxFuture<'_, Result<Vec<GpuReading>>> {
        Box::pin(async move {
            let output = Command::new(&self.binary)
                .args([QUERY_ARG, FORMAT_ARG])
                .output()
                .await?;

            if !output.status.success() {
                return Err(SysbarError::gpu(format!(
                    "nvidia-smi exited with {}",
                    output.status
                )));
            }

            Ok(parse_smi_output(&String::from_utf8_lossy(&output.stdout)))
        })
    }
}

/// Parse `utilization.gpu, memory.used, memory.total` CSV output, one GPU
/// per line. A line that does not match the grammar is skipped rather
/// than failing the batch.
pub fn parse_smi_output(output: &str) -> Vec<GpuReading> {
    output.lines().filter_map(parse_smi_line).collect()
}

fn parse_smi_line(line: &str) -> Option<GpuReading> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return None;
    }

    Some(GpuReading {
        utilization: fields[0].parse().ok()?,
        memory_used_mb: fields[1].parse().ok()?,
        memory_total_mb: fields[2].parse().ok()?,
    })
}
