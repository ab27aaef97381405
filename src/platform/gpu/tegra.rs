use std::path::PathBuf;
use std::process::Stdio;

use futures_util::future::BoxFuture;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use super::GpuProbe;
use crate::core::status_bar::GpuReading;
use crate::error::{Result, SysbarError};

/// `RAM used/total MB ... GR3D_FREQ percent%` fields of a tegrastats line.
static TEGRA_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"RAM (\d+)/(\d+)MB.*?GR3D_FREQ (\d+)%").expect("valid tegra pattern"));

/// GPU probe for Jetson-class boards, reading one line of `tegrastats`.
pub struct TegrastatsProbe {
    binary: PathBuf,
}

impl TegrastatsProbe {
    /// Locate `tegrastats` on PATH.
    pub fn detect() -> Result<Self> {
        let binary = which::which("tegrastats")
            .map_err(|err| SysbarError::gpu(format!("tegrastats not found: {}", err)))?;
        Ok(Self { binary })
    }
}

impl GpuProbe for TegrastatsProbe {
    fn name(&self) -> &'static str {
        "tegrastats"
    }

    fn query(&self) -> BoxFuture<'_, Result<Vec<GpuReading>>> {
        Box::pin(async move {
            // tegrastats streams forever; one line is enough, then the
            // child is killed.
            let mut child = Command::new(&self.binary)
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()?;

            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| SysbarError::gpu("tegrastats produced no stdout"))?;

            let mut lines = BufReader::new(stdout).lines();
            let line = lines
                .next_line()
                .await?
                .ok_or_else(|| SysbarError::gpu("tegrastats closed without output"))?;

            let _ = child.start_kill();

            Ok(parse_tegrastats_line(&line).into_iter().collect())
        })
    }
}

/// Parse one tegrastats line. A line that does not match the grammar
/// yields no reading.
pub fn parse_tegrastats_line(line: &str) -> Option<GpuReading> {
    let caps = TEGRA_LINE.captures(line)?;

    Some(GpuReading {
        utilization: caps[3].parse().ok()?,
        memory_used_mb: caps[1].parse().ok()?,
        memory_total_mb: caps[2].parse().ok()?,
    })
}
