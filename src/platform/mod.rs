//! Platform-specific code.
//!
//! Everything that depends on the host architecture or operating system
//! lives here, behind narrow functions the core can call blindly.

pub mod gpu;
pub mod memory;

use tokio::process::Command;

/// Machine architecture string from `uname -m`, lowercased.
///
/// Returns `None` wherever the command is unavailable or fails; callers
/// treat that as "no platform-specific capability".
pub async fn machine_arch() -> Option<String> {
    let output = Command::new("uname").arg("-m").output().await.ok()?;
    if !output.status.success() {
        return None;
    }

    let arch = String::from_utf8_lossy(&output.stdout)
        .trim()
        .to_lowercase();
    if arch.is_empty() {
        None
    } else {
        Some(arch)
    }
}
