//! Live status bar command.

use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::Settings;
use crate::core::status_bar::StatusBarRuntime;
use crate::ui::TermBar;

/// How often the settings file is checked for changes.
const SETTINGS_POLL: Duration = Duration::from_secs(2);

/// Execute the run command: start the bar and block until Ctrl-C.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let interval_override = matches.get_one::<u64>("interval").copied();

    let mut settings = Settings::load()?;
    if let Some(interval) = interval_override {
        settings.refresh_interval_ms = interval;
    }

    let runtime = StatusBarRuntime::start(TermBar::new(), settings)
        .context("Failed to start status bar runtime")?;

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .context("Failed to install Ctrl-C handler")?;

    // Settings-file changes restart the driver: full teardown, then
    // re-evaluation from idle.
    let settings_path = Settings::config_path()?;
    let mut last_modified = modified_at(&settings_path);

    loop {
        match stop_rx.recv_timeout(SETTINGS_POLL) {
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }

        let modified = modified_at(&settings_path);
        if modified != last_modified {
            last_modified = modified;
            log::info!("settings changed, restarting status bar");

            if let Ok(mut settings) = Settings::load() {
                if let Some(interval) = interval_override {
                    settings.refresh_interval_ms = interval;
                }
                runtime.on_settings_update(settings);
            }
        }
    }

    runtime.shutdown();
    Ok(())
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|meta| meta.modified()).ok()
}
