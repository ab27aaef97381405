//! Settings file management.

use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;

use crate::core::config::Settings;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("path", _)) => {
            println!("{}", Settings::config_path()?.display());
            Ok(())
        }
        Some(("init", sub_matches)) => init(sub_matches.get_flag("force")),
        Some(("show", _)) => {
            let settings = Settings::load()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        _ => {
            println!("Use 'sysbar config --help' for more information.");
            Ok(())
        }
    }
}

fn init(force: bool) -> Result<()> {
    let path = Settings::config_path()?;

    if path.exists() && !force {
        println!(
            "{}",
            format!("Settings file already exists at {}", path.display()).yellow()
        );
        println!("{}", "Pass --force to overwrite it with defaults.".dimmed());
        return Ok(());
    }

    Settings::default().save()?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
