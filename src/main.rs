use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use sysbar::commands;

fn main() -> Result<()> {
    sysbar::init_logging();

    let mut cli = build_cli();
    let matches = cli.clone().get_matches();

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run::execute(sub_matches),
        Some(("status", sub_matches)) => commands::status::execute(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        Some(("completions", sub_matches)) => commands::completions::execute(sub_matches, &mut cli),
        _ => {
            cli.print_help()?;
            println!();
            Ok(())
        }
    }
}

fn build_cli() -> Command {
    Command::new("sysbar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal status bar for live system metrics")
        .subcommand(
            Command::new("run").about("Run the live status bar").arg(
                Arg::new("interval")
                    .short('i')
                    .long("interval")
                    .value_name("MS")
                    .help("Refresh interval in milliseconds (overrides settings)")
                    .value_parser(clap::value_parser!(u64)),
            ),
        )
        .subcommand(
            Command::new("status")
                .about("Collect metrics once and print a report")
                .arg(filter_flag("cpu", "Show CPU load"))
                .arg(filter_flag("load", "Show load average"))
                .arg(filter_flag("memory", "Show memory usage"))
                .arg(filter_flag("network", "Show network speed"))
                .arg(filter_flag("uptime", "Show uptime"))
                .arg(filter_flag("gpu", "Show GPU load"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print raw readings as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the settings file")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("path").about("Print the settings file path"))
                .subcommand(
                    Command::new("init")
                        .about("Write a default settings file")
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .help("Overwrite an existing file")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(Command::new("show").about("Print the effective settings")),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for (bash, zsh, fish, powershell, elvish)")
                        .required(true)
                        .index(1),
                ),
        )
}

fn filter_flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .action(ArgAction::SetTrue)
}
