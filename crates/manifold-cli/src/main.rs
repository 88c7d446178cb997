//! Manifold CLI
//!
//! Resolves the desired container images of applications from the
//! overlays committed to their repositories.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::DesiredArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Inspect { dir, json } => commands::run_inspect(&dir, json),
        Commands::Stages { dir, json } => commands::run_stages(&dir, json),
        Commands::Apps { config, json } => commands::run_apps(&config, json),
        Commands::Desired {
            config,
            app,
            workers,
            timeout,
            depth,
            branch,
            json,
        } => commands::run_desired(&DesiredArgs {
            config,
            app,
            workers,
            timeout,
            depth,
            branch,
            json,
        }),
    }
}
