//! The apps command: declared applications

use std::path::Path;

use colored::Colorize;
use manifold_core::{AppSummary, Config};
use manifold_fs::NormalizedPath;

use super::print_json;
use crate::error::Result;

pub fn run_apps(config: &Path, json: bool) -> Result<()> {
    let config = Config::load(&NormalizedPath::new(config))?;
    let summaries = AppSummary::list(&config);

    if json {
        return print_json(&summaries);
    }
    if summaries.is_empty() {
        println!("{}", "No applications declared.".dimmed());
        return Ok(());
    }
    for app in &summaries {
        println!("{} {}", app.name.cyan().bold(), format!("({})", app.repo_url).dimmed());
        for env in &app.environments {
            println!("  {:<16} {}", env.name.green(), env.path);
        }
    }
    Ok(())
}
