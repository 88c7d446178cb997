//! The desired command: aggregate declared applications

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use manifold_core::{Aggregator, Application, Config, DesiredState, KustomizeResolver};
use manifold_fs::NormalizedPath;
use manifold_git::CloneOptions;

use super::print_json;
use crate::error::Result;

/// Options of the desired command.
#[derive(Debug, Clone, Default)]
pub struct DesiredArgs {
    pub config: PathBuf,
    pub app: Option<String>,
    pub workers: Option<usize>,
    pub timeout: Option<u64>,
    pub depth: Option<u32>,
    pub branch: Option<String>,
    pub json: bool,
}

pub fn run_desired(args: &DesiredArgs) -> Result<()> {
    let config = Config::load(&NormalizedPath::new(&args.config))?;
    let apps: Vec<&Application> = match &args.app {
        Some(name) => vec![config.require_app(name)?],
        None => config.apps.iter().collect(),
    };

    let mut aggregator =
        Aggregator::new(KustomizeResolver::new()).with_clone_options(clone_options(args));
    if let Some(workers) = args.workers {
        aggregator = aggregator.with_workers(workers);
    }

    let mut states = Vec::with_capacity(apps.len());
    for app in apps {
        let inventory = aggregator.aggregate(app)?;
        states.push(DesiredState::build(app, &inventory));
    }

    if args.json {
        return print_json(&states);
    }
    for state in &states {
        print_state(state);
    }
    Ok(())
}

fn clone_options(args: &DesiredArgs) -> CloneOptions {
    let mut options = CloneOptions::default();
    if let Some(branch) = &args.branch {
        options = options.with_branch(branch.clone());
    }
    if let Some(depth) = args.depth {
        options = options.with_depth(depth);
    }
    if let Some(secs) = args.timeout {
        options = options.with_timeout(Duration::from_secs(secs));
    }
    options
}

fn print_state(state: &DesiredState) {
    println!("{} {}", state.name.cyan().bold(), format!("({})", state.repo_url).dimmed());
    for env in &state.environments {
        println!("  {}", env.name.green().bold());
        if env.services.is_empty() {
            println!("    {}", "no services".dimmed());
        }
        for service in &env.services {
            println!("    {:<24} {}", service.name, service.images.join(", "));
        }
    }
}
