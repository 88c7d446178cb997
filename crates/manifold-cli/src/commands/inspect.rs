//! The inspect command: workloads of one overlay on disk

use std::path::Path;

use colored::Colorize;
use manifold_core::{AppServices, Extractor, KustomizeResolver, OverlayResolver};
use manifold_fs::{DiskFs, NormalizedPath};

use super::print_json;
use crate::error::Result;

/// Resolve the kustomization in `dir` and list its labelled workloads.
pub fn run_inspect(dir: &Path, json: bool) -> Result<()> {
    let fs = DiskFs::current_dir()?;
    let resources = KustomizeResolver::new().resolve(&fs, &NormalizedPath::new(dir))?;
    let catalog = Extractor::new().catalog(&resources);

    if json {
        return print_json(&catalog);
    }
    print_table(&catalog);
    Ok(())
}

fn print_table(catalog: &[AppServices]) {
    if catalog.is_empty() {
        println!("{}", "No labelled workloads found.".dimmed());
        return;
    }
    for app in catalog {
        println!("{}", app.name.cyan().bold());
        println!(
            "  {:<24} {:<16} {:>8}  {}",
            "NAME".bold(),
            "NAMESPACE".bold(),
            "REPLICAS".bold(),
            "IMAGES".bold()
        );
        for service in &app.services {
            println!(
                "  {:<24} {:<16} {:>8}  {}",
                service.name.green(),
                if service.namespace.is_empty() { "-" } else { service.namespace.as_str() },
                service.replicas,
                service.images.join(", ")
            );
        }
        println!();
    }
}
