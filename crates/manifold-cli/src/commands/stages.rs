//! The stages command: pipeline stages of an overlay directory on disk

use std::path::Path;

use colored::Colorize;
use manifold_core::list_stages;
use manifold_fs::{DiskFs, NormalizedPath};

use super::print_json;
use crate::error::Result;

pub fn run_stages(dir: &Path, json: bool) -> Result<()> {
    let fs = DiskFs::current_dir()?;
    let stages = list_stages(&fs, &NormalizedPath::new(dir))?;

    if json {
        return print_json(&stages);
    }
    if stages.is_empty() {
        println!("{}", "No stages found.".dimmed());
        return Ok(());
    }
    for (i, stage) in stages.iter().enumerate() {
        println!("{:>3}. {:<16} {}", i + 1, stage.name.green(), stage.path.dimmed());
    }
    Ok(())
}
