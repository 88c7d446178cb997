//! Command implementations for manifold-cli

pub mod apps;
pub mod desired;
pub mod inspect;
pub mod stages;

pub use apps::run_apps;
pub use desired::{DesiredArgs, run_desired};
pub use inspect::run_inspect;
pub use stages::run_stages;

use serde::Serialize;

use crate::error::Result;

/// Print `value` as pretty JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
