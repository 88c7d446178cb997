//! Promotion pipelines laid out as overlay directories
//!
//! Every subdirectory of a pipeline directory is one stage. Stages run in
//! directory-name order, so a numeric prefix such as `01_` can fix the order
//! without showing up in the stage name.

use manifold_fs::{FileSystem, NormalizedPath};
use serde::Serialize;

use crate::Result;

/// One stage of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    /// Directory name without its numeric prefix
    pub name: String,

    /// The stage's directory
    pub path: String,
}

/// List the stages under `dir`, in pipeline order.
///
/// Files are ignored and a missing directory has no stages. A filesystem
/// that cannot list directories reports its error.
pub fn list_stages(fs: &dyn FileSystem, dir: &NormalizedPath) -> Result<Vec<Stage>> {
    let mut entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.is_not_found() => {
            tracing::debug!(dir = %dir, "No pipeline directory");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    entries.sort();

    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            let path = dir.join(&entry);
            fs.is_dir(&path).then(|| Stage {
                name: trim_numeric_prefix(&entry).to_string(),
                path: path.to_string(),
            })
        })
        .collect())
}

/// Strip a leading run of digits followed by `_`.
fn trim_numeric_prefix(name: &str) -> &str {
    let rest = name.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == name.len() {
        return name;
    }
    rest.strip_prefix('_').unwrap_or(name)
}
