//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manifold - Desired container images of applications across environments
#[derive(Parser, Debug)]
#[command(name = "manifold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the workloads of an overlay directory on disk
    ///
    /// Examples:
    ///   manifold inspect deploy/overlays/dev
    ///   manifold inspect deploy/overlays/dev --json
    Inspect {
        /// Directory holding a kustomization
        dir: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the pipeline stages under a directory on disk
    ///
    /// Each subdirectory is a stage; stages are ordered by directory name
    /// and a numeric prefix such as `01_` is dropped from the stage name.
    ///
    /// Examples:
    ///   manifold stages deploy/overlays
    Stages {
        /// Directory holding one subdirectory per stage
        dir: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List declared applications and their environments
    Apps {
        /// Application declarations (YAML, JSON or TOML)
        #[arg(short, long, env = "MANIFOLD_CONFIG")]
        config: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Resolve the desired images of declared applications
    ///
    /// Each application's repository is fetched once; its environments
    /// are resolved in parallel against that snapshot.
    Desired {
        /// Application declarations (YAML, JSON or TOML)
        #[arg(short, long, env = "MANIFOLD_CONFIG")]
        config: PathBuf,

        /// Only resolve this application
        #[arg(short, long)]
        app: Option<String>,

        /// Environments resolved at once per application
        #[arg(short, long)]
        workers: Option<usize>,

        /// Abort fetching a repository after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Shallow clone depth
        #[arg(long)]
        depth: Option<u32>,

        /// Branch to read instead of the default branch
        #[arg(short, long)]
        branch: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
