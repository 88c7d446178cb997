//! Per-application aggregation
//!
//! One snapshot is acquired per application. Its environments are resolved
//! concurrently on a bounded worker pool over that shared read-only
//! snapshot, then merged into an [`Inventory`] in declared order.

use manifold_fs::FileSystem;
use manifold_git::{CloneOptions, Snapshot, SnapshotFs};
use rayon::prelude::*;

use crate::extract::{Extractor, Service};
use crate::inventory::Inventory;
use crate::model::{Application, EnvironmentRef};
use crate::resolver::OverlayResolver;
use crate::{Error, Result};

/// Upper bound on the default number of resolution workers.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Builds inventories for applications with a given resolver.
#[derive(Debug, Clone)]
pub struct Aggregator<R> {
    resolver: R,
    extractor: Extractor,
    workers: usize,
    clone_options: CloneOptions,
}

impl<R: OverlayResolver> Aggregator<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            extractor: Extractor::default(),
            workers: default_workers(),
            clone_options: CloneOptions::default(),
        }
    }

    /// Resolve at most `workers` environments at once (at least one).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Branch, depth, timeout and cancellation used for every acquisition.
    /// The URL is taken from each application.
    pub fn with_clone_options(mut self, options: CloneOptions) -> Self {
        self.clone_options = options;
        self
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Acquire `app`'s repository and aggregate every environment.
    pub fn aggregate(&self, app: &Application) -> Result<Inventory> {
        let options = CloneOptions {
            url: app.repo_url.clone(),
            ..self.clone_options.clone()
        };
        let snapshot = manifold_git::acquire(&options).map_err(|source| Error::Acquisition {
            app: app.name.clone(),
            source,
        })?;
        self.aggregate_snapshot(app, &snapshot)
    }

    /// Aggregate `app` against an already acquired snapshot.
    pub fn aggregate_snapshot(&self, app: &Application, snapshot: &Snapshot) -> Result<Inventory> {
        self.aggregate_fs(app, &SnapshotFs::new(snapshot))
    }

    /// Aggregate `app` against any read-only filesystem.
    ///
    /// If any environment fails, the failure of the earliest such
    /// environment in declared order is returned and no inventory is
    /// produced.
    pub fn aggregate_fs(&self, app: &Application, fs: &dyn FileSystem) -> Result<Inventory> {
        let environments: Vec<EnvironmentRef<'_>> = app.environments().collect();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers.min(environments.len()).max(1))
            .thread_name(|i| format!("manifold-resolve-{i}"))
            .build()
            .map_err(|e| Error::WorkerPool { message: e.to_string() })?;

        tracing::debug!(
            app = %app.name,
            environments = environments.len(),
            workers = pool.current_num_threads(),
            "Resolving environments"
        );
        let results: Vec<Result<Vec<(String, Service)>>> = pool.install(|| {
            environments
                .par_iter()
                .map(|env| self.resolve_environment(fs, env))
                .collect()
        });

        let mut inventory = Inventory::new();
        for (env, result) in environments.iter().zip(results) {
            inventory.insert_environment(env.name(), result?);
        }
        tracing::info!(app = %app.name, apps = inventory.apps().count(), "Aggregated application");
        Ok(inventory)
    }

    fn resolve_environment(
        &self,
        fs: &dyn FileSystem,
        env: &EnvironmentRef<'_>,
    ) -> Result<Vec<(String, Service)>> {
        let app = env.app();
        let path = env.path();
        let resources = self.resolver.resolve(fs, &path).map_err(|source| Error::Resolution {
            app: app.name.clone(),
            environment: env.name().to_string(),
            path: path.to_string(),
            source,
        })?;

        let extracted = self.extractor.extract(&resources);
        for (group, service) in &extracted {
            if *group != app.name {
                tracing::debug!(
                    app = %app.name,
                    environment = env.name(),
                    group = %group,
                    service = %service.name,
                    "Service grouped under a different application"
                );
            }
        }
        tracing::debug!(
            app = %app.name,
            environment = env.name(),
            path = %path,
            resources = resources.len(),
            services = extracted.len(),
            "Resolved environment"
        );
        Ok(extracted)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(DEFAULT_MAX_WORKERS)
}
