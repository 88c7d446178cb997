//! Desired-state resolution for Manifold
//!
//! Turns application declarations into an inventory of
//! application → environment → service → images:
//!
//! - **Model**: applications, their environments and overlay paths
//! - **Resolution**: the [`OverlayResolver`] capability and the built-in
//!   [`KustomizeResolver`]
//! - **Extraction**: workload documents to [`Service`] records
//! - **Aggregation**: one snapshot per application, environments resolved
//!   in parallel and merged in declared order
//! - **Pipelines**: ordered stages read from overlay subdirectories
//!
//! # Architecture
//!
//! ```text
//!                 manifold-cli
//!                      |
//!                manifold-core
//!                      |
//!          +-----------+-----------+
//!          |                       |
//!    manifold-git  ------->  manifold-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use manifold_core::{Aggregator, Config, KustomizeResolver};
//! use manifold_fs::NormalizedPath;
//!
//! fn example() -> manifold_core::Result<()> {
//!     let config = Config::load(&NormalizedPath::new("apps.yaml"))?;
//!     let aggregator = Aggregator::new(KustomizeResolver::new());
//!     for app in &config.apps {
//!         let inventory = aggregator.aggregate(app)?;
//!         println!("{:?}", inventory.environments(&app.name));
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod desired;
pub mod error;
pub mod extract;
pub mod inventory;
pub mod model;
pub mod pipeline;
pub mod resolver;
pub mod resource;

pub use aggregate::Aggregator;
pub use desired::{AppSummary, DesiredState, EnvironmentState, EnvironmentSummary, ServiceState};
pub use error::{Error, Result};
pub use extract::{AppServices, Extractor, MalformedResource, Service};
pub use inventory::{Inventory, ServiceImages};
pub use model::{Application, Config, Environment, EnvironmentRef};
pub use pipeline::{Stage, list_stages};
pub use resolver::{KustomizeResolver, OverlayResolver, ResolveError};
pub use resource::{ResolvedResource, ResourceId};
