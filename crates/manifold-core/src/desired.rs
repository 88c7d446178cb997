//! Presentation shapes of the inventory

use serde::Serialize;

use crate::inventory::Inventory;
use crate::model::{Application, Config};

/// The desired state of one application in every declared environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesiredState {
    pub name: String,
    pub repo_url: String,
    pub path: String,
    pub environments: Vec<EnvironmentState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentState {
    pub name: String,
    pub rel_path: String,
    pub services: Vec<ServiceState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceState {
    pub name: String,
    pub images: Vec<String>,
}

impl DesiredState {
    /// Combine `app`'s declaration with the services recorded for it.
    ///
    /// Environments follow the declaration. One with no services in
    /// `inventory` is listed with an empty service list.
    pub fn build(app: &Application, inventory: &Inventory) -> Self {
        let environments = app
            .environments()
            .map(|env| EnvironmentState {
                name: env.name().to_string(),
                rel_path: env.rel_path().to_string(),
                services: inventory
                    .services(&app.name, env.name())
                    .into_iter()
                    .flatten()
                    .map(|(name, images)| ServiceState {
                        name: name.clone(),
                        images: images.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: app.name.clone(),
            repo_url: app.repo_url.clone(),
            path: app.path.clone(),
            environments,
        }
    }
}

/// A declared application with its resolved overlay paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSummary {
    pub name: String,
    pub repo_url: String,
    pub path: String,
    pub environments: Vec<EnvironmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentSummary {
    pub name: String,
    pub rel_path: String,

    /// Overlay directory inside the repository
    pub path: String,
}

impl AppSummary {
    pub fn from_app(app: &Application) -> Self {
        Self {
            name: app.name.clone(),
            repo_url: app.repo_url.clone(),
            path: app.path.clone(),
            environments: app
                .environments()
                .map(|env| EnvironmentSummary {
                    name: env.name().to_string(),
                    rel_path: env.rel_path().to_string(),
                    path: env.path().to_string(),
                })
                .collect(),
        }
    }

    pub fn list(config: &Config) -> Vec<Self> {
        config.apps.iter().map(Self::from_app).collect()
    }
}
