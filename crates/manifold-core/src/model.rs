//! Application declarations
//!
//! An [`Application`] names a repository, a base path inside it, and a list
//! of [`Environment`]s whose overlays live at paths relative to that base.

use std::collections::HashSet;

use manifold_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One deployment target of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,

    /// Overlay location relative to the application's base path
    pub rel_path: String,
}

impl Environment {
    pub fn new(name: impl Into<String>, rel_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rel_path: rel_path.into(),
        }
    }
}

/// A named application whose manifests live in one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub repo_url: String,

    /// Base path of the application inside the repository
    pub path: String,

    #[serde(default)]
    pub environments: Vec<Environment>,
}

impl Application {
    pub fn new(
        name: impl Into<String>,
        repo_url: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            repo_url: repo_url.into(),
            path: path.into(),
            environments: Vec::new(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environments.push(environment);
        self
    }

    /// Base path, cleaned.
    pub fn base_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.path)
    }

    /// Environments in declared order, each bound to this application.
    pub fn environments(&self) -> impl ExactSizeIterator<Item = EnvironmentRef<'_>> {
        self.environments
            .iter()
            .map(move |environment| EnvironmentRef { app: self, environment })
    }

    pub fn environment(&self, name: &str) -> Option<EnvironmentRef<'_>> {
        self.environments().find(|env| env.name() == name)
    }
}

/// An environment together with the application that owns it.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentRef<'a> {
    app: &'a Application,
    environment: &'a Environment,
}

impl<'a> EnvironmentRef<'a> {
    pub fn app(&self) -> &'a Application {
        self.app
    }

    pub fn environment(&self) -> &'a Environment {
        self.environment
    }

    pub fn name(&self) -> &'a str {
        &self.environment.name
    }

    pub fn rel_path(&self) -> &'a str {
        &self.environment.rel_path
    }

    /// The overlay directory: the application path joined with the
    /// relative path, cleaned.
    ///
    /// `/deploy/environments/base` with `../dev` gives
    /// `/deploy/environments/dev`.
    pub fn path(&self) -> NormalizedPath {
        self.app.base_path().join(&self.environment.rel_path)
    }
}

/// The set of declared applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub apps: Vec<Application>,
}

impl Config {
    /// Load and validate declarations from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        config.validate()?;
        tracing::debug!(path = %path, apps = config.apps.len(), "Loaded application declarations");
        Ok(config)
    }

    /// Parse and validate declarations from YAML text.
    pub fn parse_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check names are present and unique.
    ///
    /// Application names must be unique across the set, environment names
    /// unique within their application.
    pub fn validate(&self) -> Result<()> {
        let mut apps = HashSet::new();
        for app in &self.apps {
            if app.name.trim().is_empty() {
                return Err(invalid("application with an empty name".to_string()));
            }
            if !apps.insert(app.name.as_str()) {
                return Err(invalid(format!("duplicate application '{}'", app.name)));
            }
            let mut environments = HashSet::new();
            for env in &app.environments {
                if env.name.trim().is_empty() {
                    return Err(invalid(format!(
                        "application '{}' has an environment with an empty name",
                        app.name
                    )));
                }
                if !environments.insert(env.name.as_str()) {
                    return Err(invalid(format!(
                        "application '{}' declares environment '{}' twice",
                        app.name, env.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn app(&self, name: &str) -> Option<&Application> {
        self.apps.iter().find(|app| app.name == name)
    }

    /// Look up `name`, failing with [`Error::AppNotFound`].
    pub fn require_app(&self, name: &str) -> Result<&Application> {
        self.app(name).ok_or_else(|| Error::AppNotFound { name: name.to_string() })
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig { message }
}
