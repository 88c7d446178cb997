//! The application → environment → service → images mapping

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::extract::Service;

/// Service name → images, sorted by service name.
pub type ServiceImages = BTreeMap<String, Vec<String>>;

/// Desired images per application, environment and service.
///
/// Applications and services are ordered by name. Environments keep the
/// order in which they were inserted, which the aggregator makes the
/// declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    apps: BTreeMap<String, IndexMap<String, ServiceImages>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the services extracted for `environment`.
    ///
    /// Each service lands under its group key. Within one group and
    /// environment, a later service replaces an earlier one of the same
    /// name.
    pub fn insert_environment(
        &mut self,
        environment: &str,
        extracted: impl IntoIterator<Item = (String, Service)>,
    ) {
        for (group, service) in extracted {
            self.apps
                .entry(group)
                .or_default()
                .entry(environment.to_string())
                .or_default()
                .insert(service.name, service.images);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Application names in sorted order.
    pub fn apps(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    pub fn environments(&self, app: &str) -> Option<&IndexMap<String, ServiceImages>> {
        self.apps.get(app)
    }

    pub fn services(&self, app: &str, environment: &str) -> Option<&ServiceImages> {
        self.environments(app)?.get(environment)
    }

    pub fn images(&self, app: &str, environment: &str, service: &str) -> Option<&[String]> {
        self.services(app, environment)?.get(service).map(Vec::as_slice)
    }
}
