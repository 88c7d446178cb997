//! Service extraction from resolved documents
//!
//! Only workloads of one kind (`Deployment` by default) that carry the
//! grouping label are kept. Everything else is skipped without failing the
//! build: unlabeled workloads quietly, malformed ones with a warning.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use crate::resource::ResolvedResource;

/// Kind of the documents treated as services.
pub const WORKLOAD_KIND: &str = "Deployment";

/// Label naming the application a workload belongs to.
pub const GROUP_LABEL: &str = "app.kubernetes.io/part-of";

/// A deployable unit within an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: String,

    /// Empty when the workload declares none
    pub namespace: String,

    pub replicas: u64,

    /// Images of the pod's containers, in container order
    pub images: Vec<String>,
}

/// The services of one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppServices {
    pub name: String,

    /// Sorted by service name
    pub services: Vec<Service>,
}

/// Why a workload could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed {kind} '{name}': {reason}")]
pub struct MalformedResource {
    pub kind: String,
    pub name: String,
    pub reason: &'static str,
}

/// Selects workloads and turns them into `(group, service)` pairs.
#[derive(Debug, Clone)]
pub struct Extractor {
    kind: String,
    group_label: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            kind: WORKLOAD_KIND.to_string(),
            group_label: GROUP_LABEL.to_string(),
        }
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_group_label(mut self, label: impl Into<String>) -> Self {
        self.group_label = label.into();
        self
    }

    /// Extract every selected workload, in input order.
    pub fn extract(&self, resources: &[ResolvedResource]) -> Vec<(String, Service)> {
        resources.iter().filter_map(|r| self.extract_one(r)).collect()
    }

    fn extract_one(&self, resource: &ResolvedResource) -> Option<(String, Service)> {
        if resource.kind() != Some(self.kind.as_str()) {
            return None;
        }
        let group = match resource.label(&self.group_label) {
            Some(group) if !group.is_empty() => group,
            _ => {
                tracing::debug!(
                    resource = %resource.id(),
                    label = %self.group_label,
                    "Skipping workload without group label"
                );
                return None;
            }
        };
        match extract_service(resource) {
            Ok(service) => Some((group.to_string(), service)),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed workload");
                None
            }
        }
    }

    /// Group extracted services by their group key.
    ///
    /// Groups keep first-seen order; services within a group are sorted by
    /// name, and a later service replaces an earlier one with the same name.
    pub fn catalog(&self, resources: &[ResolvedResource]) -> Vec<AppServices> {
        let mut groups: IndexMap<String, BTreeMap<String, Service>> = IndexMap::new();
        for (group, service) in self.extract(resources) {
            groups.entry(group).or_default().insert(service.name.clone(), service);
        }
        groups
            .into_iter()
            .map(|(name, services)| AppServices {
                name,
                services: services.into_values().collect(),
            })
            .collect()
    }
}

/// Read name, namespace, replicas and images from a workload document.
///
/// Requires `metadata.name` and a `spec.template.spec.containers` list.
/// Containers without a string `image` contribute nothing.
pub fn extract_service(resource: &ResolvedResource) -> Result<Service, MalformedResource> {
    let malformed = |reason| MalformedResource {
        kind: resource.kind().unwrap_or_default().to_string(),
        name: resource.name().unwrap_or("<unnamed>").to_string(),
        reason,
    };

    let name = resource.name().ok_or_else(|| malformed("missing metadata.name"))?;
    let containers = resource
        .lookup(&["spec", "template", "spec", "containers"])
        .and_then(Value::as_sequence)
        .ok_or_else(|| malformed("missing spec.template.spec.containers"))?;

    let images = containers
        .iter()
        .filter_map(|container| container.get("image").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    Ok(Service {
        name: name.to_string(),
        namespace: resource.namespace().unwrap_or_default().to_string(),
        replicas: replicas(resource.lookup(&["spec", "replicas"])),
        images,
    })
}

/// Replica count, or zero when absent, negative or not a whole number.
///
/// Integral floats (`2.0`) and numeric strings (`"3"`) are accepted.
pub fn replicas(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .unwrap_or(0)
}
