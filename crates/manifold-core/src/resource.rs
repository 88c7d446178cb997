//! Resolved manifest documents

use std::fmt;

use serde_yaml::{Mapping, Value};

/// One fully resolved manifest document.
///
/// The document is kept as a generic YAML tree. Every accessor is
/// optional, so callers decide what a missing or mistyped field means.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedResource {
    document: Value,
}

impl ResolvedResource {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Parse a single YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content).map(Self::new)
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn into_value(self) -> Value {
        self.document
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.document
    }

    /// Walk nested mappings along `path`.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.document, path)
    }

    /// String at `path`, if present and a string.
    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<&str> {
        self.str_at(&["kind"])
    }

    pub fn api_version(&self) -> Option<&str> {
        self.str_at(&["apiVersion"])
    }

    pub fn name(&self) -> Option<&str> {
        self.str_at(&["metadata", "name"])
    }

    pub fn namespace(&self) -> Option<&str> {
        self.str_at(&["metadata", "namespace"])
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.lookup(&["metadata", "labels", key]).and_then(Value::as_str)
    }

    pub fn id(&self) -> ResourceId {
        ResourceId {
            api_version: self.api_version().unwrap_or_default().to_string(),
            kind: self.kind().unwrap_or_default().to_string(),
            namespace: self.namespace().map(str::to_string),
            name: self.name().unwrap_or_default().to_string(),
        }
    }
}

/// Identity of a resource within one build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    pub api_version: String,
    pub kind: String,
    pub namespace: Option<String>,
    pub name: String,
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version, self.kind)?;
        if let Some(namespace) = &self.namespace {
            write!(f, "/{namespace}")?;
        }
        write!(f, "/{}", self.name)
    }
}

pub fn lookup<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, key| current.as_mapping()?.get(*key))
}

/// Mapping at `path`, optionally creating missing intermediate mappings.
///
/// Returns `None` when a step exists but is not a mapping.
pub(crate) fn mapping_at_mut<'v>(
    value: &'v mut Value,
    path: &[&str],
    create: bool,
) -> Option<&'v mut Mapping> {
    let mut current = value;
    for key in path {
        let map = current.as_mapping_mut()?;
        if create && !map.contains_key(*key) {
            map.insert(Value::from(*key), Value::Mapping(Mapping::new()));
        }
        current = map.get_mut(*key)?;
    }
    current.as_mapping_mut()
}
