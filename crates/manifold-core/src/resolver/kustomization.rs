//! The kustomization file

use std::collections::BTreeMap;

use manifold_fs::NormalizedPath;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use super::ResolveError;

/// File names probed, in order, when looking for a kustomization.
pub const KUSTOMIZATION_FILES: [&str; 3] =
    ["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// Header fields that carry no build instructions.
const IGNORED_FIELDS: [&str; 2] = ["apiVersion", "kind"];

/// The subset of a kustomization the built-in resolver understands.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    #[serde(default)]
    pub resources: Vec<String>,

    /// Legacy spelling of `resources`, read before them
    #[serde(default)]
    pub bases: Vec<String>,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub name_prefix: Option<String>,

    #[serde(default)]
    pub name_suffix: Option<String>,

    #[serde(default)]
    pub common_labels: BTreeMap<String, String>,

    #[serde(default)]
    pub common_annotations: BTreeMap<String, String>,

    #[serde(default)]
    pub images: Vec<ImageOverride>,

    #[serde(flatten)]
    other: BTreeMap<String, Value>,
}

/// One entry of `images:`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOverride {
    pub name: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub new_name: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub new_tag: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub digest: Option<String>,
}

impl Kustomization {
    /// Parse `content` read from `file`.
    ///
    /// An empty file is an empty kustomization. Any field outside the
    /// supported subset is rejected rather than silently ignored.
    pub fn parse(file: &NormalizedPath, content: &[u8]) -> Result<Self, ResolveError> {
        let parse_error = |e: serde_yaml::Error| ResolveError::Parse {
            path: file.clone(),
            message: e.to_string(),
        };
        let value: Value = serde_yaml::from_slice(content).map_err(parse_error)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        let kustomization: Self = serde_yaml::from_value(value).map_err(parse_error)?;

        if let Some(field) = kustomization
            .other
            .keys()
            .find(|field| !IGNORED_FIELDS.contains(&field.as_str()))
        {
            return Err(ResolveError::UnsupportedField {
                file: file.clone(),
                field: field.clone(),
            });
        }
        Ok(kustomization)
    }

    /// `bases` then `resources`, in declared order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().chain(&self.resources).map(String::as_str)
    }
}

/// Accept tags written as YAML numbers or booleans (`newTag: 1.2`).
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Null) | None => None,
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a scalar, found {other:?}"
            )));
        }
    })
}
