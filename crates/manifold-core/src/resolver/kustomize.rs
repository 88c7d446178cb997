//! Built-in kustomization resolver

use std::collections::HashSet;

use manifold_fs::{FileSystem, NormalizedPath};
use serde::Deserialize;
use serde_yaml::Value;

use super::kustomization::{KUSTOMIZATION_FILES, Kustomization};
use super::{OverlayResolver, ResolveError, transform};
use crate::resource::ResolvedResource;

/// Resolves kustomization directories read through a [`FileSystem`].
///
/// Supports local `resources` and `bases` (files and directories),
/// `namespace`, `namePrefix`, `nameSuffix`, `commonLabels`,
/// `commonAnnotations` and `images`. Anything else in a kustomization is
/// reported as [`ResolveError::UnsupportedField`].
///
/// Documents come back in declaration order: each entry's documents in
/// the order they were written, entries in the order they are listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct KustomizeResolver;

impl KustomizeResolver {
    pub fn new() -> Self {
        Self
    }
}

impl OverlayResolver for KustomizeResolver {
    fn resolve(
        &self,
        fs: &dyn FileSystem,
        dir: &NormalizedPath,
    ) -> Result<Vec<ResolvedResource>, ResolveError> {
        let resources = Build { fs, stack: Vec::new() }.directory(dir)?;
        tracing::debug!(dir = %dir, resources = resources.len(), "Resolved kustomization");
        Ok(resources)
    }
}

/// State of one resolution: the directories currently being built.
struct Build<'f> {
    fs: &'f dyn FileSystem,
    stack: Vec<NormalizedPath>,
}

impl Build<'_> {
    fn directory(&mut self, dir: &NormalizedPath) -> Result<Vec<ResolvedResource>, ResolveError> {
        if !self.fs.is_dir(dir) {
            return Err(ResolveError::NotADirectory { path: dir.clone() });
        }
        if self.stack.contains(dir) {
            let chain = self
                .stack
                .iter()
                .chain(std::iter::once(dir))
                .map(NormalizedPath::as_str)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ResolveError::Cycle { chain });
        }

        let (file, kustomization) = self.load(dir)?;
        self.stack.push(dir.clone());
        let built = self.build(dir, &file, &kustomization);
        self.stack.pop();
        built
    }

    fn load(&self, dir: &NormalizedPath) -> Result<(NormalizedPath, Kustomization), ResolveError> {
        for name in KUSTOMIZATION_FILES {
            let file = dir.join(name);
            match self.fs.read_file(&file) {
                Ok(content) => {
                    let kustomization = Kustomization::parse(&file, &content)?;
                    return Ok((file, kustomization));
                }
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(ResolveError::MissingKustomization { dir: dir.clone() })
    }

    fn build(
        &mut self,
        dir: &NormalizedPath,
        file: &NormalizedPath,
        kustomization: &Kustomization,
    ) -> Result<Vec<ResolvedResource>, ResolveError> {
        let mut resources = Vec::new();
        let mut seen = HashSet::new();

        for entry in kustomization.entries() {
            if is_remote(entry) {
                return Err(ResolveError::RemoteResource {
                    file: file.clone(),
                    entry: entry.to_string(),
                });
            }
            let target = dir.join(entry);
            let gathered = if self.fs.is_dir(&target) {
                self.directory(&target)?
            } else {
                match self.fs.read_file(&target) {
                    Ok(content) => documents(&target, &content)?,
                    Err(e) if e.is_not_found() => {
                        return Err(ResolveError::MissingResource {
                            file: file.clone(),
                            entry: entry.to_string(),
                        });
                    }
                    Err(e) => return Err(e.into()),
                }
            };
            for resource in gathered {
                if !seen.insert(resource.id()) {
                    return Err(ResolveError::DuplicateResource {
                        id: resource.id(),
                        file: file.clone(),
                    });
                }
                resources.push(resource);
            }
        }

        for resource in &mut resources {
            apply(kustomization, resource);
        }
        Ok(resources)
    }
}

fn apply(kustomization: &Kustomization, resource: &mut ResolvedResource) {
    if let Some(namespace) = &kustomization.namespace {
        transform::set_namespace(resource, namespace);
    }
    let prefix = kustomization.name_prefix.as_deref().unwrap_or_default();
    let suffix = kustomization.name_suffix.as_deref().unwrap_or_default();
    if !prefix.is_empty() || !suffix.is_empty() {
        transform::add_name_affixes(resource, prefix, suffix);
    }
    transform::add_labels(resource, &kustomization.common_labels);
    transform::add_annotations(resource, &kustomization.common_annotations);
    if !kustomization.images.is_empty() {
        transform::set_images(resource, &kustomization.images);
    }
}

fn is_remote(entry: &str) -> bool {
    entry.contains("://") || entry.starts_with("github.com/") || entry.starts_with("git@")
}

/// Split a manifest file into documents.
///
/// Empty documents are skipped and `List` documents contribute their
/// items. Every document must be a mapping with a `kind` and a
/// `metadata.name`.
fn documents(path: &NormalizedPath, content: &[u8]) -> Result<Vec<ResolvedResource>, ResolveError> {
    let mut resources = Vec::new();
    for document in serde_yaml::Deserializer::from_slice(content) {
        let value = Value::deserialize(document).map_err(|e| ResolveError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        if value.is_null() {
            continue;
        }
        if value.get("kind").and_then(Value::as_str) == Some("List") {
            let items = value
                .get("items")
                .and_then(Value::as_sequence)
                .cloned()
                .unwrap_or_default();
            for item in items {
                resources.push(checked(path, item)?);
            }
        } else {
            resources.push(checked(path, value)?);
        }
    }
    Ok(resources)
}

fn checked(path: &NormalizedPath, value: Value) -> Result<ResolvedResource, ResolveError> {
    let invalid = |message: &str| ResolveError::InvalidDocument {
        path: path.clone(),
        message: message.to_string(),
    };
    if !value.is_mapping() {
        return Err(invalid("document is not a mapping"));
    }
    let resource = ResolvedResource::new(value);
    if resource.kind().is_none() {
        return Err(invalid("missing kind"));
    }
    if resource.name().is_none() {
        return Err(invalid("missing metadata.name"));
    }
    Ok(resource)
}
