//! Transformations a kustomization applies to the documents it gathers

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use super::{ImageOverride, ImageRef};
use crate::resource::{ResolvedResource, mapping_at_mut};

/// Kinds that never carry a namespace.
const CLUSTER_SCOPED: [&str; 10] = [
    "Namespace",
    "ClusterRole",
    "ClusterRoleBinding",
    "CustomResourceDefinition",
    "PersistentVolume",
    "StorageClass",
    "PriorityClass",
    "MutatingWebhookConfiguration",
    "ValidatingWebhookConfiguration",
    "APIService",
];

/// Kinds whose name is left alone by prefixes and suffixes.
const UNRENAMED: [&str; 2] = ["Namespace", "CustomResourceDefinition"];

/// Location of the pod template inside a workload, if the kind has one.
fn pod_template(kind: &str) -> Option<&'static [&'static str]> {
    match kind {
        "Deployment" | "StatefulSet" | "DaemonSet" | "ReplicaSet" | "Job"
        | "ReplicationController" => Some(&["spec", "template"][..]),
        "CronJob" => Some(&["spec", "jobTemplate", "spec", "template"][..]),
        _ => None,
    }
}

/// Location of the label selector a common label must be added to.
fn selector(kind: &str) -> Option<&'static [&'static str]> {
    match kind {
        "Deployment" | "StatefulSet" | "DaemonSet" | "ReplicaSet" => {
            Some(&["spec", "selector", "matchLabels"][..])
        }
        "Service" | "ReplicationController" => Some(&["spec", "selector"][..]),
        _ => None,
    }
}

fn kind_of(resource: &ResolvedResource) -> String {
    resource.kind().unwrap_or_default().to_string()
}

pub(super) fn set_namespace(resource: &mut ResolvedResource, namespace: &str) {
    let kind = kind_of(resource);
    if CLUSTER_SCOPED.contains(&kind.as_str()) {
        return;
    }
    if let Some(metadata) = mapping_at_mut(resource.value_mut(), &["metadata"], true) {
        metadata.insert("namespace".into(), namespace.into());
    }
}

pub(super) fn add_name_affixes(resource: &mut ResolvedResource, prefix: &str, suffix: &str) {
    let kind = kind_of(resource);
    if UNRENAMED.contains(&kind.as_str()) {
        return;
    }
    let Some(name) = resource.name().map(str::to_string) else {
        return;
    };
    if let Some(metadata) = mapping_at_mut(resource.value_mut(), &["metadata"], false) {
        metadata.insert("name".into(), format!("{prefix}{name}{suffix}").into());
    }
}

/// Add `labels` to the resource, its selector and its pod template.
pub(super) fn add_labels(resource: &mut ResolvedResource, labels: &BTreeMap<String, String>) {
    let kind = kind_of(resource);
    let document = resource.value_mut();
    merge_into(document, &["metadata", "labels"], labels);
    if let Some(path) = selector(&kind) {
        merge_into(document, path, labels);
    }
    if let Some(template) = pod_template(&kind) {
        merge_into(document, &[template, &["metadata", "labels"][..]].concat(), labels);
    }
}

/// Add `annotations` to the resource and its pod template.
pub(super) fn add_annotations(
    resource: &mut ResolvedResource,
    annotations: &BTreeMap<String, String>,
) {
    let kind = kind_of(resource);
    let document = resource.value_mut();
    merge_into(document, &["metadata", "annotations"], annotations);
    if let Some(template) = pod_template(&kind) {
        merge_into(document, &[template, &["metadata", "annotations"][..]].concat(), annotations);
    }
}

/// Rewrite container images matching any of `images`.
///
/// The first matching entry applies to each container.
pub(super) fn set_images(resource: &mut ResolvedResource, images: &[ImageOverride]) {
    let kind = kind_of(resource);
    let pod_spec: Vec<&str> = match (kind.as_str(), pod_template(&kind)) {
        ("Pod", _) => vec!["spec"],
        (_, Some(template)) => [template, &["spec"][..]].concat(),
        _ => return,
    };
    let Some(spec) = mapping_at_mut(resource.value_mut(), &pod_spec, false) else {
        return;
    };
    for list in ["containers", "initContainers"] {
        let Some(containers) = spec.get_mut(list).and_then(Value::as_sequence_mut) else {
            continue;
        };
        for container in containers.iter_mut().filter_map(Value::as_mapping_mut) {
            rewrite_image(container, images);
        }
    }
}

fn rewrite_image(container: &mut Mapping, images: &[ImageOverride]) {
    let Some(current) = container.get("image").and_then(Value::as_str) else {
        return;
    };
    let parsed = ImageRef::parse(current);
    if let Some(rewritten) = images.iter().find_map(|image| parsed.apply(image)) {
        container.insert("image".into(), rewritten.into());
    }
}

fn merge_into(document: &mut Value, path: &[&str], entries: &BTreeMap<String, String>) {
    if entries.is_empty() {
        return;
    }
    if let Some(map) = mapping_at_mut(document, path, true) {
        for (key, value) in entries {
            map.insert(key.as_str().into(), value.as_str().into());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn resource(yaml: &str) -> ResolvedResource {
        ResolvedResource::from_yaml(yaml).unwrap()
    }

    const DEPLOYMENT: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  selector:
    matchLabels:
      app: web
  template:
    metadata:
      labels:
        app: web
    spec:
      initContainers:
        - name: init
          image: busybox
      containers:
        - name: web
          image: shop/web:v1
        - name: sidecar
";

    #[test]
    fn namespace_skips_cluster_scoped_kinds() {
        let mut role = resource("kind: ClusterRole\nmetadata:\n  name: reader\n");
        set_namespace(&mut role, "dev");
        assert_eq!(role.namespace(), None);

        let mut deployment = resource(DEPLOYMENT);
        set_namespace(&mut deployment, "dev");
        assert_eq!(deployment.namespace(), Some("dev"));
    }

    #[test]
    fn labels_reach_selector_and_template() {
        let mut deployment = resource(DEPLOYMENT);
        let labels = BTreeMap::from([("part-of".to_string(), "shop".to_string())]);
        add_labels(&mut deployment, &labels);
        for path in [
            &["metadata", "labels", "part-of"][..],
            &["spec", "selector", "matchLabels", "part-of"][..],
            &["spec", "template", "metadata", "labels", "part-of"][..],
        ] {
            assert_eq!(deployment.str_at(path), Some("shop"), "{path:?}");
        }
    }

    #[test]
    fn images_rewrite_containers_and_init_containers() {
        let mut deployment = resource(DEPLOYMENT);
        let images = [
            ImageOverride {
                name: "shop/web".into(),
                new_tag: Some("v2".into()),
                ..ImageOverride::default()
            },
            ImageOverride {
                name: "busybox".into(),
                new_tag: Some("1.36".into()),
                ..ImageOverride::default()
            },
        ];
        set_images(&mut deployment, &images);
        let containers = deployment
            .lookup(&["spec", "template", "spec", "containers"])
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(containers[0]["image"].as_str(), Some("shop/web:v2"));
        assert!(containers[1].get("image").is_none());
        let init = deployment
            .lookup(&["spec", "template", "spec", "initContainers"])
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(init[0]["image"].as_str(), Some("busybox:1.36"));
    }

    #[test]
    fn affixes_rename_but_leave_namespaces() {
        let mut deployment = resource(DEPLOYMENT);
        add_name_affixes(&mut deployment, "dev-", "-a");
        assert_eq!(deployment.name(), Some("dev-web-a"));

        let mut namespace = resource("kind: Namespace\nmetadata:\n  name: shop\n");
        add_name_affixes(&mut namespace, "dev-", "");
        assert_eq!(namespace.name(), Some("shop"));
    }
}
