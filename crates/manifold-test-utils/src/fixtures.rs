//! Overlay trees used across the workspace tests.
//!
//! The `go-demo` tree is a base with two Deployments (`go-demo-http`, whose
//! image tag is left to the overlays, and `redis`) plus a Service, and three
//! overlays (`dev`, `staging`, `production`) that only set the namespace and
//! the `go-demo-http` image tag.

/// Application path of the go-demo base inside the fixture repository.
pub const GO_DEMO_BASE: &str = "go-demo/base";

const BASE_KUSTOMIZATION: &str = "\
apiVersion: kustomize.config.k8s.io/v1beta1
kind: Kustomization
commonLabels:
  app.kubernetes.io/part-of: go-demo
resources:
  - go-demo-http.yaml
  - redis.yaml
  - service.yaml
";

const GO_DEMO_HTTP: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: go-demo-http
  labels:
    app.kubernetes.io/name: go-demo-http
spec:
  replicas: 1
  selector:
    matchLabels:
      app.kubernetes.io/name: go-demo-http
  template:
    metadata:
      labels:
        app.kubernetes.io/name: go-demo-http
    spec:
      containers:
        - name: go-demo-http
          image: bigkevmcd/go-demo
          ports:
            - containerPort: 8080
";

const REDIS: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: redis
  labels:
    app.kubernetes.io/name: redis
spec:
  replicas: 1
  selector:
    matchLabels:
      app.kubernetes.io/name: redis
  template:
    metadata:
      labels:
        app.kubernetes.io/name: redis
    spec:
      containers:
        - name: redis
          image: redis:6-alpine
          ports:
            - containerPort: 6379
";

const SERVICE: &str = "\
apiVersion: v1
kind: Service
metadata:
  name: go-demo-http
spec:
  selector:
    app.kubernetes.io/name: go-demo-http
  ports:
    - port: 8080
";

fn overlay(namespace: &str, tag: &str) -> String {
    format!(
        "\
apiVersion: kustomize.config.k8s.io/v1beta1
kind: Kustomization
namespace: {namespace}
resources:
  - ../../base
images:
  - name: bigkevmcd/go-demo
    newTag: {tag}
"
    )
}

/// The full go-demo tree as `(path, content)` pairs.
pub fn go_demo() -> Vec<(&'static str, String)> {
    vec![
        ("README.md", "# go-demo deployment config\n".to_string()),
        ("go-demo/base/kustomization.yaml", BASE_KUSTOMIZATION.to_string()),
        ("go-demo/base/go-demo-http.yaml", GO_DEMO_HTTP.to_string()),
        ("go-demo/base/redis.yaml", REDIS.to_string()),
        ("go-demo/base/service.yaml", SERVICE.to_string()),
        ("go-demo/overlays/dev/kustomization.yaml", overlay("dev", "latest")),
        ("go-demo/overlays/staging/kustomization.yaml", overlay("staging", "staging")),
        (
            "go-demo/overlays/production/kustomization.yaml",
            overlay("production", "production"),
        ),
    ]
}

/// The go-demo tree without the overlay for `environment`.
pub fn go_demo_without(environment: &str) -> Vec<(&'static str, String)> {
    let prefix = format!("go-demo/overlays/{environment}/");
    go_demo()
        .into_iter()
        .filter(|(path, _)| !path.starts_with(&prefix))
        .collect()
}

/// An application declaration file for the go-demo tree at `repo_url`.
pub fn go_demo_config(repo_url: &str) -> String {
    format!(
        "\
apps:
  - name: go-demo
    repo_url: '{repo_url}'
    path: {GO_DEMO_BASE}
    environments:
      - name: dev
        rel_path: ../overlays/dev
      - name: staging
        rel_path: ../overlays/staging
      - name: production
        rel_path: ../overlays/production
"
    )
}
