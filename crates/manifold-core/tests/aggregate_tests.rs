//! End-to-end aggregation tests against real repositories

use std::sync::atomic::{AtomicUsize, Ordering};

use manifold_core::{
    Aggregator, Application, Config, Environment, Error, KustomizeResolver, OverlayResolver,
    ResolveError, ResolvedResource,
};
use manifold_fs::{FileSystem, NormalizedPath};
use manifold_git::{CancellationToken, CloneOptions, Snapshot};
use manifold_test_utils::{TestRepo, fixtures};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn go_demo_app(repo: &TestRepo) -> Application {
    let config = Config::parse_yaml(&fixtures::go_demo_config(&repo.url())).unwrap();
    config.require_app("go-demo").unwrap().clone()
}

fn images(inventory: &manifold_core::Inventory, env: &str, svc: &str) -> Vec<String> {
    inventory.images("go-demo", env, svc).unwrap().to_vec()
}

#[test]
fn test_go_demo_inventory() {
    let repo = TestRepo::with_files(fixtures::go_demo());
    let app = go_demo_app(&repo);

    let inventory = Aggregator::new(KustomizeResolver::new()).aggregate(&app).unwrap();

    assert_eq!(inventory.apps().collect::<Vec<_>>(), vec!["go-demo"]);
    let envs: Vec<_> = inventory
        .environments("go-demo")
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(envs, vec!["dev", "staging", "production"]);

    assert_eq!(images(&inventory, "dev", "go-demo-http"), vec!["bigkevmcd/go-demo:latest"]);
    assert_eq!(images(&inventory, "staging", "go-demo-http"), vec!["bigkevmcd/go-demo:staging"]);
    assert_eq!(
        images(&inventory, "production", "go-demo-http"),
        vec!["bigkevmcd/go-demo:production"]
    );
    for env in ["dev", "staging", "production"] {
        assert_eq!(images(&inventory, env, "redis"), vec!["redis:6-alpine"]);
        let services: Vec<_> = inventory
            .services("go-demo", env)
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(services, vec!["go-demo-http", "redis"]);
    }
}

#[test]
fn test_missing_environment_fails_whole_application() {
    let repo = TestRepo::with_files(fixtures::go_demo_without("staging"));
    let app = go_demo_app(&repo);

    let err = Aggregator::new(KustomizeResolver::new()).aggregate(&app).unwrap_err();
    match err {
        Error::Resolution { app, environment, path, .. } => {
            assert_eq!(app, "go-demo");
            assert_eq!(environment, "staging");
            assert_eq!(path, "go-demo/overlays/staging");
        }
        other => panic!("expected resolution error, got {other}"),
    }
}

#[test]
fn test_unreachable_repository_is_acquisition_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let app = Application::new("ghost", dir.path().join("missing").to_string_lossy(), "base")
        .with_environment(Environment::new("dev", "../dev"));
    let err = Aggregator::new(KustomizeResolver::new()).aggregate(&app).unwrap_err();
    assert!(matches!(err, Error::Acquisition { .. }), "{err}");
}

#[test]
fn test_cancelled_acquisition_produces_no_inventory() {
    let repo = TestRepo::with_files(fixtures::go_demo());
    let app = go_demo_app(&repo);
    let token = CancellationToken::new();
    token.cancel();

    let err = Aggregator::new(KustomizeResolver::new())
        .with_clone_options(CloneOptions::default().with_cancellation(token))
        .aggregate(&app)
        .unwrap_err();
    assert!(
        matches!(err, Error::Acquisition { source: manifold_git::Error::Cancelled { .. }, .. }),
        "{err}"
    );
}

#[test]
fn test_repeated_aggregation_of_one_snapshot_is_identical() {
    let snapshot = Snapshot::from_files("c", fixtures::go_demo());
    let repo = TestRepo::with_files(fixtures::go_demo());
    let app = go_demo_app(&repo);
    let aggregator = Aggregator::new(KustomizeResolver::new());

    let first = aggregator.aggregate_snapshot(&app, &snapshot).unwrap();
    let second = aggregator.aggregate_snapshot(&app, &snapshot).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(16)]
fn test_worker_count_does_not_change_result(#[case] workers: usize) {
    let snapshot = Snapshot::from_files("c", fixtures::go_demo());
    let repo = TestRepo::with_files(fixtures::go_demo());
    let app = go_demo_app(&repo);

    let sequential = Aggregator::new(KustomizeResolver::new())
        .with_workers(1)
        .aggregate_snapshot(&app, &snapshot)
        .unwrap();
    let parallel = Aggregator::new(KustomizeResolver::new())
        .with_workers(workers)
        .aggregate_snapshot(&app, &snapshot)
        .unwrap();
    assert_eq!(
        serde_json::to_value(&sequential).unwrap(),
        serde_json::to_value(&parallel).unwrap()
    );
}

#[test]
fn test_unlabeled_workloads_are_excluded() {
    let mut files = fixtures::go_demo();
    files.push((
        "go-demo/overlays/dev/kustomization.yaml",
        "\
namespace: dev
resources:
  - ../../base
  - debug.yaml
"
        .to_string(),
    ));
    files.push((
        "go-demo/overlays/dev/debug.yaml",
        "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: debug
spec:
  template:
    spec:
      containers:
        - image: busybox
"
        .to_string(),
    ));
    let snapshot = Snapshot::from_files("c", files);
    let app = Application::new("go-demo", "unused", fixtures::GO_DEMO_BASE)
        .with_environment(Environment::new("dev", "../overlays/dev"));

    let inventory = Aggregator::new(KustomizeResolver::new())
        .aggregate_snapshot(&app, &snapshot)
        .unwrap();
    let services: Vec<_> = inventory
        .services("go-demo", "dev")
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(services, vec!["go-demo-http", "redis"]);
}

#[test]
fn test_services_under_other_group_keys_are_kept() {
    let snapshot = Snapshot::from_files(
        "c",
        [
            ("shop/kustomization.yaml", "resources: [web.yaml]\n"),
            (
                "shop/web.yaml",
                "\
kind: Deployment
metadata:
  name: web
  labels:
    app.kubernetes.io/part-of: storefront
spec:
  template:
    spec:
      containers:
        - image: web:1
",
            ),
        ],
    );
    let app =
        Application::new("shop", "unused", "shop").with_environment(Environment::new("prod", "."));
    let inventory = Aggregator::new(KustomizeResolver::new())
        .aggregate_snapshot(&app, &snapshot)
        .unwrap();
    assert_eq!(inventory.images("storefront", "prod", "web"), Some(&["web:1".to_string()][..]));
    assert!(inventory.environments("shop").is_none());
}

#[test]
fn test_application_without_environments_is_empty() {
    let snapshot = Snapshot::from_files("c", fixtures::go_demo());
    let app = Application::new("go-demo", "unused", fixtures::GO_DEMO_BASE);
    let inventory = Aggregator::new(KustomizeResolver::new())
        .aggregate_snapshot(&app, &snapshot)
        .unwrap();
    assert!(inventory.is_empty());
}

/// Records how often it is called and fails for one directory.
struct CountingResolver {
    calls: AtomicUsize,
    fail_on: &'static str,
}

impl OverlayResolver for CountingResolver {
    fn resolve(
        &self,
        fs: &dyn FileSystem,
        dir: &NormalizedPath,
    ) -> Result<Vec<ResolvedResource>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if dir.as_str() == self.fail_on {
            return Err(ResolveError::Engine {
                message: format!("refusing {dir}"),
            });
        }
        KustomizeResolver::new().resolve(fs, dir)
    }
}

#[test]
fn test_first_failure_in_declared_order_is_reported() {
    let snapshot = Snapshot::from_files("c", fixtures::go_demo_without("production"));
    let app = Application::new("go-demo", "unused", fixtures::GO_DEMO_BASE)
        .with_environment(Environment::new("dev", "../overlays/dev"))
        .with_environment(Environment::new("staging", "../overlays/staging"))
        .with_environment(Environment::new("production", "../overlays/production"));
    let resolver = CountingResolver {
        calls: AtomicUsize::new(0),
        fail_on: "go-demo/overlays/staging",
    };

    let err = Aggregator::new(&resolver)
        .with_workers(3)
        .aggregate_snapshot(&app, &snapshot)
        .unwrap_err();
    match err {
        Error::Resolution { environment, source, .. } => {
            assert_eq!(environment, "staging");
            assert!(matches!(source, ResolveError::Engine { .. }));
        }
        other => panic!("expected resolution error, got {other}"),
    }
    assert_eq!(resolver.calls.load(Ordering::SeqCst), 3);
}
