//! Tests for application declarations

use std::fs;

use manifold_core::{Application, Config, Environment, Error};
use manifold_fs::NormalizedPath;
use manifold_test_utils::fixtures;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
#[case("/deploy/environments/base", "../dev", "/deploy/environments/dev")]
#[case("go-demo/base", "../overlays/dev", "go-demo/overlays/dev")]
#[case("apps/shop", "overlays/prod", "apps/shop/overlays/prod")]
#[case("apps/shop", ".", "apps/shop")]
#[case("apps/shop/", "./overlays//dev/", "apps/shop/overlays/dev")]
fn test_environment_path_is_cleaned_join(
    #[case] base: &str,
    #[case] rel: &str,
    #[case] expected: &str,
) {
    let app = Application::new("shop", "https://example.com/shop.git", base)
        .with_environment(Environment::new("env", rel));
    let env = app.environment("env").unwrap();
    assert_eq!(env.path().as_str(), expected);
}

#[test]
fn test_environment_ref_points_back_to_app() {
    let app = Application::new("shop", "url", "base")
        .with_environment(Environment::new("dev", "../dev"))
        .with_environment(Environment::new("prod", "../prod"));
    let names: Vec<_> = app.environments().map(|env| env.name()).collect();
    assert_eq!(names, vec!["dev", "prod"]);
    for env in app.environments() {
        assert_eq!(env.app().name, "shop");
    }
}

#[test]
fn test_parse_yaml_fixture_config() {
    let config = Config::parse_yaml(&fixtures::go_demo_config("/tmp/repo")).unwrap();
    let app = config.require_app("go-demo").unwrap();
    assert_eq!(app.repo_url, "/tmp/repo");
    assert_eq!(app.path, fixtures::GO_DEMO_BASE);
    let envs: Vec<_> = app
        .environments()
        .map(|env| env.path().to_string())
        .collect();
    assert_eq!(
        envs,
        vec!["go-demo/overlays/dev", "go-demo/overlays/staging", "go-demo/overlays/production"]
    );
}

#[test]
fn test_missing_app_is_reported() {
    let config = Config::default();
    assert!(matches!(
        config.require_app("nope"),
        Err(Error::AppNotFound { name }) if name == "nope"
    ));
}

#[rstest]
#[case::duplicate_app("apps:\n- {name: a, repo_url: u, path: p}\n- {name: a, repo_url: u, path: p}\n")]
#[case::empty_app_name("apps:\n- {name: '', repo_url: u, path: p}\n")]
#[case::duplicate_env(
    "apps:\n- name: a\n  repo_url: u\n  path: p\n  environments:\n  - {name: dev, rel_path: x}\n  - {name: dev, rel_path: y}\n"
)]
#[case::not_yaml("apps: [")]
fn test_invalid_declarations_are_rejected(#[case] content: &str) {
    assert!(matches!(Config::parse_yaml(content), Err(Error::InvalidConfig { .. })));
}

#[test]
fn test_load_from_toml_and_yaml_files() {
    let dir = TempDir::new().unwrap();
    let yaml = dir.path().join("apps.yaml");
    fs::write(&yaml, fixtures::go_demo_config("/srv/repo")).unwrap();
    let toml = dir.path().join("apps.toml");
    fs::write(
        &toml,
        r#"
[[apps]]
name = "go-demo"
repo_url = "/srv/repo"
path = "go-demo/base"

[[apps.environments]]
name = "dev"
rel_path = "../overlays/dev"
"#,
    )
    .unwrap();

    let from_yaml = Config::load(&NormalizedPath::new(&yaml)).unwrap();
    let from_toml = Config::load(&NormalizedPath::new(&toml)).unwrap();
    assert_eq!(from_yaml.apps[0].environments[0], from_toml.apps[0].environments[0]);
    assert_eq!(from_toml.apps[0].name, "go-demo");
}

#[test]
fn test_load_missing_file_is_fs_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(&NormalizedPath::new(dir.path().join("absent.yaml"))).unwrap_err();
    assert!(matches!(err, Error::Fs(_)));
}
