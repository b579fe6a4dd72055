//! Tests for the config module

use std::collections::HashMap;
use std::fs;

use tempfile::tempdir;

use super::loader::apply_overrides;
use super::types::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.defaults.namespace, "default");
    assert_eq!(config.defaults.port, 2718);
    assert_eq!(config.defaults.storage, "1Gi");
    assert_eq!(config.defaults.image, None);
    assert_eq!(config.paths.notebook_dir, "/home/marimo/notebooks");
    assert_eq!(config.kubectl.binary, "kubectl");
    assert_eq!(config.kubectl.container, "marimo");
    assert_eq!(config.kubectl.ready_timeout_secs, 120);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[defaults]
namespace = "data-team"
storage = "5Gi"
image = "ghcr.io/marimo-team/marimo:latest"

[paths]
notebook_dir = "/srv/notebooks"

[kubectl]
binary = "oc"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.defaults.namespace, "data-team");
    assert_eq!(config.defaults.port, 2718);
    assert_eq!(config.defaults.storage, "5Gi");
    assert_eq!(
        config.defaults.image.as_deref(),
        Some("ghcr.io/marimo-team/marimo:latest")
    );
    assert_eq!(config.kubectl.binary, "oc");
    assert_eq!(config.kubectl.container, "marimo");
}

#[test]
fn test_mount_paths_follow_notebook_dir() {
    let mut config = Config::default();
    config.paths.notebook_dir = "/srv/nb".to_string();

    let paths = config.mount_paths();
    assert_eq!(paths.notebook_dir(), "/srv/nb");
    assert_eq!(paths.mounts_dir(), "/srv/nb/mounts");

    config.paths.mounts_dir = Some("/mnt".to_string());
    assert_eq!(config.mount_paths().mounts_dir(), "/mnt");
}

#[test]
fn test_resolver_uses_configured_paths() {
    let mut config = Config::default();
    config.paths.notebook_dir = "/srv/nb".to_string();

    let parsed = config.resolver().parse("rsync://data:inputs").unwrap();
    assert_eq!(parsed.mount_point.as_deref(), Some("/srv/nb/inputs"));
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[defaults]\nnamespce = \"x\"\n").unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();

    assert_eq!(config.defaults.namespace, "default");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "namespce");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("namespace"));
    assert!(warnings[0].to_string().contains("did you mean 'namespace'"));
}

#[test]
fn test_load_invalid_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[defaults\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("invalid config in"));
}

#[test]
fn test_env_overrides() {
    let config = apply_overrides(
        Config::default(),
        env(&[
            ("KUBECTL_MARIMO_NAMESPACE", "ml"),
            ("KUBECTL_MARIMO_KUBECTL", "/usr/local/bin/kubectl"),
            ("KUBECTL_MARIMO_NOTEBOOK_DIR", "/data"),
            ("KUBECTL_MARIMO_READY_TIMEOUT", "30"),
        ]),
    );

    assert_eq!(config.defaults.namespace, "ml");
    assert_eq!(config.kubectl.binary, "/usr/local/bin/kubectl");
    assert_eq!(config.paths.notebook_dir, "/data");
    assert_eq!(config.ready_timeout().as_secs(), 30);
}

#[test]
fn test_env_overrides_ignore_invalid_values() {
    let config = apply_overrides(
        Config::default(),
        env(&[
            ("KUBECTL_MARIMO_NAMESPACE", ""),
            ("KUBECTL_MARIMO_READY_TIMEOUT", "soon"),
        ]),
    );

    assert_eq!(config, Config::default());
}
