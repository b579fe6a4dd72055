//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{MarimoError, MarimoResult};

use super::types::Config;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> MarimoResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| MarimoError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// `~/.config/kubectl-marimo/config.toml`, when a config directory exists
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kubectl-marimo").join("config.toml"))
}

/// Load from user config or defaults, then apply env overrides.
///
/// A broken user config is reported and ignored.
pub fn load_or_default() -> Config {
    let config = match user_config_path().filter(|p| p.exists()) {
        Some(path) => match load_with_warnings(&path) {
            Ok((config, warnings)) => {
                for warning in &warnings {
                    warn!("{}", warning);
                }
                debug!(path = %path.display(), "loaded user config");
                config
            }
            Err(e) => {
                warn!("ignoring user config: {}", e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    with_env_overrides(config)
}

/// Apply environment variable overrides (KUBECTL_MARIMO_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(super) fn apply_overrides(
    mut config: Config,
    var: impl Fn(&str) -> Option<String>,
) -> Config {
    // KUBECTL_MARIMO_NAMESPACE
    if let Some(ns) = var("KUBECTL_MARIMO_NAMESPACE").filter(|v| !v.is_empty()) {
        config.defaults.namespace = ns;
    }

    // KUBECTL_MARIMO_KUBECTL
    if let Some(binary) = var("KUBECTL_MARIMO_KUBECTL").filter(|v| !v.is_empty()) {
        config.kubectl.binary = binary;
    }

    // KUBECTL_MARIMO_NOTEBOOK_DIR
    if let Some(dir) = var("KUBECTL_MARIMO_NOTEBOOK_DIR").filter(|v| !v.is_empty()) {
        config.paths.notebook_dir = dir;
    }

    // KUBECTL_MARIMO_READY_TIMEOUT (seconds)
    if let Some(timeout) = var("KUBECTL_MARIMO_READY_TIMEOUT") {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => config.kubectl.ready_timeout_secs = secs,
            Err(_) => warn!(value = %timeout, "ignoring invalid KUBECTL_MARIMO_READY_TIMEOUT"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "defaults",
        "namespace",
        "port",
        "storage",
        "image",
        "paths",
        "notebook_dir",
        "mounts_dir",
        "kubectl",
        "binary",
        "container",
        "ready_timeout_secs",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, edit_distance(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

/// Levenshtein distance over chars, single-row.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ac != *bc);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}
