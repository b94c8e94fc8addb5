//! Tool configuration. Defaults match the built-in thresholds; a repo can
//! override them with an optional `.gitscope.json` at its root. A missing
//! or malformed file falls back to defaults, never fails a report.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::git_ops::DEFAULT_GIT_TIMEOUT_SECS;

pub const CONFIG_FILE: &str = ".gitscope.json";

/// Directory-layout conventions used by the test-coverage-gap heuristic.
/// A module directly under a source root with no same-named module under
/// any test root is reported as a gap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Conventions {
    pub source_roots: Vec<String>,
    pub test_roots: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            source_roots: vec!["src".to_string()],
            test_roots: vec!["tests".to_string(), "test".to_string()],
        }
    }
}

impl Conventions {
    pub fn primary_source_root(&self) -> &str {
        self.source_roots.first().map(String::as_str).unwrap_or("src")
    }

    pub fn primary_test_root(&self) -> &str {
        self.test_roots.first().map(String::as_str).unwrap_or("tests")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Files above this many lines count as "large".
    pub size_threshold: usize,
    /// Files touched at least this often within the risk commit window
    /// count as "high churn".
    pub churn_threshold: usize,
    /// Commit window for the risk scan's churn table.
    pub risk_commit_window: usize,
    /// Upper bound on any single git invocation, in seconds.
    pub git_timeout_secs: u64,
    pub conventions: Conventions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size_threshold: 200,
            churn_threshold: 5,
            risk_commit_window: 50,
            git_timeout_secs: DEFAULT_GIT_TIMEOUT_SECS,
            conventions: Conventions::default(),
        }
    }
}

impl Config {
    /// Loads `.gitscope.json` from the repo root when present.
    pub fn load(repo_root: &Path) -> Self {
        let path = repo_root.join(CONFIG_FILE);
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }
        }
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }
}
