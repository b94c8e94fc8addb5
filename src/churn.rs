//! Churn aggregation: turns `git log --name-only --format=` output into
//! per-file change counts over a bounded commit window.

use std::collections::HashMap;

use crate::git_ops::{GitClient, GitOutcome};

fn normalize_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches("./").replace('\\', "/");
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed)
}

/// Every touched path across the window, in log order, one entry per
/// touched file per commit. Duplicates are the signal.
pub fn touched_files(raw: &str) -> Vec<String> {
    raw.lines().filter_map(normalize_path).collect()
}

/// Path -> occurrence count. Lookups for absent paths mean zero churn.
pub fn churn_table(raw: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for path in touched_files(raw) {
        *counts.entry(path).or_insert(0) += 1;
    }
    counts
}

/// Churn table over the `window` most recent commits. `Failed` is
/// surfaced so callers can tell "no churn" from "could not determine".
pub fn recent_churn(git: &GitClient, window: usize) -> GitOutcome {
    let window = window.max(1).to_string();
    git.run(&["log", "-n", &window, "--name-only", "--format="])
}
