//! Project status: branch, working-tree state, sync with origin, and a
//! bounded listing of uncommitted changes.

use std::path::Path;

use crate::config::Config;
use crate::git_ops::{GitClient, GitOutcome};
use crate::util::{repo_name, resolve_root};

/// Cap on rendered change entries.
const CHANGES_LIMIT: usize = 20;

/// One `XY path` entry from porcelain status output.
fn parse_porcelain_line(line: &str) -> Option<(String, String)> {
    if line.len() <= 3 {
        return None;
    }
    let code = line.get(..2)?;
    let name = line.get(3..)?;
    Some((code.to_string(), name.to_string()))
}

fn parse_sync_counts(raw: &str) -> Option<(usize, usize)> {
    let mut parts = raw.split_whitespace();
    let behind = parts.next()?.parse().ok()?;
    let ahead = parts.next()?.parse().ok()?;
    Some((behind, ahead))
}

fn has_origin(remotes: &str) -> bool {
    remotes.lines().any(|remote| remote.trim() == "origin")
}

/// Git context report for the repository at `repo_path`.
pub fn report(repo_path: &Path) -> String {
    let root = match resolve_root(repo_path) {
        Ok(root) => root,
        Err(error_line) => return error_line,
    };
    let config = Config::load(&root);
    let git = GitClient::with_timeout(&root, config.git_timeout());

    let branch = match git.run(&["branch", "--show-current"]) {
        GitOutcome::Success(branch) if !branch.is_empty() => branch,
        _ => "DETACHED_HEAD".to_string(),
    };

    let status_raw = git.run(&["status", "--porcelain"]).text();
    let changes: Vec<(String, String)> = status_raw
        .lines()
        .filter_map(parse_porcelain_line)
        .collect();
    let dirty = !status_raw.trim().is_empty();

    // Sync check only when an origin remote exists; a missing or
    // unreachable remote degrades to no sync line.
    let mut ahead = 0;
    let mut behind = 0;
    if has_origin(&git.run(&["remote"]).text()) {
        let sync_raw = git
            .run(&["rev-list", "--left-right", "--count", "origin/main...HEAD"])
            .text();
        if let Some((b, a)) = parse_sync_counts(&sync_raw) {
            behind = b;
            ahead = a;
        }
    }

    let mut report = vec![
        "=== GIT CONTEXT REPORT ===".to_string(),
        format!("Repo: {}", repo_name(&root)),
        format!("Path: {}", root.display()),
        format!("Branch: {}", branch),
        format!(
            "State: {}",
            if dirty { "DIRTY (Unsaved changes)" } else { "CLEAN" }
        ),
    ];

    if ahead > 0 || behind > 0 {
        report.push(format!(
            "Sync: +{} (ahead) / -{} (behind) origin/main",
            ahead, behind
        ));
    }

    if !changes.is_empty() {
        report.push(String::new());
        report.push("Changes:".to_string());
        for (code, name) in changes.iter().take(CHANGES_LIMIT) {
            report.push(format!("  [{}] {}", code, name));
        }
    }

    report.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::init_test_repo;

    #[test]
    fn test_porcelain_parse() {
        assert_eq!(
            parse_porcelain_line(" M main.py"),
            Some((" M".to_string(), "main.py".to_string()))
        );
        assert_eq!(
            parse_porcelain_line("?? new_file.txt"),
            Some(("??".to_string(), "new_file.txt".to_string()))
        );
        assert_eq!(parse_porcelain_line(""), None);
        assert_eq!(parse_porcelain_line("M"), None);
    }

    #[test]
    fn test_sync_counts_parse() {
        assert_eq!(parse_sync_counts("3\t1"), Some((3, 1)));
        assert_eq!(parse_sync_counts(""), None);
        assert_eq!(parse_sync_counts("not numbers"), None);
    }

    #[test]
    fn test_origin_detection_is_exact() {
        assert!(has_origin("origin\nupstream"));
        assert!(!has_origin("origin2\nupstream"));
        assert!(!has_origin(""));
    }

    #[test]
    fn test_clean_repo_reports_clean() {
        let dir = tempfile::tempdir().unwrap();
        init_test_repo(dir.path());

        let report = report(dir.path());
        assert!(report.contains("=== GIT CONTEXT REPORT ==="));
        assert!(report.contains("State: CLEAN"));
    }

    #[test]
    fn test_status_is_idempotent_on_unchanged_repo() {
        let dir = tempfile::tempdir().unwrap();
        init_test_repo(dir.path());

        assert_eq!(report(dir.path()), report(dir.path()));
    }

    #[test]
    fn test_modified_file_flips_state_to_dirty() {
        let dir = tempfile::tempdir().unwrap();
        init_test_repo(dir.path());

        let clean = report(dir.path());
        std::fs::write(
            dir.path().join("main.py"),
            "print('Hello World')\nprint('changed')\n",
        )
        .unwrap();
        let dirty = report(dir.path());

        assert_ne!(clean, dirty);
        assert!(dirty.contains("State: DIRTY"));
        assert!(dirty.contains("main.py"));
    }

    #[test]
    fn test_untracked_file_is_listed() {
        let dir = tempfile::tempdir().unwrap();
        init_test_repo(dir.path());

        std::fs::write(dir.path().join("new_file.txt"), "hello").unwrap();
        let report = report(dir.path());

        assert!(report.contains("State: DIRTY"));
        assert!(report.contains("new_file.txt"));
    }

    #[test]
    fn test_missing_path_short_circuits() {
        let report = report(Path::new("/definitely/not/here"));
        assert!(report.starts_with("ERROR: Path '"));
    }
}
