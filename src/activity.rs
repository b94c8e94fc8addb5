//! Recent activity: hot files and the latest commits over a bounded
//! commit window.

use std::collections::HashMap;
use std::path::Path;

use crate::churn::touched_files;
use crate::config::Config;
use crate::git_ops::GitClient;
use crate::util::{repo_name, resolve_root};

const HOT_FILES_LIMIT: usize = 5;
const LOG_FORMAT: &str = "%h|%an|%ar|%s";

/// One parsed commit line. Ordering is whatever the log returned
/// (newest first); never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub short_hash: String,
    pub author: String,
    pub relative_time: String,
    pub subject: String,
}

/// Parses `%h|%an|%ar|%s` lines, skipping malformed ones. The subject is
/// the remainder of the line, so embedded pipes survive.
pub fn parse_commits(raw: &str) -> Vec<CommitRecord> {
    raw.lines()
        .filter_map(|line| {
            let mut parts = line.splitn(4, '|');
            Some(CommitRecord {
                short_hash: parts.next()?.to_string(),
                author: parts.next()?.to_string(),
                relative_time: parts.next()?.to_string(),
                subject: parts.next()?.to_string(),
            })
        })
        .collect()
}

/// Occurrence counts in first-seen order, sorted by count descending.
/// The stable sort keeps first-seen order for equal counts.
pub fn hot_files(touched: &[String]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for path in touched {
        let entry = counts.entry(path.as_str()).or_insert(0);
        if *entry == 0 {
            order.push(path.as_str());
        }
        *entry += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|path| (path.to_string(), counts[path]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Recent activity report over the last `n` commits.
pub fn report(repo_path: &Path, n: usize) -> String {
    let root = match resolve_root(repo_path) {
        Ok(root) => root,
        Err(error_line) => return error_line,
    };
    let config = Config::load(&root);
    let git = GitClient::with_timeout(&root, config.git_timeout());
    let window = n.max(1).to_string();

    let format_arg = format!("--pretty=format:{}", LOG_FORMAT);
    let commits_raw = git.run(&["log", "-n", &window, &format_arg]).text();
    let commits = parse_commits(&commits_raw);

    let files_raw = git
        .run(&["log", "-n", &window, "--name-only", "--format="])
        .text();
    let hot = hot_files(&touched_files(&files_raw));

    let mut report = vec![
        format!("=== RECENT ACTIVITY REPORT (Last {} commits) ===", n),
        format!("Repo: {}", repo_name(&root)),
        String::new(),
    ];

    if !hot.is_empty() {
        report.push(format!("Top Modified Files (Last {} commits):", n));
        for (path, count) in hot.iter().take(HOT_FILES_LIMIT) {
            report.push(format!("  - {} ({} changes)", path, count));
        }
        report.push(String::new());
    }

    if !commits.is_empty() {
        report.push("Recent Commits:".to_string());
        for commit in &commits {
            report.push(format!(
                "  * {} ({}) {}: {}",
                commit.short_hash, commit.relative_time, commit.author, commit.subject
            ));
        }
    }

    report.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::init_test_repo;

    #[test]
    fn test_parse_commits_keeps_log_order() {
        let raw = "abc123|Ada|2 hours ago|Fix parser\ndef456|Grace|3 days ago|Add scanner";
        let commits = parse_commits(raw);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].short_hash, "abc123");
        assert_eq!(commits[0].author, "Ada");
        assert_eq!(commits[1].subject, "Add scanner");
    }

    #[test]
    fn test_parse_commits_skips_malformed_lines() {
        let raw = "abc123|Ada|2 hours ago|ok\nnot a commit line\nonly|two|fields";
        let commits = parse_commits(raw);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].subject, "ok");
    }

    #[test]
    fn test_parse_commits_preserves_pipes_in_subject() {
        let raw = "abc123|Ada|now|feat: a | b | c";
        let commits = parse_commits(raw);
        assert_eq!(commits[0].subject, "feat: a | b | c");
    }

    #[test]
    fn test_hot_files_rank_by_count_then_first_seen() {
        let touched: Vec<String> = ["b.py", "a.py", "b.py", "c.py", "a.py", "b.py"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let ranked = hot_files(&touched);
        assert_eq!(ranked[0], ("b.py".to_string(), 3));
        assert_eq!(ranked[1], ("a.py".to_string(), 2));
        assert_eq!(ranked[2], ("c.py".to_string(), 1));
    }

    #[test]
    fn test_hot_files_ties_keep_first_seen_order() {
        let touched: Vec<String> = ["z.py", "a.py"].iter().map(|s| s.to_string()).collect();
        let ranked = hot_files(&touched);
        assert_eq!(ranked[0].0, "z.py");
        assert_eq!(ranked[1].0, "a.py");
    }

    #[test]
    fn test_report_on_fresh_repo() {
        let dir = tempfile::tempdir().unwrap();
        init_test_repo(dir.path());

        let report = report(dir.path(), 20);
        assert!(report.contains("=== RECENT ACTIVITY REPORT (Last 20 commits) ==="));
        assert!(report.contains("Recent Commits:"));
        assert!(report.contains("Initial commit"));
        assert!(report.contains("main.py"));
    }

    #[test]
    fn test_missing_path_short_circuits() {
        let report = report(Path::new("/definitely/not/here"), 20);
        assert!(report.starts_with("ERROR: Path '"));
    }
}
