//! Text search over tracked content via `git grep`, with smart case
//! handling and bounded output.

use std::path::Path;

use crate::config::Config;
use crate::git_ops::{GitClient, GitOutcome};
use crate::util::resolve_root;

const MAX_RESULT_LINES: usize = 300;

/// Case-insensitive only when the query has cased characters and none of
/// them are uppercase.
fn wants_case_insensitive(query: &str) -> bool {
    query.chars().any(|c| c.is_lowercase()) && !query.chars().any(|c| c.is_uppercase())
}

fn render_results(query: &str, output: &str) -> String {
    let lines: Vec<&str> = output.lines().collect();
    if lines.len() > MAX_RESULT_LINES {
        let preview = lines[..MAX_RESULT_LINES].join("\n");
        return format!(
            "Found many matches. Showing top results:\n\n{}\n\n... (Output truncated)",
            preview
        );
    }
    format!("=== SEARCH RESULTS FOR '{}' ===\n\n{}", query, output)
}

/// Searches tracked content for `query`, optionally restricted to a file
/// pattern such as `*.py` or `src/*.js`.
pub fn report(repo_path: &Path, query: &str, file_pattern: &str) -> String {
    let root = match resolve_root(repo_path) {
        Ok(root) => root,
        Err(error_line) => return error_line,
    };
    let config = Config::load(&root);
    let git = GitClient::with_timeout(&root, config.git_timeout());

    let mut args = vec!["grep", "-I", "-n", "--break", "--heading", "-C", "2"];
    if wants_case_insensitive(query) {
        args.push("-i");
    }
    args.push(query);
    if !file_pattern.is_empty() {
        args.push("--");
        args.push(file_pattern);
    }

    match git.run_search(&args) {
        GitOutcome::Success(output) if !output.is_empty() => render_results(query, &output),
        GitOutcome::Success(_) | GitOutcome::NoMatches => {
            format!("No matches found for '{}'.", query)
        }
        GitOutcome::Failed(failure) => format!("Search failed: {}", failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::init_test_repo;

    #[test]
    fn test_smart_case_detection() {
        assert!(wants_case_insensitive("hello"));
        assert!(!wants_case_insensitive("Hello"));
        assert!(!wants_case_insensitive("FIXME"));
        // no cased characters at all: leave matching exact
        assert!(!wants_case_insensitive("123"));
    }

    #[test]
    fn test_render_truncates_past_three_hundred_lines() {
        let output: String = (0..350).map(|i| format!("line {}\n", i)).collect();
        let rendered = render_results("q", output.trim_end());
        assert!(rendered.starts_with("Found many matches."));
        assert!(rendered.ends_with("... (Output truncated)"));
        assert!(rendered.contains("line 299"));
        assert!(!rendered.contains("line 300\n"));
    }

    #[test]
    fn test_search_finds_tracked_content() {
        let dir = tempfile::tempdir().unwrap();
        init_test_repo(dir.path());

        let report = report(dir.path(), "Hello", "");
        assert!(report.contains("=== SEARCH RESULTS FOR 'Hello' ==="));
        assert!(report.contains("main.py"));
    }

    #[test]
    fn test_search_without_matches_is_positive() {
        let dir = tempfile::tempdir().unwrap();
        init_test_repo(dir.path());

        let report = report(dir.path(), "NOT_IN_THE_REPO", "");
        assert_eq!(report, "No matches found for 'NOT_IN_THE_REPO'.");
    }

    #[test]
    fn test_search_with_file_pattern() {
        let dir = tempfile::tempdir().unwrap();
        init_test_repo(dir.path());

        let report = report(dir.path(), "TODO", "*.py");
        assert!(report.contains("utils.py"));

        let none = super::report(dir.path(), "TODO", "*.js");
        assert_eq!(none, "No matches found for 'TODO'.");
    }

    #[test]
    fn test_missing_path_short_circuits() {
        let report = report(Path::new("/definitely/not/here"), "q", "");
        assert!(report.starts_with("ERROR: Path '"));
    }
}
