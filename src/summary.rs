//! Work summary: what changed over a time window, which modules absorbed
//! the work, and a bounded scan for debt markers (TODO / FIXME).

use std::collections::HashSet;
use std::path::Path;

use chrono::{Duration, Utc};
use regex::Regex;

use crate::activity::hot_files;
use crate::churn::touched_files;
use crate::config::Config;
use crate::git_ops::{GitClient, GitOutcome};
use crate::util::{repo_name, resolve_root, truncate};

const MODULES_LIMIT: usize = 5;
const DEBT_ITEMS_LIMIT: usize = 10;
const DEBT_CONTENT_MAX: usize = 60;

/// One `file:line:content` match from the debt-marker search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtMarker {
    pub file: String,
    pub line: usize,
    pub content: String,
}

/// Converts shorthand like `24h`, `7d`, `2w`, `3m` into an absolute
/// cutoff git understands; anything else passes through verbatim.
pub fn since_cutoff(since: &str) -> String {
    let shorthand = Regex::new(r"^(\d+)([hdwm])$").expect("static pattern");
    let Some(caps) = shorthand.captures(since.trim()) else {
        return since.to_string();
    };
    let Ok(amount) = caps[1].parse::<i64>() else {
        return since.to_string();
    };

    let span = match &caps[2] {
        "h" => Duration::hours(amount),
        "d" => Duration::days(amount),
        "w" => Duration::weeks(amount),
        "m" => Duration::days(amount * 30),
        _ => return since.to_string(),
    };
    (Utc::now() - span).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Immediate containing directory of each touched path; paths at the top
/// level fall into the `Root` bucket.
pub fn module_of(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => "Root".to_string(),
    }
}

/// Parses `git grep -n` output lines, skipping anything that does not
/// split into file, numeric line, and content.
pub fn parse_debt_markers(raw: &str) -> Vec<DebtMarker> {
    raw.lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, ':');
            let file = parts.next()?.to_string();
            let line_number = parts.next()?.parse().ok()?;
            let content = parts.next()?.trim().to_string();
            Some(DebtMarker {
                file,
                line: line_number,
                content: truncate(&content, DEBT_CONTENT_MAX),
            })
        })
        .collect()
}

fn render_debt_section(report: &mut Vec<String>, outcome: GitOutcome) {
    report.push(String::new());
    report.push("Technical Debt Scan (TODOs / FIXMEs):".to_string());

    match outcome {
        GitOutcome::Success(raw) => {
            let markers = parse_debt_markers(&raw);
            if markers.is_empty() {
                report.push("  Great job! No TODOs or FIXMEs found in the code.".to_string());
                return;
            }
            report.push(format!("  Found {} items. Top critical items:", markers.len()));
            for marker in markers.iter().take(DEBT_ITEMS_LIMIT) {
                report.push(format!(
                    "    [Line {}] {}: {}",
                    marker.line, marker.file, marker.content
                ));
            }
            if markers.len() > DEBT_ITEMS_LIMIT {
                report.push(format!(
                    "    ... and {} more.",
                    markers.len() - DEBT_ITEMS_LIMIT
                ));
            }
        }
        GitOutcome::NoMatches => {
            report.push("  Great job! No TODOs or FIXMEs found in the code.".to_string());
        }
        GitOutcome::Failed(failure) => {
            tracing::warn!(%failure, "debt marker scan failed");
            report.push("  (Could not scan for TODOs - binary repo or grep error)".to_string());
        }
    }
}

/// Work summary report for the window `since` (e.g. `7d`).
pub fn report(repo_path: &Path, since: &str) -> String {
    let root = match resolve_root(repo_path) {
        Ok(root) => root,
        Err(error_line) => return error_line,
    };
    let config = Config::load(&root);
    let git = GitClient::with_timeout(&root, config.git_timeout());

    let cutoff = since_cutoff(since);
    let since_arg = format!("--since={}", cutoff);
    let files_raw = git
        .run(&["log", &since_arg, "--name-only", "--format="])
        .text();
    let files = touched_files(&files_raw);
    let unique_files: HashSet<&String> = files.iter().collect();

    let mut report = vec![
        format!("=== WORK SUMMARY (Since: {}) ===", since),
        format!("Repo: {}", repo_name(&root)),
        String::new(),
        "Activity Overview:".to_string(),
        format!("  - Total files touched: {}", unique_files.len()),
    ];

    if files.is_empty() {
        report.push("  - No activity recorded in this period.".to_string());
    } else {
        let modules: Vec<String> = files.iter().map(|f| module_of(f)).collect();
        report.push("  - Most Active Modules/Folders:".to_string());
        for (module, count) in hot_files(&modules).iter().take(MODULES_LIMIT) {
            report.push(format!("    * {} ({} updates)", module, count));
        }
    }

    let debt = git.run_search(&["grep", "-I", "-n", "-E", "TODO|FIXME"]);
    render_debt_section(&mut report, debt);

    report.join("\n")
}
