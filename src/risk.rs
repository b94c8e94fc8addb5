//! Risk ranker: joins the file scan (size) with the churn table (change
//! frequency) and classifies files into critical hotspots and large
//! monoliths. The only state is the inputs; identical scan + churn inputs
//! produce identical reports.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::churn::{churn_table, recent_churn};
use crate::config::{Config, Conventions};
use crate::git_ops::{GitClient, GitOutcome};
use crate::scan::{scan_repo, FileRecord};
use crate::util::{repo_name, resolve_root};

/// How many entries of each category make it into the report.
const RANK_LIMIT: usize = 5;

/// A file over both thresholds. `score` is only meaningful here; the
/// monolith set is never scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskEntry {
    pub path: String,
    pub lines: usize,
    pub churn: usize,
    pub score: usize,
}

/// A file over the size threshold but under the churn threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeFile {
    pub path: String,
    pub lines: usize,
}

#[derive(Debug, Default)]
pub struct RiskFindings {
    pub hotspots: Vec<RiskEntry>,
    pub monoliths: Vec<LargeFile>,
}

/// Classifies every scanned file against the churn table and ranks both
/// categories. Hotspots rank by `lines * churn` descending, monoliths by
/// `lines` descending; ties break by lexical path order so the report is
/// stable across file systems.
pub fn classify(
    records: &[FileRecord],
    churn: &HashMap<String, usize>,
    config: &Config,
) -> RiskFindings {
    let mut findings = RiskFindings::default();

    for record in records {
        let churn_count = churn.get(&record.path).copied().unwrap_or(0);
        if record.lines > config.size_threshold && churn_count >= config.churn_threshold {
            findings.hotspots.push(RiskEntry {
                path: record.path.clone(),
                lines: record.lines,
                churn: churn_count,
                score: record.lines * churn_count,
            });
        } else if record.lines > config.size_threshold {
            findings.monoliths.push(LargeFile {
                path: record.path.clone(),
                lines: record.lines,
            });
        }
    }

    findings
        .hotspots
        .sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
    findings
        .monoliths
        .sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.path.cmp(&b.path)));
    findings
}

/// Source modules with no same-named module under any test root, sorted.
/// Purely convention-driven; the roots come from configuration.
pub fn coverage_gaps(records: &[FileRecord], conventions: &Conventions) -> Vec<String> {
    let mut src_modules = BTreeSet::new();
    let mut test_modules = BTreeSet::new();

    for record in records {
        let parts: Vec<&str> = record.path.split('/').collect();
        let Some(first) = parts.first() else { continue };

        if conventions.test_roots.iter().any(|r| r == first) {
            if parts.len() > 1 {
                test_modules.insert(parts[1].to_string());
            }
        } else if conventions.source_roots.iter().any(|r| r == first) && parts.len() > 2 {
            src_modules.insert(parts[1].to_string());
        }
    }

    src_modules.difference(&test_modules).cloned().collect()
}

fn render(
    name: &str,
    findings: &RiskFindings,
    gaps: &[String],
    churn_available: bool,
    conventions: &Conventions,
) -> String {
    let mut report = vec![
        "=== RISK & HEALTH SCAN ===".to_string(),
        format!("Repo: {}", name),
    ];

    if findings.hotspots.is_empty() {
        report.push(String::new());
        report.push("✅ No critical hotspots detected (Architecture looks stable).".to_string());
    } else {
        report.push(String::new());
        report.push("🔥 CRITICAL HOTSPOTS (High Complexity + High Churn):".to_string());
        report.push("   (These files change often AND are large - likely source of bugs)".to_string());
        for entry in findings.hotspots.iter().take(RANK_LIMIT) {
            report.push(format!(
                "   - {} (LOC: {}, Changes: {})",
                entry.path, entry.lines, entry.churn
            ));
        }
    }

    if !findings.monoliths.is_empty() {
        report.push(String::new());
        report.push("🐘 Large Monoliths (Low Churn, but hard to read):".to_string());
        for entry in findings.monoliths.iter().take(RANK_LIMIT) {
            report.push(format!("   - {} ({} lines)", entry.path, entry.lines));
        }
    }

    report.push(String::new());
    report.push("🛡️ Test Coverage Gaps (Heuristic):".to_string());
    if gaps.is_empty() {
        report.push("   ✅ Project structure suggests good test alignment.".to_string());
    } else {
        let src_root = conventions.primary_source_root();
        let test_root = conventions.primary_test_root();
        report.push(format!(
            "   ⚠️ The following '{}' modules seem to miss a matching '{}' folder:",
            src_root, test_root
        ));
        for module in gaps {
            report.push(format!(
                "      - {}/{} -> {}/{} (?)",
                src_root, module, test_root, module
            ));
        }
    }

    if !churn_available {
        report.push(String::new());
        report.push(
            "⚠️ Churn history unavailable - hotspot detection degraded to size-only scan."
                .to_string(),
        );
    }

    report.join("\n")
}

/// Risk/health report for the repository at `repo_path`.
pub fn report(repo_path: &Path) -> String {
    let root = match resolve_root(repo_path) {
        Ok(root) => root,
        Err(error_line) => return error_line,
    };
    let config = Config::load(&root);
    let git = GitClient::with_timeout(&root, config.git_timeout());

    let records = scan_repo(&root);

    // A failed history query degrades to an all-zero churn table; the
    // report says so instead of passing it off as confirmed-zero churn.
    let (churn, churn_available) = match recent_churn(&git, config.risk_commit_window) {
        GitOutcome::Success(raw) => (churn_table(&raw), true),
        GitOutcome::NoMatches => (HashMap::new(), true),
        GitOutcome::Failed(failure) => {
            tracing::warn!(%failure, "churn query failed, scoring size only");
            (HashMap::new(), false)
        }
    };

    let findings = classify(&records, &churn, &config);
    let gaps = coverage_gaps(&records, &config.conventions);

    render(
        &repo_name(&root),
        &findings,
        &gaps,
        churn_available,
        &config.conventions,
    )
}
