//! History query adapter: every git invocation in the crate goes through
//! here. Interactive behavior is disabled (no pager, no terminal prompt,
//! no stdin wait) and every call is bounded by a timeout.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::util::run_command_with_timeout;

pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 30;

/// Outcome of a single git invocation. "Search found nothing" is a distinct
/// state from "the query failed", so callers can decide whether an empty
/// result means confirmed-zero or could-not-determine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOutcome {
    Success(String),
    NoMatches,
    Failed(GitFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitFailure {
    Spawn(String),
    NonZero { code: Option<i32>, stderr: String },
    TimedOut,
}

impl fmt::Display for GitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitFailure::Spawn(e) => write!(f, "could not run git: {}", e),
            GitFailure::NonZero { code, stderr } => {
                let stderr = stderr.trim();
                match code {
                    Some(code) if !stderr.is_empty() => {
                        write!(f, "git exited with status {}: {}", code, stderr)
                    }
                    Some(code) => write!(f, "git exited with status {}", code),
                    None => write!(f, "git terminated by signal"),
                }
            }
            GitFailure::TimedOut => write!(f, "git timed out"),
        }
    }
}

impl GitOutcome {
    /// Collapses the outcome to plain text, treating both `NoMatches` and
    /// `Failed` as "no data". For call sites that only degrade.
    pub fn text(self) -> String {
        match self {
            GitOutcome::Success(text) => text,
            GitOutcome::NoMatches | GitOutcome::Failed(_) => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitClient {
    repo_root: PathBuf,
    timeout: Duration,
}

impl GitClient {
    pub fn new(repo_root: &Path) -> Self {
        Self::with_timeout(repo_root, Duration::from_secs(DEFAULT_GIT_TIMEOUT_SECS))
    }

    pub fn with_timeout(repo_root: &Path, timeout: Duration) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            timeout,
        }
    }

    /// Runs a git query. Any non-zero exit is a failure.
    pub fn run(&self, args: &[&str]) -> GitOutcome {
        self.invoke(args, false)
    }

    /// Runs a search-style query (`git grep`): exit status 1 with empty
    /// output means "no matches", which is success-with-empty, not failure.
    pub fn run_search(&self, args: &[&str]) -> GitOutcome {
        self.invoke(args, true)
    }

    fn invoke(&self, args: &[&str], empty_is_no_matches: bool) -> GitOutcome {
        tracing::debug!(args = ?args, repo = %self.repo_root.display(), "running git");

        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.repo_root)
            .stdin(Stdio::null())
            .env("GIT_PAGER", "cat")
            .env("GIT_TERMINAL_PROMPT", "0");

        let result = match run_command_with_timeout(&mut command, self.timeout) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "git spawn failed");
                return GitOutcome::Failed(GitFailure::Spawn(e));
            }
        };

        if result.timed_out {
            tracing::warn!(args = ?args, "git timed out");
            return GitOutcome::Failed(GitFailure::TimedOut);
        }

        match result.status {
            // Trailing trim only: leading whitespace is significant in
            // porcelain status output.
            Some(status) if status.success() => {
                GitOutcome::Success(result.stdout.trim_end().to_string())
            }
            Some(status) => {
                let code = status.code();
                if empty_is_no_matches && code == Some(1) && result.stdout.trim().is_empty() {
                    return GitOutcome::NoMatches;
                }
                tracing::warn!(args = ?args, code = ?code, stderr = %result.stderr.trim(), "git failed");
                GitOutcome::Failed(GitFailure::NonZero {
                    code,
                    stderr: result.stderr,
                })
            }
            None => GitOutcome::Failed(GitFailure::NonZero {
                code: None,
                stderr: result.stderr,
            }),
        }
    }
}
