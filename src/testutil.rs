//! Shared test fixtures: scratch git repositories built with the real
//! git binary, mirroring what the tools run against in production.

use std::path::Path;
use std::process::Command;

pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .status()
        .expect("git must be available in the test environment");
    assert!(status.success(), "git {:?} failed in {}", args, dir.display());
}

/// Initializes a repository with two files and one commit:
/// `main.py` (one line) and `utils.py` carrying a TODO marker.
pub fn init_test_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "user.email", "test@bot.com"]);
    git(dir, &["config", "user.name", "Test Bot"]);

    std::fs::write(dir.join("main.py"), "print('Hello World')\n").unwrap();
    std::fs::write(
        dir.join("utils.py"),
        "# TODO: Refactor this\ndef util(): pass\n",
    )
    .unwrap();

    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", "Initial commit"]);
}
