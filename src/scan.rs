//! File metrics scanner: walks the repository tree and produces a line
//! count per eligible file. Read-only, never raises; anything unreadable
//! or binary contributes zero lines and is dropped from the output.

use std::path::Path;

use walkdir::WalkDir;

/// One scanned file. `path` is repo-relative with forward-slash separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub lines: usize,
}

/// Directories never descended into: VCS metadata, dependency trees,
/// build output, virtualenvs, caches.
const SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".venv",
    "venv",
    "env",
    "node_modules",
    "__pycache__",
    ".pytest_cache",
    "target",
    "vendor",
    "dist",
    "build",
    "migrations",
    "coverage",
    ".idea",
    ".vscode",
];

/// Extensions with no risk signal: data, lockfiles, images, markup.
const SKIP_EXTS: &[&str] = &[
    "json", "lock", "svg", "png", "jpg", "jpeg", "gif", "ico", "xml", "map",
];

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    SKIP_DIRS.contains(&name.as_ref()) || name.starts_with('.')
}

fn has_skipped_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SKIP_EXTS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Best-effort line count. Binary content (NUL sniff) and read errors
/// count as zero, which excludes the file from scan output.
fn count_lines(path: &Path) -> usize {
    let Ok(bytes) = std::fs::read(path) else {
        return 0;
    };
    if bytes.contains(&0) {
        return 0;
    }
    String::from_utf8_lossy(&bytes).lines().count()
}

/// Walks `root` and returns records for every eligible non-empty file,
/// in traversal encounter order.
pub fn scan_repo(root: &Path) -> Vec<FileRecord> {
    let mut records = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || has_skipped_ext(path) {
            continue;
        }

        let lines = count_lines(path);
        if lines == 0 {
            continue;
        }

        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        records.push(FileRecord {
            path: relative,
            lines,
        });
    }

    tracing::debug!(files = records.len(), root = %root.display(), "scan complete");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_counts_lines_and_relativizes_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/app.py"), "a\nb\nc\n").unwrap();

        let records = scan_repo(dir.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "src/app.py");
        assert_eq!(records[0].lines, 3);
    }

    #[test]
    fn test_last_line_without_newline_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "one\ntwo").unwrap();

        let records = scan_repo(dir.path());
        assert_eq!(records[0].lines, 2);
    }

    #[test]
    fn test_skips_ignored_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        std::fs::write(dir.path().join("node_modules/dep.js"), "x\n").unwrap();
        std::fs::write(dir.path().join("kept.js"), "x\n").unwrap();

        assert_eq!(paths(&scan_repo(dir.path())), vec!["kept.js"]);
    }

    #[test]
    fn test_skips_non_informative_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.json"), "{}\n").unwrap();
        std::fs::write(dir.path().join("pkg.lock"), "v1\n").unwrap();
        std::fs::write(dir.path().join("code.py"), "x\n").unwrap();

        assert_eq!(paths(&scan_repo(dir.path())), vec!["code.py"]);
    }

    #[test]
    fn test_empty_and_binary_files_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.py"), "").unwrap();
        std::fs::write(dir.path().join("blob.bin"), [0u8, 159, 146, 150]).unwrap();
        std::fs::write(dir.path().join("code.py"), "x\n").unwrap();

        assert_eq!(paths(&scan_repo(dir.path())), vec!["code.py"]);
    }
}
