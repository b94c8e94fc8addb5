//! Code map: a bounded directory tree with entry-point and config
//! markers. Pure string formatting over a read-only listing.

use std::path::Path;

use crate::util::{repo_name, resolve_root};

const IGNORED_DIRS: &[&str] = &[
    ".git",
    ".venv",
    "venv",
    "env",
    "__pycache__",
    "node_modules",
    ".idea",
    ".vscode",
    "dist",
    "build",
    "coverage",
    "target",
];

const ENTRY_POINTS: &[&str] = &[
    "main.py",
    "app.py",
    "server.py",
    "wsgi.py",
    "manage.py",
    "index.js",
    "server.js",
    "main.rs",
    "main.go",
    "Program.cs",
];

const CONFIG_FILES: &[&str] = &[
    "pyproject.toml",
    "requirements.txt",
    "package.json",
    "Dockerfile",
    "docker-compose.yml",
    "setup.py",
    "Cargo.toml",
    "go.mod",
];

fn marker_for(name: &str) -> &'static str {
    if ENTRY_POINTS.contains(&name) {
        " [ENTRY POINT]"
    } else if CONFIG_FILES.contains(&name) {
        " [CONFIG]"
    } else {
        ""
    }
}

/// Renders one directory level; returns false once the item cap is hit
/// so callers stop descending. Exactly one truncation marker is emitted.
fn generate_tree(
    dir: &Path,
    prefix: &str,
    limit: usize,
    count: &mut usize,
    out: &mut Vec<String>,
) -> bool {
    let Ok(read) = std::fs::read_dir(dir) else {
        return true;
    };

    let mut items: Vec<(bool, String)> = read
        .filter_map(|e| e.ok())
        .map(|e| (e.path().is_dir(), e.file_name().to_string_lossy().to_string()))
        .filter(|(is_dir, name)| {
            !(*is_dir && IGNORED_DIRS.contains(&name.as_str())) && !name.starts_with('.')
        })
        .collect();
    // Directories first, then case-insensitive by name.
    items.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.to_lowercase().cmp(&b.1.to_lowercase())));

    for (i, (is_dir, name)) in items.iter().enumerate() {
        if *count >= limit {
            out.push(format!("{}... (remaining files truncated)", prefix));
            return false;
        }

        let is_last = i == items.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        out.push(format!("{}{}{}{}", prefix, connector, name, marker_for(name)));
        *count += 1;

        if *is_dir {
            let extension = if is_last { "    " } else { "│   " };
            let child_prefix = format!("{}{}", prefix, extension);
            if !generate_tree(&dir.join(name), &child_prefix, limit, count, out) {
                return false;
            }
        }
    }

    true
}

/// Structural map of the repository at `repo_path`, capped at `top` items.
pub fn report(repo_path: &Path, top: usize) -> String {
    let root = match resolve_root(repo_path) {
        Ok(root) => root,
        Err(error_line) => return error_line,
    };

    let mut tree = Vec::new();
    let mut count = 0;
    generate_tree(&root, "", top, &mut count, &mut tree);

    let mut report = vec![
        "=== PROJECT CODE MAP ===".to_string(),
        format!("Root: {}", repo_name(&root)),
        String::new(),
        "Directory Structure:".to_string(),
    ];
    report.extend(tree);
    report.join("\n")
}
