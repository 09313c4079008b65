/*!
 * Utility functions for folderdump
 */

use std::cmp::Ordering;
use std::path::{Component, Path};

use glob_match::glob_match;
use once_cell::sync::Lazy;

/// Prefix of generated export files
pub const EXPORT_PREFIX: &str = "files-contents-export-";

/// Prefix of saved filter configuration files
pub const FILTER_CONFIG_PREFIX: &str = "files-contents-config.";

/// Directory names never traversed, at any depth
pub static IGNORED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "node_modules",
        "tools",
        ".turbo",
        ".vite",
        "dist",
        "public",
        ".next",
        ".git",
    ]
});

/// File name globs never listed, at any depth
pub static IGNORED_FILES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "yarn.lock",
        ".env.local",
        "package-lock.json",
        "favicon.ico",
        ".gitignore",
        // Our own artifacts
        "files-contents-config.*.json",
        "files-contents.txt",
        "files-contents-export-*.txt",
    ]
});

/// Check if a directory name is on the ignore list
pub fn should_ignore_dir(name: &str) -> bool {
    IGNORED_DIRS.iter().any(|&d| d == name)
}

/// Check if a file name matches the ignore list
pub fn should_ignore_file(name: &str) -> bool {
    IGNORED_FILES.iter().any(|&p| glob_match(p, name))
}

/// Check a root-relative path against the ignore list.
///
/// Every directory segment is checked against [`IGNORED_DIRS`]; for files the
/// last segment is checked against [`IGNORED_FILES`] instead.
pub fn is_ignored_path(rel_path: &str, is_dir: bool) -> bool {
    let segments: Vec<&str> = rel_path.split('/').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };
    if parents.iter().any(|s| should_ignore_dir(s)) {
        return true;
    }
    if is_dir {
        should_ignore_dir(last)
    } else {
        should_ignore_file(last)
    }
}

/// Normalize a relative path to `/` separators with no leading `./`, no
/// leading or trailing separator and no empty segments.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `path` relative to `root`, using `/` separators
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a root-relative `/` path onto the filesystem root
pub fn join_relative(root: &Path, rel_path: &str) -> std::path::PathBuf {
    rel_path
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(root.to_path_buf(), |acc, s| acc.join(s))
}

/// Case-insensitive ordering, ties broken by the raw strings
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Lowercased extension of a file name including the dot.
///
/// Names without a dot, or whose only dot is the leading one (`.env`), have
/// no extension and yield an empty string.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(0) | None => String::new(),
        Some(pos) => file_name[pos..].to_lowercase(),
    }
}

/// Base name of a `/` separated path
pub fn base_name(rel_path: &str) -> &str {
    rel_path.rsplit('/').next().unwrap_or(rel_path)
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
