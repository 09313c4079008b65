//! Folder reference algebra
//!
//! Two ways of asking "is this under an excluded folder" live here side by
//! side. Folder lists use segment-aware prefix containment
//! ([`is_excluded_by_prefix`]); file lists use glob matching against
//! `path/*` or `path/**/*` ([`is_excluded_by_glob`]). They agree for ordinary
//! names; folder names containing glob syntax and dot entries below an
//! excluded folder behave differently under the two.

use std::collections::HashSet;

use glob_match::glob_match;

use crate::types::FolderRef;
use crate::utils::cmp_ignore_case;

/// Whether `path` equals `prefix` or lies below it, comparing whole segments.
///
/// The empty prefix (the scan root) contains every path.
pub fn is_under(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Whether a folder path is removed by any excluded reference.
///
/// A plain reference removes only its exact path; a subtree reference removes
/// its path and every descendant.
pub fn is_excluded_by_prefix(folder: &str, excluded: &[FolderRef]) -> bool {
    excluded.iter().any(|e| {
        if e.include_subfolders {
            is_under(folder, &e.path)
        } else {
            folder == e.path
        }
    })
}

impl FolderRef {
    /// Glob selecting the files this reference covers
    pub fn glob(&self) -> String {
        let tail = if self.include_subfolders { "**/*" } else { "*" };
        if self.is_root() {
            tail.to_string()
        } else {
            format!("{}/{}", self.path, tail)
        }
    }
}

/// Globs contributed by a set of excluded references
pub fn exclusion_globs(excluded: &[FolderRef]) -> Vec<String> {
    excluded.iter().map(FolderRef::glob).collect()
}

/// Whether a root-relative file path matches any exclusion glob
pub fn is_excluded_by_glob(file: &str, globs: &[String]) -> bool {
    globs.iter().any(|g| matches_glob(g, file))
}

/// Match `path` against `pattern` one segment at a time.
///
/// Wildcards never match a segment starting with `.` unless the pattern
/// segment starts with `.` itself, and `**` does not descend into such
/// segments. A pattern segment with an unclosed `[` or `{` is compared
/// literally.
pub fn matches_glob(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let path: Vec<&str> = path.split('/').collect();
    match_segments(&pattern, &path)
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => {
            if match_segments(rest, path) {
                return true;
            }
            match path.split_first() {
                Some((segment, tail)) if !segment.starts_with('.') => {
                    match_segments(pattern, tail)
                }
                _ => false,
            }
        }
        Some((glob, rest)) => match path.split_first() {
            Some((segment, tail)) => {
                matches_segment(glob, segment) && match_segments(rest, tail)
            }
            None => false,
        },
    }
}

fn matches_segment(glob: &str, segment: &str) -> bool {
    if segment.starts_with('.') && !glob.starts_with('.') {
        return false;
    }
    if has_unclosed_group(glob) {
        return glob == segment;
    }
    glob_match(glob, segment)
}

fn has_unclosed_group(glob: &str) -> bool {
    glob.char_indices().any(|(i, c)| match c {
        '[' => !glob[i + 1..].contains(']'),
        '{' => !glob[i + 1..].contains('}'),
        _ => false,
    })
}

/// Remove duplicate references and sort them case-insensitively by path,
/// plain references before subtree references of the same folder.
pub fn dedup_refs(refs: impl IntoIterator<Item = FolderRef>) -> Vec<FolderRef> {
    let mut seen = HashSet::new();
    let mut unique: Vec<FolderRef> = refs
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect();
    unique.sort_by(|a, b| {
        cmp_ignore_case(&a.path, &b.path).then(a.include_subfolders.cmp(&b.include_subfolders))
    });
    unique
}
