/*!
 * File enumeration and multi-criterion filtering
 */

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use regex::Regex;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{FolderDumpError, Result};
use crate::paths::{exclusion_globs, is_excluded_by_glob};
use crate::types::{FilterCriteria, FolderRef};
use crate::utils::{
    base_name, cmp_ignore_case, extension_of, is_ignored_path, join_relative, relative_path,
    should_ignore_dir,
};

/// Compiled name and type criteria applied to candidate files
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// File names must match this, when set
    include: Option<Regex>,
    /// File names must not match this, when set
    exclude: Option<Regex>,
    /// Allowed lowercase extensions; empty allows all
    file_types: Vec<String>,
}

impl FileFilter {
    /// Compile a filter. Blank patterns count as unset.
    pub fn new(
        include_pattern: Option<&str>,
        exclude_pattern: Option<&str>,
        file_types: &[String],
    ) -> Result<Self> {
        Ok(Self {
            include: compile(include_pattern)?,
            exclude: compile(exclude_pattern)?,
            file_types: file_types.iter().map(|t| t.to_lowercase()).collect(),
        })
    }

    /// Compile the name and type criteria of a saved filter configuration
    pub fn from_criteria(criteria: &FilterCriteria) -> Result<Self> {
        Self::new(
            criteria.include_pattern(),
            criteria.exclude_pattern(),
            &criteria.file_types,
        )
    }

    /// Whether a file name passes the pattern and type criteria
    pub fn matches_name(&self, file_name: &str) -> bool {
        let include_ok = self.include.as_ref().map_or(true, |re| re.is_match(file_name));
        let exclude_ok = self.exclude.as_ref().map_or(true, |re| !re.is_match(file_name));
        let type_ok = self.file_types.is_empty()
            || self.file_types.contains(&extension_of(file_name));
        include_ok && exclude_ok && type_ok
    }

    /// List every file covered by `included`, drop files under an `excluded`
    /// folder glob and those failing the name criteria.
    ///
    /// The result holds root-relative paths, unique and sorted
    /// case-insensitively.
    pub fn filter(
        &self,
        root: &Path,
        included: &[FolderRef],
        excluded: &[FolderRef],
    ) -> Result<Vec<String>> {
        let candidates = collect_candidates(root, included)?;
        let globs = exclusion_globs(excluded);

        let mut files: Vec<String> = candidates
            .into_iter()
            .filter(|f| self.matches_name(base_name(f)))
            .filter(|f| !is_excluded_by_glob(f, &globs))
            .collect();
        files.sort_by(|a, b| cmp_ignore_case(a, b));

        debug!(
            included = included.len(),
            excluded = excluded.len(),
            matched = files.len(),
            "Filtered files"
        );
        Ok(files)
    }
}

/// Run a saved filter configuration against `root`
pub fn filter_files(root: &Path, criteria: &FilterCriteria) -> Result<Vec<String>> {
    FileFilter::from_criteria(criteria)?.filter(
        root,
        &criteria.include_folders,
        &criteria.exclude_folders,
    )
}

/// Distinct non-empty extensions of `files`, sorted
pub fn available_file_types(files: &[String]) -> Vec<String> {
    files
        .iter()
        .map(|f| extension_of(base_name(f)))
        .filter(|ext| !ext.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern.filter(|p| !p.is_empty()) {
        None => Ok(None),
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|source| FolderDumpError::Pattern {
                pattern: p.to_string(),
                source,
            }),
    }
}

/// Files directly inside plain references and anywhere below subtree
/// references, hidden files included, ignore list applied.
fn collect_candidates(root: &Path, included: &[FolderRef]) -> Result<HashSet<String>> {
    let mut files = HashSet::new();
    for folder in included {
        let base = join_relative(root, &folder.path);
        let mut walker = WalkDir::new(&base).min_depth(1);
        if !folder.include_subfolders {
            walker = walker.max_depth(1);
        }

        for entry in walker.into_iter().filter_entry(|e| !is_ignored_dir(e)) {
            let entry = entry?;
            if !is_file(&entry) {
                continue;
            }
            let rel = relative_path(root, entry.path());
            if !is_ignored_path(&rel, false) {
                files.insert(rel);
            }
        }
    }
    Ok(files)
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && should_ignore_dir(&entry.file_name().to_string_lossy())
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn setup(files: &[&str]) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for f in files {
            let path = dir.path().join(f);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, f).unwrap();
        }
        dir
    }

    fn no_criteria() -> FileFilter {
        FileFilter::new(None, None, &[]).unwrap()
    }

    #[test]
    fn test_glob_exclusion_beats_name_patterns() {
        let dir = setup(&["X/a.ts", "Y/a.ts"]);
        let filter = FileFilter::new(Some(r"a\.ts"), None, &[]).unwrap();
        let files = filter
            .filter(
                dir.path(),
                &[FolderRef::plain("X"), FolderRef::plain("Y")],
                &[FolderRef::subtree("X")],
            )
            .unwrap();
        assert_eq!(files, vec!["Y/a.ts"]);
    }

    #[test]
    fn test_glob_exclusion_keeps_dot_entries() {
        let dir = setup(&["X/a.ts", "X/.env", "X/.cfg/a.ts"]);
        let subtree = no_criteria()
            .filter(dir.path(), &[FolderRef::subtree("X")], &[FolderRef::subtree("X")])
            .unwrap();
        assert_eq!(subtree, vec!["X/.cfg/a.ts", "X/.env"]);

        let plain = no_criteria()
            .filter(dir.path(), &[FolderRef::subtree("X")], &[FolderRef::plain("X")])
            .unwrap();
        assert_eq!(plain, vec!["X/.cfg/a.ts", "X/.env"]);
    }

    #[test]
    fn test_file_types_match_case_insensitively() {
        let dir = setup(&["src/a.ts", "src/B.TS", "src/c.js", "src/README"]);
        let filter = FileFilter::new(None, None, &[".ts".to_string()]).unwrap();
        let files = filter
            .filter(dir.path(), &[FolderRef::plain("src")], &[])
            .unwrap();
        assert_eq!(files, vec!["src/a.ts", "src/B.TS"]);
    }

    #[test]
    fn test_plain_ref_does_not_descend() {
        let dir = setup(&["src/a.rs", "src/sub/b.rs"]);
        let plain = no_criteria()
            .filter(dir.path(), &[FolderRef::plain("src")], &[])
            .unwrap();
        assert_eq!(plain, vec!["src/a.rs"]);

        let subtree = no_criteria()
            .filter(dir.path(), &[FolderRef::subtree("src")], &[])
            .unwrap();
        assert_eq!(subtree, vec!["src/a.rs", "src/sub/b.rs"]);
    }

    #[test]
    fn test_hidden_included_ignored_skipped() {
        let dir = setup(&[
            ".env",
            "app/.eslintrc",
            "app/index.js",
            "app/node_modules/lib/index.js",
            "app/yarn.lock",
            "files-contents-export-CUSTOM.txt",
        ]);
        let files = no_criteria()
            .filter(dir.path(), &[FolderRef::subtree("")], &[])
            .unwrap();
        assert_eq!(files, vec![".env", "app/.eslintrc", "app/index.js"]);
    }

    #[test]
    fn test_include_and_exclude_patterns() {
        let dir = setup(&["src/user.service.ts", "src/user.spec.ts", "src/main.ts"]);
        let filter = FileFilter::new(Some("^user"), Some(r"\.spec\."), &[]).unwrap();
        let files = filter
            .filter(dir.path(), &[FolderRef::plain("src")], &[])
            .unwrap();
        assert_eq!(files, vec!["src/user.service.ts"]);
    }

    #[test]
    fn test_nested_refs_are_deduplicated() {
        let dir = setup(&["a/x.md", "a/b/y.md"]);
        let files = no_criteria()
            .filter(
                dir.path(),
                &[FolderRef::subtree("a"), FolderRef::plain("a/b")],
                &[],
            )
            .unwrap();
        assert_eq!(files, vec!["a/b/y.md", "a/x.md"]);
    }

    #[test]
    fn test_malformed_pattern_fails() {
        let err = FileFilter::new(Some("(unclosed"), None, &[]).unwrap_err();
        assert!(matches!(err, FolderDumpError::Pattern { .. }));

        let err = FileFilter::new(None, Some("[z-a]"), &[]).unwrap_err();
        assert!(matches!(err, FolderDumpError::Pattern { .. }));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let dir = setup(&["b/Z.txt", "b/a.txt", "A.txt", "c/d/e.txt"]);
        let criteria = FilterCriteria {
            include_folders: vec![FolderRef::subtree("")],
            ..Default::default()
        };
        let first = filter_files(dir.path(), &criteria).unwrap();
        let second = filter_files(dir.path(), &criteria).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["A.txt", "b/a.txt", "b/Z.txt", "c/d/e.txt"]);
    }

    #[test]
    fn test_available_file_types() {
        let files = vec![
            "a.TS".to_string(),
            "b.js".to_string(),
            "c.ts".to_string(),
            "Makefile".to_string(),
        ];
        assert_eq!(available_file_types(&files), vec![".js", ".ts"]);
    }
}
