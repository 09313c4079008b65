/*!
 * Depth-bounded folder enumeration
 */

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::paths::dedup_refs;
use crate::types::FolderRef;
use crate::utils::{cmp_ignore_case, join_relative, relative_path, should_ignore_dir};

/// Lists the folders an operator can pick from
#[derive(Debug, Clone)]
pub struct FolderEnumerator {
    /// Scan root
    root: PathBuf,
}

impl FolderEnumerator {
    /// Create an enumerator for the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// List folders under `base_folder` (the root when empty) down to
    /// `max_depth` levels, the base itself included at depth 0.
    ///
    /// Folders that have at least one subfolder within `max_depth` levels of
    /// themselves are listed twice, plain and with `include_subfolders`.
    /// Ignored and hidden folders are skipped together with their contents.
    pub fn list_folders(&self, max_depth: usize, base_folder: &str) -> Result<Vec<FolderRef>> {
        let base = join_relative(&self.root, base_folder);

        let mut folders = Vec::new();
        for entry in WalkDir::new(&base)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_listable)
        {
            let entry = entry?;
            if entry.file_type().is_dir() {
                folders.push((relative_path(&self.root, entry.path()), entry.into_path()));
            }
        }
        folders.sort_by(|a, b| cmp_ignore_case(&a.0, &b.0));

        let mut refs = Vec::with_capacity(folders.len() * 2);
        for (rel, abs) in folders {
            let expandable = has_subfolders(&abs, max_depth)?;
            refs.push(FolderRef {
                path: rel.clone(),
                include_subfolders: false,
            });
            if expandable {
                refs.push(FolderRef {
                    path: rel,
                    include_subfolders: true,
                });
            }
        }

        debug!(
            base = %base.display(),
            max_depth,
            count = refs.len(),
            "Listed folders"
        );
        Ok(refs)
    }

    /// Candidate folders for exclusion given the included selection.
    ///
    /// Plain selections offer only themselves; subtree selections also offer
    /// every folder listed beneath them within `max_depth`.
    pub fn exclusion_candidates(
        &self,
        selected: &[FolderRef],
        max_depth: usize,
    ) -> Result<Vec<FolderRef>> {
        let mut candidates = Vec::new();
        for folder in selected {
            candidates.push(folder.clone());
            if folder.include_subfolders {
                candidates.extend(self.list_folders(max_depth, &folder.path)?);
            }
        }
        Ok(dedup_refs(candidates))
    }
}

/// Walk filter shared by folder listing: the walk start is always kept,
/// below it only visible, non-ignored directories are entered.
pub(crate) fn is_listable(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir() && !name.starts_with('.') && !should_ignore_dir(&name)
}

/// Whether `dir` has a listable subfolder at relative depth `1..=max_depth`
fn has_subfolders(dir: &Path, max_depth: usize) -> Result<bool> {
    if max_depth == 0 {
        return Ok(false);
    }
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(is_listable)
    {
        if entry?.file_type().is_dir() {
            return Ok(true);
        }
    }
    Ok(false)
}
