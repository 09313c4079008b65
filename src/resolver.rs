/*!
 * Resolution of include/exclude folder selections into concrete folders
 */

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::enumerator::is_listable;
use crate::error::Result;
use crate::paths::is_excluded_by_prefix;
use crate::types::FolderRef;
use crate::utils::{cmp_ignore_case, join_relative, relative_path};

/// Expand `included` into concrete folder paths and drop those removed by
/// `excluded` under prefix containment.
///
/// Subtree references contribute their folder and every descendant folder at
/// any depth. The result is de-duplicated and sorted case-insensitively.
pub fn resolve(
    root: &Path,
    included: &[FolderRef],
    excluded: &[FolderRef],
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    for folder in included {
        if !folder.include_subfolders {
            seen.insert(folder.path.clone());
            continue;
        }

        let base = join_relative(root, &folder.path);
        for entry in WalkDir::new(&base).into_iter().filter_entry(is_listable) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                seen.insert(relative_path(root, entry.path()));
            }
        }
    }

    let mut folders: Vec<String> = seen.into_iter().collect();
    folders.sort_by(|a, b| cmp_ignore_case(a, b));

    let total = folders.len();
    folders.retain(|f| !is_excluded_by_prefix(f, excluded));
    debug!(total, kept = folders.len(), "Resolved folder selection");

    Ok(folders)
}
