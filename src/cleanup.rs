/*!
 * Discovery and removal of generated export and filter files
 */

use std::fs;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use tracing::info;
use walkdir::WalkDir;

use crate::error::Result;
use crate::utils::{should_ignore_dir, EXPORT_PREFIX, FILTER_CONFIG_PREFIX};

/// Whether a file name is one of our generated artifacts
pub fn is_artifact(file_name: &str) -> bool {
    glob_match(&format!("{}*.txt", EXPORT_PREFIX), file_name)
        || glob_match(&format!("{}*.json", FILTER_CONFIG_PREFIX), file_name)
}

/// Every export and filter file anywhere under `root`, sorted by path
pub fn find_artifacts(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir() && should_ignore_dir(&e.file_name().to_string_lossy()))
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_artifact(&entry.file_name().to_string_lossy()) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

/// Delete the given files, stopping at the first failure
pub fn delete_artifacts(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        fs::remove_file(path)?;
        info!(path = %path.display(), "Deleted");
    }
    Ok(())
}
