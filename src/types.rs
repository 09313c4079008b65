/*!
 * Core types and data structures for the folderdump application
 */

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A folder relative to the scan root, plus whether its whole subtree is in scope.
///
/// The path always uses `/` as separator and never carries a leading or trailing
/// separator. The scan root itself is the empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRef {
    /// Root-relative folder path
    pub path: String,
    /// Whether every descendant folder is included too
    pub include_subfolders: bool,
}

impl FolderRef {
    /// Reference a single folder without its descendants
    pub fn plain(path: impl Into<String>) -> Self {
        Self {
            path: crate::utils::normalize(&path.into()),
            include_subfolders: false,
        }
    }

    /// Reference a folder together with its whole subtree
    pub fn subtree(path: impl Into<String>) -> Self {
        Self {
            path: crate::utils::normalize(&path.into()),
            include_subfolders: true,
        }
    }

    /// Whether this reference points at the scan root
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for FolderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.is_root() { "." } else { &self.path };
        if self.include_subfolders {
            write!(f, "{} [+Subfolders]", path)
        } else {
            write!(f, "{}", path)
        }
    }
}

/// Persisted filter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Folders whose files are candidates
    pub include_folders: Vec<FolderRef>,
    /// Folders removed from the selection
    pub exclude_folders: Vec<FolderRef>,
    /// Lowercase extensions including the leading dot; empty means any
    pub file_types: Vec<String>,
    /// Regex a file name must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_pattern: Option<String>,
    /// Regex a file name must not match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_pattern: Option<String>,
}

impl FilterCriteria {
    /// Include pattern, treating a blank string as unset
    pub fn include_pattern(&self) -> Option<&str> {
        self.include_pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// Exclude pattern, treating a blank string as unset
    pub fn exclude_pattern(&self) -> Option<&str> {
        self.exclude_pattern.as_deref().filter(|p| !p.is_empty())
    }
}

/// A node of the rendered file tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Directory with its named children
    Dir(BTreeMap<String, TreeNode>),
    /// Terminal file entry
    File,
}

impl Default for TreeNode {
    fn default() -> Self {
        Self::Dir(BTreeMap::new())
    }
}
