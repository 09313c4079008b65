/*!
 * Tree rendering of a flat file list
 */

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::paths::is_under;
use crate::types::TreeNode;
use crate::utils::{cmp_ignore_case, normalize};

/// Ordering of sibling entries in the rendered tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Raw byte order of the names, uppercase before lowercase
    #[default]
    Raw,
    /// Case-insensitive order, the one folder and file lists use
    IgnoreCase,
}

impl SortOrder {
    fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Raw => a.cmp(b),
            Self::IgnoreCase => cmp_ignore_case(a, b),
        }
    }
}

impl TreeNode {
    /// Build a tree from `/` separated file paths, stripping `root` first.
    ///
    /// A file whose name is already taken by a directory leaves the directory
    /// in place; a path running through an existing file turns it into a
    /// directory.
    pub fn build<S: AsRef<str>>(files: &[S], root: &str) -> Self {
        let root = normalize(root);
        let mut children = BTreeMap::new();

        for file in files {
            let path = normalize(file.as_ref());
            let rel = if !root.is_empty() && is_under(&path, &root) {
                path[root.len()..].trim_start_matches('/')
            } else {
                path.as_str()
            };
            let parts: Vec<&str> = rel.split('/').filter(|p| !p.is_empty()).collect();
            insert(&mut children, &parts);
        }

        Self::Dir(children)
    }

    /// Render the tree with box-drawing connectors, siblings in raw name order
    pub fn render(&self) -> String {
        self.render_with(SortOrder::Raw)
    }

    /// Render the tree with an explicit sibling ordering.
    ///
    /// The output has no trailing newline; an empty tree renders as "".
    pub fn render_with(&self, order: SortOrder) -> String {
        let mut lines = Vec::new();
        if let Self::Dir(children) = self {
            render_children(children, "", order, &mut lines);
        }
        lines.join("\n")
    }
}

/// Build and render in one step
pub fn render_tree<S: AsRef<str>>(files: &[S], root: &str) -> String {
    TreeNode::build(files, root).render()
}

fn insert(children: &mut BTreeMap<String, TreeNode>, parts: &[&str]) {
    let Some((first, rest)) = parts.split_first() else {
        return;
    };
    if rest.is_empty() {
        children.entry(first.to_string()).or_insert(TreeNode::File);
        return;
    }

    let node = children
        .entry(first.to_string())
        .or_insert_with(TreeNode::default);
    if matches!(node, TreeNode::File) {
        *node = TreeNode::default();
    }
    if let TreeNode::Dir(grandchildren) = node {
        insert(grandchildren, rest);
    }
}

fn render_children(
    children: &BTreeMap<String, TreeNode>,
    prefix: &str,
    order: SortOrder,
    lines: &mut Vec<String>,
) {
    let mut names: Vec<&String> = children.keys().collect();
    names.sort_by(|a, b| order.compare(a, b));

    let last = names.len().saturating_sub(1);
    for (index, name) in names.into_iter().enumerate() {
        let is_last = index == last;
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, connector, name));

        if let Some(TreeNode::Dir(grandchildren)) = children.get(name) {
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            render_children(grandchildren, &child_prefix, order, lines);
        }
    }
}
