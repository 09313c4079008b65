/*!
 * folderdump - Export a folder tree and file contents of a selected subset of a project
 *
 * This library enumerates folders to depth, resolves include/exclude folder
 * selections, filters files by type and name, and renders the result as a
 * directory tree ahead of the concatenated file contents.
 */

pub mod cleanup;
pub mod config;
pub mod enumerator;
pub mod error;
pub mod filter;
pub mod paths;
pub mod report;
pub mod resolver;
pub mod session;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{AppState, Config};
pub use enumerator::FolderEnumerator;
pub use error::{FolderDumpError, Result};
pub use filter::{filter_files, FileFilter};
pub use report::{ExportReport, ReportFormat, Reporter};
pub use resolver::resolve;
pub use session::{ExportOutcome, Session, TerminalPrompter};
pub use tree::{render_tree, SortOrder};
pub use types::{FilterCriteria, FolderRef, TreeNode};
pub use writer::ExportWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
