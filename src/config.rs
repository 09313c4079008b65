/*!
 * Configuration handling for folderdump
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use glob_match::glob_match;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{FolderDumpError, Result};
use crate::types::{FilterCriteria, FolderRef};
use crate::utils::{normalize, should_ignore_dir, EXPORT_PREFIX, FILTER_CONFIG_PREFIX};

/// Default folder depth offered for selection
pub const DEFAULT_DEPTH: usize = 3;

/// Default name used for exports and saved filters
pub const DEFAULT_NAME: &str = "CUSTOM";

/// How deep below the root saved filters are looked up
const FILTER_DISCOVERY_DEPTH: usize = 3;

/// Command-line arguments for folderdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "folderdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Select folders and export a file tree plus file contents",
    long_about = "Interactively pick folders of a project, filter their files by type and name, and export a folder tree followed by the concatenated file contents to a single text file."
)]
pub struct Args {
    /// Operation to run (defaults to an interactive export)
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Operations offered by the command line
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Select folders and export their files
    Export(ExportArgs),

    /// List the folders offered for selection
    Folders {
        /// Root directory (defaults to the last used one)
        root: Option<String>,

        /// Folder depth to list
        #[clap(long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,
    },

    /// Delete previously generated export and filter files
    Clean {
        /// Root directory to search (defaults to the last used one)
        root: Option<String>,

        /// Delete every match without asking
        #[clap(long)]
        yes: bool,
    },
}

/// Options of the export operation
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Root directory (defaults to the last used one)
    pub root: Option<String>,

    /// Saved filter configuration to start from
    #[clap(long)]
    pub filter: Option<String>,

    /// Name used in files-contents-export-<NAME>.txt
    #[clap(long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Directory receiving the export (defaults to the root)
    #[clap(long)]
    pub output_dir: Option<String>,

    /// Leave the folder tree out of the export
    #[clap(long)]
    pub no_tree: bool,

    /// Folder depth offered for selection
    #[clap(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Export straight from --filter without prompting
    #[clap(long, requires = "filter")]
    pub yes: bool,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            root: None,
            filter: None,
            name: DEFAULT_NAME.to_string(),
            output_dir: None,
            no_tree: false,
            depth: DEFAULT_DEPTH,
            yes: false,
        }
    }
}

/// Export configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory whose folders are selected
    pub root_dir: PathBuf,

    /// Folder depth offered for selection
    pub depth: usize,

    /// Saved filter to start from
    pub filter_file: Option<PathBuf>,

    /// Name used for the export file
    pub export_name: String,

    /// Directory receiving the export file
    pub output_dir: PathBuf,

    /// Whether the folder tree heads the export
    pub include_tree: bool,

    /// Skip all prompts
    pub assume_yes: bool,
}

impl Config {
    /// Create configuration from export arguments and the remembered state
    pub fn from_args(args: ExportArgs, state: &AppState) -> Self {
        let root_dir = args
            .root
            .map(PathBuf::from)
            .unwrap_or_else(|| state.root_dir.clone());
        let output_dir = args
            .output_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| root_dir.clone());

        Self {
            root_dir,
            depth: args.depth,
            filter_file: args.filter.map(PathBuf::from),
            export_name: args.name,
            output_dir,
            include_tree: !args.no_tree,
            assume_yes: args.yes,
        }
    }

    /// Path of the export file this configuration writes
    pub fn export_file(&self) -> PathBuf {
        export_path(&self.output_dir, &self.export_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.root_dir.is_dir(),
            PathNotFound,
            "Root directory not found: {}",
            self.root_dir.display()
        );
        crate::ensure!(
            self.output_dir.is_dir(),
            PathNotFound,
            "Output directory not found: {}",
            self.output_dir.display()
        );
        if let Some(path) = &self.filter_file {
            crate::ensure!(
                path.is_file(),
                PathNotFound,
                "Filter config not found: {}",
                path.display()
            );
        }
        crate::ensure!(
            !self.export_name.is_empty() && !self.export_name.contains(['/', '\\']),
            InvalidArgument,
            "Export name must be a plain file name: '{}'",
            self.export_name
        );
        Ok(())
    }
}

/// State remembered between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Root directory used last
    pub root_dir: PathBuf,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            root_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl AppState {
    /// Location of the state file in the user configuration directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folderdump").join("state.json"))
    }

    /// Load the remembered state, falling back to the current directory
    pub fn load() -> Self {
        Self::default_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load the state stored at `path`, falling back to the current directory
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Persist the state at `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Path of the export file named `name` in `dir`
pub fn export_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}{}.txt", EXPORT_PREFIX, name))
}

/// Path of the saved filter named `name` in `dir`
pub fn filter_config_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}{}.json", FILTER_CONFIG_PREFIX, name))
}

/// Load a saved filter configuration.
///
/// Any failure is reported as `ConfigRead`; there is no fallback to defaults.
pub fn load_filter(path: &Path) -> Result<FilterCriteria> {
    let text = fs::read_to_string(path).map_err(|e| FolderDumpError::config_read(path, e))?;
    let mut criteria: FilterCriteria =
        serde_json::from_str(&text).map_err(|e| FolderDumpError::config_read(path, e))?;

    let canonical = |refs: Vec<FolderRef>| {
        refs.into_iter()
            .map(|r| FolderRef {
                path: normalize(&r.path),
                include_subfolders: r.include_subfolders,
            })
            .collect()
    };
    criteria.include_folders = canonical(criteria.include_folders);
    criteria.exclude_folders = canonical(criteria.exclude_folders);

    debug!(path = %path.display(), "Loaded filter config");
    Ok(criteria)
}

/// Write a filter configuration as two-space indented JSON
pub fn save_filter(path: &Path, criteria: &FilterCriteria) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(criteria)?)?;
    info!(path = %path.display(), "Saved filter config");
    Ok(())
}

/// Saved filter configurations up to three levels below `root`, sorted
pub fn discover_filters(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}*.json", FILTER_CONFIG_PREFIX);
    let mut found = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(FILTER_DISCOVERY_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir() && should_ignore_dir(&e.file_name().to_string_lossy()))
        })
    {
        let entry = entry?;
        if entry.file_type().is_file()
            && glob_match(&pattern, &entry.file_name().to_string_lossy())
        {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}
