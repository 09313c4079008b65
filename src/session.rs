/*!
 * Operator session
 *
 * Drives the prompts that capture an operator's choices and feeds them to the
 * enumeration, resolution, filtering and export steps. Prompting goes through
 * the [`Prompter`] trait so the flow can run against scripted answers.
 */

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, MultiSelect, Select};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::config::{
    discover_filters, export_path, filter_config_path, load_filter, save_filter, AppState,
    Config, DEFAULT_NAME,
};
use crate::enumerator::FolderEnumerator;
use crate::error::Result;
use crate::filter::{available_file_types, filter_files, FileFilter};
use crate::report::ExportReport;
use crate::resolver::resolve;
use crate::tree::render_tree;
use crate::types::{FilterCriteria, FolderRef};
use crate::writer::ExportWriter;

/// Operations offered at the start of an interactive run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Operation {
    /// Select folders and export their contents
    #[strum(to_string = "Export contents")]
    Export,
    /// Remove generated export and filter files
    #[strum(to_string = "Delete export and config files")]
    Clean,
}

/// Source of operator answers
pub trait Prompter {
    /// Pick one item
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Pick any number of items
    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> Result<Vec<usize>>;

    /// Answer yes or no
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Enter free text; blank answers are allowed
    fn input(&mut self, prompt: &str, default: &str) -> Result<String>;
}

/// Terminal prompts backed by dialoguer
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> Result<Vec<usize>> {
        Ok(MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .defaults(defaults)
            .interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn input(&mut self, prompt: &str, default: &str) -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()?)
    }
}

/// How an export session ended
#[derive(Debug)]
pub enum ExportOutcome {
    /// The export file was written
    Exported(ExportReport),
    /// The operator stopped, declined the export or nothing was selected
    Stopped,
}

/// One interactive run
pub struct Session<P: Prompter> {
    prompter: P,
    /// Where the last used root is remembered, if anywhere
    state_file: Option<PathBuf>,
}

impl<P: Prompter> Session<P> {
    /// Create a session that remembers the chosen root in `state_file`
    pub fn new(prompter: P, state_file: Option<PathBuf>) -> Self {
        Self {
            prompter,
            state_file,
        }
    }

    /// Ask which operation to run
    pub fn choose_operation(&mut self) -> Result<Operation> {
        let operations: Vec<Operation> = Operation::iter().collect();
        let labels: Vec<String> = operations.iter().map(ToString::to_string).collect();
        let index = self.prompter.select("Select operation:", &labels, 0)?;
        Ok(operations[index.min(operations.len() - 1)])
    }

    /// Ask for the root directory and remember it
    pub fn prompt_root(&mut self, prompt: &str, default: &Path) -> Result<PathBuf> {
        let answer = self
            .prompter
            .input(prompt, &default.display().to_string())?;
        let root = PathBuf::from(answer.trim());
        crate::ensure!(
            root.is_dir(),
            PathNotFound,
            "Root directory not found: {}",
            root.display()
        );

        if let Some(path) = &self.state_file {
            AppState {
                root_dir: root.clone(),
            }
            .save_to(path)?;
        }
        Ok(root)
    }

    /// Run the interactive export flow
    pub fn run_export(&mut self, config: &Config) -> Result<ExportOutcome> {
        let root = self.prompt_root("Root directory:", &config.root_dir)?;
        let seed = self.seed_criteria(config, &root)?;

        let depth_answer = self
            .prompter
            .input("Folder depth to display:", &config.depth.to_string())?;
        let depth: usize = depth_answer.trim().parse().map_err(|_| {
            crate::error!(InvalidArgument, "Folder depth must be a number: '{}'", depth_answer)
        })?;

        let enumerator = FolderEnumerator::new(&root);

        // Included folders
        let choices = enumerator.list_folders(depth, "")?;
        let selected = self.pick_folders(
            "Select folders to include:",
            &choices,
            &seed.include_folders,
        )?;
        if selected.is_empty() {
            println!("No folders selected.");
            return Ok(ExportOutcome::Stopped);
        }

        // Excluded folders
        let candidates = enumerator.exclusion_candidates(&selected, depth)?;
        let excluded = self.pick_folders(
            "Select folders to exclude:",
            &candidates,
            &seed.exclude_folders,
        )?;

        let folders = resolve(&root, &selected, &excluded)?;
        println!("\nFolders to be processed:");
        for folder in &folders {
            println!("• {}", if folder.is_empty() { "." } else { folder });
        }
        println!("\nTotal folders to process: {}", folders.len());
        if !self.prompter.confirm("Continue with these folders?", true)? {
            println!("Process cancelled");
            return Ok(ExportOutcome::Stopped);
        }

        // File types offered are those present before name filtering
        let unfiltered = FileFilter::default().filter(&root, &selected, &excluded)?;
        if unfiltered.is_empty() {
            println!("No files found in the selected folders.");
            return Ok(ExportOutcome::Stopped);
        }
        let types = available_file_types(&unfiltered);
        let type_defaults: Vec<bool> = types.iter().map(|t| seed.file_types.contains(t)).collect();
        let file_types: Vec<String> = if types.is_empty() {
            Vec::new()
        } else {
            self.prompter
                .multi_select("Select file types:", &types, &type_defaults)?
                .into_iter()
                .filter_map(|i| types.get(i).cloned())
                .collect()
        };

        let include_pattern = self.prompter.input(
            "Enter a regex pattern to include files (leave blank to skip):",
            seed.include_pattern().unwrap_or_default(),
        )?;
        let exclude_pattern = self.prompter.input(
            "Enter a regex pattern to exclude files (leave blank to skip):",
            seed.exclude_pattern().unwrap_or_default(),
        )?;

        let criteria = FilterCriteria {
            include_folders: selected,
            exclude_folders: excluded,
            file_types,
            include_pattern: Some(include_pattern),
            exclude_pattern: Some(exclude_pattern),
        };
        // Reject bad patterns before anything is saved
        let filter = FileFilter::from_criteria(&criteria)?;

        if self.prompter.confirm("Save configuration?", true)? {
            let name = self.prompter.input("Configuration name:", DEFAULT_NAME)?;
            let dir = self
                .prompter
                .input("Config path:", &root.display().to_string())?;
            let path = filter_config_path(Path::new(dir.trim()), name.trim());
            save_filter(&path, &criteria)?;
            println!("Configuration saved to {}", path.display());
        }

        let files = filter.filter(&root, &criteria.include_folders, &criteria.exclude_folders)?;
        let tree = render_tree(&files, "");
        println!("\nFiltered files:");
        println!("{}", tree);
        if files.is_empty() {
            println!("No files match the filters.");
            return Ok(ExportOutcome::Stopped);
        }

        if !self.prompter.confirm("Export file contents?", true)? {
            return Ok(ExportOutcome::Stopped);
        }
        let name = self
            .prompter
            .input("Export file name:", &config.export_name)?;
        let dir = self
            .prompter
            .input("Export path:", &config.output_dir.display().to_string())?;
        let include_tree = self
            .prompter
            .confirm("Include folder tree in export?", config.include_tree)?;

        let output = export_path(Path::new(dir.trim()), name.trim());
        let report = ExportWriter::new(&root, include_tree)
            .with_progress(export_progress())
            .write_to_file(&output, &files, &tree)?;
        println!("File contents exported to {}", output.display());

        Ok(ExportOutcome::Exported(report))
    }

    /// Ask which generated files under `root` to delete and delete them
    pub fn run_clean(&mut self, root: &Path) -> Result<usize> {
        let artifacts = crate::cleanup::find_artifacts(root)?;
        if artifacts.is_empty() {
            println!("No export or config files found in the specified directory.");
            return Ok(0);
        }

        let labels: Vec<String> = artifacts.iter().map(|p| p.display().to_string()).collect();
        let chosen: Vec<PathBuf> = self
            .prompter
            .multi_select(
                "Select files to delete:",
                &labels,
                &vec![false; labels.len()],
            )?
            .into_iter()
            .filter_map(|i| artifacts.get(i).cloned())
            .collect();
        if chosen.is_empty() {
            println!("No files selected for deletion.");
            return Ok(0);
        }

        crate::cleanup::delete_artifacts(&chosen)?;
        for path in &chosen {
            println!("Deleted: {}", path.display());
        }
        Ok(chosen.len())
    }

    /// Filter configuration whose choices pre-fill the prompts
    fn seed_criteria(&mut self, config: &Config, root: &Path) -> Result<FilterCriteria> {
        if let Some(path) = &config.filter_file {
            return load_filter(path);
        }

        let found = discover_filters(root)?;
        if found.is_empty() || !self.prompter.confirm("Use existing filter?", false)? {
            return Ok(FilterCriteria::default());
        }

        let labels: Vec<String> = found.iter().map(|p| p.display().to_string()).collect();
        let index = self.prompter.select("Select a filter:", &labels, 0)?;
        let path = found
            .get(index)
            .ok_or_else(|| crate::error!(InvalidArgument, "No filter at index {}", index))?;
        debug!(path = %path.display(), "Seeding choices from filter");
        load_filter(path)
    }

    fn pick_folders(
        &mut self,
        prompt: &str,
        choices: &[FolderRef],
        preselected: &[FolderRef],
    ) -> Result<Vec<FolderRef>> {
        if choices.is_empty() {
            return Ok(Vec::new());
        }
        let labels: Vec<String> = choices.iter().map(ToString::to_string).collect();
        let defaults: Vec<bool> = choices.iter().map(|c| preselected.contains(c)).collect();
        Ok(self
            .prompter
            .multi_select(prompt, &labels, &defaults)?
            .into_iter()
            .filter_map(|i| choices.get(i).cloned())
            .collect())
    }
}

/// Export straight from a saved filter without prompting.
///
/// Returns `None` when the filter matches no files; nothing is written then.
pub fn export_from_filter(config: &Config) -> Result<Option<ExportReport>> {
    let path = config
        .filter_file
        .as_ref()
        .ok_or_else(|| crate::error!(InvalidArgument, "A filter config is required"))?;
    let criteria = load_filter(path)?;

    let files = filter_files(&config.root_dir, &criteria)?;
    if files.is_empty() {
        return Ok(None);
    }

    let tree = render_tree(&files, "");
    let report = ExportWriter::new(&config.root_dir, config.include_tree)
        .with_progress(export_progress())
        .write_to_file(&config.export_file(), &files, &tree)?;
    Ok(Some(report))
}

fn export_progress() -> indicatif::ProgressBar {
    let progress = indicatif::ProgressBar::new(0);
    if let Ok(style) = indicatif::ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
    {
        progress.set_style(style);
    }
    progress.set_prefix("📄 Exporting");
    progress
}
