/*!
 * Plain-text export writer
 */

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::ProgressBar;
use tracing::info;

use crate::error::Result;
use crate::report::{ExportReport, FileReportInfo};
use crate::utils::join_relative;

/// Section header preceding the folder tree
pub const TREE_HEADER: &str = "====== Folder Tree ======";

/// Section header preceding the file contents
pub const CONTENTS_HEADER: &str = "====== File contents ======";

/// Writes the folder tree and file contents of a selection
pub struct ExportWriter {
    /// Root the file paths are relative to
    root: PathBuf,
    /// Whether the tree section is written
    include_tree: bool,
    /// Progress bar advanced once per file
    progress: ProgressBar,
}

impl ExportWriter {
    /// Create a new export writer
    pub fn new(root: impl Into<PathBuf>, include_tree: bool) -> Self {
        Self {
            root: root.into(),
            include_tree,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on the given bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Create `output` and write the export into it
    pub fn write_to_file(
        &self,
        output: &Path,
        files: &[String],
        tree: &str,
    ) -> Result<ExportReport> {
        let start = Instant::now();
        let file = File::create(output)?;
        let mut writer = BufWriter::new(file);
        let file_details = self.write(&mut writer, files, tree)?;
        writer.flush()?;

        info!(path = %output.display(), files = files.len(), "Export written");
        Ok(ExportReport {
            output_file: output.display().to_string(),
            duration: start.elapsed(),
            tree_included: self.include_tree,
            file_details,
        })
    }

    /// Write the export to any sink, returning per-file statistics.
    ///
    /// Files are read in list order; the first unreadable file aborts the
    /// export. Invalid UTF-8 is replaced rather than rejected.
    pub fn write<W: Write>(
        &self,
        out: &mut W,
        files: &[String],
        tree: &str,
    ) -> Result<Vec<(String, FileReportInfo)>> {
        self.progress.set_length(files.len() as u64);

        if self.include_tree {
            write!(out, "{}\n\n{}\n\n", TREE_HEADER, tree)?;
        }
        write!(out, "{}\n\n", CONTENTS_HEADER)?;

        let mut details = Vec::with_capacity(files.len());
        for file in files {
            self.progress.set_message(file.clone());

            let bytes = fs::read(join_relative(&self.root, file))?;
            let content = String::from_utf8_lossy(&bytes);
            write!(out, "\n====== {} ======\n\n", file)?;
            out.write_all(content.as_bytes())?;

            details.push((
                file.clone(),
                FileReportInfo {
                    lines: content.lines().count(),
                    chars: content.chars().count(),
                    bytes: content.len() as u64,
                },
            ));
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_with_tree() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/b.txt"), "bee\n").unwrap();
        fs::write(dir.path().join("c.txt"), "sea").unwrap();

        let files = vec!["a/b.txt".to_string(), "c.txt".to_string()];
        let mut out = Vec::new();
        let details = ExportWriter::new(dir.path(), true)
            .write(&mut out, &files, "├── a\n│   └── b.txt\n└── c.txt")
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "====== Folder Tree ======\n\n├── a\n│   └── b.txt\n└── c.txt\n\n\
             ====== File contents ======\n\n\
             \n====== a/b.txt ======\n\nbee\n\
             \n====== c.txt ======\n\nsea"
        );
        assert_eq!(details[0].1.lines, 1);
        assert_eq!(details[1].1.chars, 3);
    }

    #[test]
    fn test_export_without_tree() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.md"), "# x").unwrap();

        let mut out = Vec::new();
        ExportWriter::new(dir.path(), false)
            .write(&mut out, &["x.md".to_string()], "└── x.md")
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("====== File contents ======\n\n"));
        assert!(!text.contains(TREE_HEADER));
    }

    #[test]
    fn test_missing_file_aborts() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let result = ExportWriter::new(dir.path(), true).write(&mut out, &["gone.txt".to_string()], "");
        assert!(matches!(result, Err(crate::error::FolderDumpError::Io(_))));
    }

    #[test]
    fn test_write_to_file_reports() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.txt"), "1\n2\n").unwrap();
        let output = dir.path().join("export.txt");

        let report = ExportWriter::new(dir.path(), true)
            .write_to_file(&output, &["one.txt".to_string()], "└── one.txt")
            .unwrap();

        assert!(output.exists());
        assert_eq!(report.files_written(), 1);
        assert_eq!(report.total_lines(), 2);
        assert!(fs::read_to_string(&output).unwrap().contains("====== one.txt ======"));
    }
}
