/*!
 * Tests for the folder selection and export pipeline
 */

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::{tempdir, TempDir};

use crate::config::{filter_config_path, load_filter, save_filter};
use crate::enumerator::FolderEnumerator;
use crate::error::Result;
use crate::filter::{filter_files, FileFilter};
use crate::resolver::resolve;
use crate::tree::render_tree;
use crate::types::{FilterCriteria, FolderRef};
use crate::utils::{is_ignored_path, IGNORED_DIRS};
use crate::writer::ExportWriter;

fn write_file(root: &Path, rel: &str, content: &str) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    write!(file, "{}", content)?;
    Ok(())
}

// A small web project with the usual tooling noise
fn setup_project() -> Result<TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    write_file(root, "package.json", "{}")?;
    write_file(root, "package-lock.json", "{}")?;
    write_file(root, ".gitignore", "node_modules")?;
    write_file(root, "src/index.ts", "export * from './app';")?;
    write_file(root, "src/app/app.ts", "export class App {}")?;
    write_file(root, "src/app/app.spec.ts", "describe('App')")?;
    write_file(root, "src/app/app.css", ".app {}")?;
    write_file(root, "src/app/widgets/Button.TSX", "<button/>")?;
    write_file(root, "src/generated/api.ts", "// generated")?;
    write_file(root, "docs/README.md", "# Docs")?;
    write_file(root, "node_modules/react/index.js", "module.exports = {}")?;
    write_file(root, "dist/bundle.js", "!function(){}")?;
    write_file(root, ".git/HEAD", "ref: refs/heads/main")?;
    write_file(root, "public/favicon.ico", "")?;

    Ok(temp_dir)
}

#[test]
fn test_listing_respects_ignore_list_and_depth() -> Result<()> {
    let temp_dir = setup_project()?;
    let enumerator = FolderEnumerator::new(temp_dir.path());

    for max_depth in 0..4 {
        let refs = enumerator.list_folders(max_depth, "")?;
        for folder in &refs {
            assert!(!is_ignored_path(&folder.path, true), "ignored: {}", folder.path);
            let depth = folder.path.split('/').filter(|s| !s.is_empty()).count();
            assert!(depth <= max_depth, "{} deeper than {}", folder.path, max_depth);
        }
    }

    let all = enumerator.list_folders(10, "")?;
    for dir in IGNORED_DIRS.iter() {
        assert!(all.iter().all(|r| !r.path.split('/').any(|s| s == *dir)));
    }
    Ok(())
}

#[test]
fn test_subtree_choice_only_for_folders_with_subfolders() -> Result<()> {
    let temp_dir = setup_project()?;
    let refs = FolderEnumerator::new(temp_dir.path()).list_folders(3, "")?;

    let count = |path: &str| refs.iter().filter(|r| r.path == path).count();
    assert_eq!(count("src"), 2);
    assert_eq!(count("src/app"), 2);
    assert_eq!(count("src/app/widgets"), 1);
    assert_eq!(count("docs"), 1);
    assert!(refs.contains(&FolderRef::subtree("src")));
    assert!(!refs.contains(&FolderRef::subtree("docs")));
    Ok(())
}

#[test]
fn test_resolve_excludes_single_folder_from_subtree() -> Result<()> {
    let temp_dir = setup_project()?;
    let folders = resolve(
        temp_dir.path(),
        &[FolderRef::subtree("src")],
        &[FolderRef::plain("src/app")],
    )?;
    assert_eq!(folders, vec!["src", "src/app/widgets", "src/generated"]);
    Ok(())
}

#[test]
fn test_filter_by_type_pattern_and_folder() -> Result<()> {
    let temp_dir = setup_project()?;
    let filter = FileFilter::new(
        None,
        Some(r"\.spec\."),
        &[".ts".to_string(), ".tsx".to_string()],
    )?;
    let files = filter.filter(
        temp_dir.path(),
        &[FolderRef::subtree("src")],
        &[FolderRef::plain("src/generated")],
    )?;
    assert_eq!(
        files,
        vec!["src/app/app.ts", "src/app/widgets/Button.TSX", "src/index.ts"]
    );
    Ok(())
}

#[test]
fn test_root_selection_skips_tooling() -> Result<()> {
    let temp_dir = setup_project()?;
    let files = FileFilter::default().filter(temp_dir.path(), &[FolderRef::plain("")], &[])?;
    assert_eq!(files, vec!["package.json"]);
    Ok(())
}

#[test]
fn test_prefix_and_glob_exclusion_disagree_on_glob_syntax() -> Result<()> {
    let temp_dir = tempdir()?;
    write_file(temp_dir.path(), "lib[1]/a.ts", "a")?;
    write_file(temp_dir.path(), "lib1/b.ts", "b")?;

    let included = [FolderRef::plain("lib[1]"), FolderRef::plain("lib1")];
    let excluded = [FolderRef::subtree("lib[1]")];

    // Folder list: exact prefix containment removes lib[1]
    let folders = resolve(temp_dir.path(), &included, &excluded)?;
    assert_eq!(folders, vec!["lib1"]);

    // File list: "lib[1]/**/*" is a character class and matches lib1 instead
    let files = FileFilter::default().filter(temp_dir.path(), &included, &excluded)?;
    assert_eq!(files, vec!["lib[1]/a.ts"]);
    Ok(())
}

#[test]
fn test_unclosed_glob_syntax_still_excludes_files() -> Result<()> {
    let temp_dir = tempdir()?;
    for folder in ["a[", "a{b", "{"] {
        write_file(temp_dir.path(), &format!("{}/x.ts", folder), "x")?;
    }
    write_file(temp_dir.path(), "keep/y.ts", "y")?;

    let included = [FolderRef::subtree("")];
    let excluded = [
        FolderRef::subtree("a["),
        FolderRef::subtree("a{b"),
        FolderRef::plain("{"),
    ];
    let files = FileFilter::default().filter(temp_dir.path(), &included, &excluded)?;
    assert_eq!(files, vec!["keep/y.ts"]);
    Ok(())
}

#[test]
fn test_saved_filter_reproduces_export() -> Result<()> {
    let temp_dir = setup_project()?;
    let root = temp_dir.path();

    let criteria = FilterCriteria {
        include_folders: vec![FolderRef::subtree("src"), FolderRef::plain("docs")],
        exclude_folders: vec![FolderRef::subtree("src/app")],
        file_types: vec![".ts".to_string(), ".md".to_string()],
        include_pattern: None,
        exclude_pattern: Some("^api".to_string()),
    };
    let path = filter_config_path(root, "CUSTOM");
    save_filter(&path, &criteria)?;
    let loaded = load_filter(&path)?;

    let files = filter_files(root, &loaded)?;
    assert_eq!(files, vec!["docs/README.md", "src/index.ts"]);
    assert_eq!(files, filter_files(root, &loaded)?);

    let tree = render_tree(&files, "");
    assert_eq!(tree, "├── docs\n│   └── README.md\n└── src\n    └── index.ts");

    let mut out = Vec::new();
    ExportWriter::new(root, true).write(&mut out, &files, &tree)?;
    let text = String::from_utf8(out).expect("export is UTF-8");
    assert_eq!(
        text,
        format!(
            "====== Folder Tree ======\n\n{}\n\n====== File contents ======\n\n\
             \n====== docs/README.md ======\n\n# Docs\
             \n====== src/index.ts ======\n\nexport * from './app';",
            tree
        )
    );
    Ok(())
}

#[test]
fn test_sub_listing_feeds_exclusion_choices() -> Result<()> {
    let temp_dir = setup_project()?;
    let enumerator = FolderEnumerator::new(temp_dir.path());
    let candidates = enumerator.exclusion_candidates(&[FolderRef::subtree("src")], 1)?;
    assert_eq!(
        candidates,
        vec![
            FolderRef::plain("src"),
            FolderRef::subtree("src"),
            FolderRef::plain("src/app"),
            FolderRef::subtree("src/app"),
            FolderRef::plain("src/generated"),
        ]
    );
    Ok(())
}
