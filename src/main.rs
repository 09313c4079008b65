/*!
 * Command-line interface for folderdump
 */

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use folderdump::cleanup::{delete_artifacts, find_artifacts};
use folderdump::config::{Args, Command, Config, ExportArgs};
use folderdump::report::{ReportFormat, Reporter};
use folderdump::session::{export_from_filter, ExportOutcome, Operation, Session, TerminalPrompter};
use folderdump::{AppState, FolderEnumerator, Result};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let state = AppState::load();
    let state_file = AppState::default_path();
    debug!(root = %state.root_dir.display(), "Loaded state");

    let command = match args.command {
        Some(command) => command,
        None => {
            let mut session = Session::new(TerminalPrompter, state_file.clone());
            match session.choose_operation()? {
                Operation::Export => Command::Export(ExportArgs::default()),
                Operation::Clean => Command::Clean {
                    root: None,
                    yes: false,
                },
            }
        }
    };

    match command {
        Command::Export(export_args) => {
            let config = Config::from_args(export_args, &state);
            if config.assume_yes {
                config.validate()?;
                return export_non_interactive(&config);
            }

            let mut session = Session::new(TerminalPrompter, state_file);
            if let ExportOutcome::Exported(report) = session.run_export(&config)? {
                Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
            }
            Ok(())
        }
        Command::Folders { root, depth } => {
            let root = root.map(PathBuf::from).unwrap_or(state.root_dir);
            list_folders(root, depth)
        }
        Command::Clean { root, yes } => {
            let mut session = Session::new(TerminalPrompter, state_file);
            let root = match root {
                Some(root) => PathBuf::from(root),
                None => session.prompt_root(
                    "Root directory to search for files to delete:",
                    &state.root_dir,
                )?,
            };

            if yes {
                let artifacts = find_artifacts(&root)?;
                delete_artifacts(&artifacts)?;
                for path in &artifacts {
                    println!("Deleted: {}", path.display());
                }
            } else {
                session.run_clean(&root)?;
            }
            Ok(())
        }
    }
}

fn export_non_interactive(config: &Config) -> Result<()> {
    match export_from_filter(config)? {
        Some(report) => {
            println!("File contents exported to {}", report.output_file);
            Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
        }
        None => println!("No files match the filter; nothing exported."),
    }
    Ok(())
}

fn list_folders(root: PathBuf, depth: usize) -> Result<()> {
    folderdump::ensure!(
        root.is_dir(),
        PathNotFound,
        "Root directory not found: {}",
        root.display()
    );
    for folder in FolderEnumerator::new(root).list_folders(depth, "")? {
        println!("{}", folder);
    }
    Ok(())
}
