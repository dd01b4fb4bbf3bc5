//! Command-line interface module for unclutter.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Run orchestration: root validation, category folder initialization,
//!   the concurrent walk, and log-file writing
//! - End-of-run reporting

use crate::config::SortConfig;
use crate::file_category::ExtensionTable;
use crate::file_processor::SortError;
use crate::output::OutputFormatter;
use crate::report::SortReport;
use crate::walker::{SortContext, create_category_folders, walk};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Sort a folder's contents into category subfolders.
#[derive(Debug, Parser)]
#[command(name = "unclutter", version, about)]
pub struct Cli {
    /// Source folder to sort
    #[arg(short, long)]
    pub source: PathBuf,

    /// Optional TOML file with extra extension mappings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Runs one sort over the given root directory.
///
/// Validates the root (no filesystem effects if it is not a directory),
/// initializes the category folders, walks the tree, and always writes
/// `logs.txt` under the root afterward: a failure during folder
/// initialization or the walk is reported but does not suppress the log of
/// the work that did complete.
///
/// # Examples
///
/// ```no_run
/// use unclutter::cli::run_cli;
/// use std::path::Path;
///
/// if let Err(e) = run_cli(Path::new("/path/to/folder"), None) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(source: &Path, config_path: Option<&Path>) -> Result<(), String> {
    if !source.is_dir() {
        return Err(SortError::InvalidRoot {
            path: source.to_path_buf(),
        }
        .to_string());
    }

    let config = SortConfig::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let mut table = ExtensionTable::new();
    config
        .apply(&mut table)
        .map_err(|e| format!("Error in configuration: {}", e))?;

    OutputFormatter::info(&format!("Sorting contents of: {}", source.display()));

    let (report, run_result) = match create_category_folders(source) {
        Ok(ignored) => {
            let ctx = SortContext::new(source.to_path_buf(), table, ignored)
                .with_progress(OutputFormatter::create_spinner());
            let result = walk(&ctx, source);
            (ctx.into_report(), result)
        }
        Err(e) => (SortReport::new(), Err(e)),
    };

    if let Err(e) = run_result {
        OutputFormatter::error(&format!("Sorting stopped early: {}", e));
    }

    let log_path = report
        .write_log(source)
        .map_err(|e| format!("Failed to write log file: {}", e))?;

    OutputFormatter::summary_table(&report);
    OutputFormatter::success(&format!(
        "Finished at {}. See logs in '{}'",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        log_path.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_source_flag() {
        let cli = Cli::parse_from(["unclutter", "--source", "/tmp/tree"]);
        assert_eq!(cli.source, PathBuf::from("/tmp/tree"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parses_short_flags() {
        let cli = Cli::parse_from(["unclutter", "-s", "/tmp/tree", "-c", "rules.toml"]);
        assert_eq!(cli.source, PathBuf::from("/tmp/tree"));
        assert_eq!(cli.config, Some(PathBuf::from("rules.toml")));
    }

    #[test]
    fn test_run_cli_rejects_missing_root() {
        let result = run_cli(Path::new("/definitely/not/a/real/folder"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_cli_writes_log_when_folder_init_fails() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        // A file squatting on a category folder name aborts initialization.
        std::fs::write(root.join("images"), b"not a folder").expect("write failed");
        std::fs::write(root.join("song.mp3"), b"audio").expect("write failed");

        run_cli(root, None).expect("run failed");

        // The failure was reported, the log was still written, and the walk
        // never started.
        assert!(root.join("logs.txt").exists());
        assert!(root.join("song.mp3").exists());
    }
}
