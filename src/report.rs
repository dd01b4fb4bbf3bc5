//! Run report: observed extensions and per-category outcome records.
//!
//! One `SortReport` is shared (behind a mutex) by every walker task for the
//! duration of a run and rendered into `logs.txt` at the end. Records are
//! append-only; ordering within a category reflects each writer's order,
//! not a global timeline.

use crate::file_category::Category;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem action taken for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The file was moved to its destination.
    Moved,
    /// The archive was unpacked into a destination folder and removed.
    Unpacked,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Moved => "MOVED TO",
            Action::Unpacked => "UNPACKED TO",
        }
    }
}

/// A single completed sort operation.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The original path of the file.
    pub source: PathBuf,
    /// Where it ended up (a file for moves, a folder for unpacks).
    pub destination: PathBuf,
    /// What was done.
    pub action: Action,
}

/// Accumulates everything worth reporting about a sort run.
#[derive(Debug, Default)]
pub struct SortReport {
    found_extensions: BTreeSet<String>,
    unknown_extensions: BTreeSet<String>,
    outcomes: HashMap<Category, Vec<Outcome>>,
}

impl SortReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a resolved extension (already uppercased by the resolver).
    pub fn record_found_extension(&mut self, extension: &str) {
        self.found_extensions.insert(extension.to_string());
    }

    /// Records an unrecognized extension suffix. Dotless names have no
    /// suffix and record nothing.
    pub fn record_unknown_extension(&mut self, suffix: &str) {
        if !suffix.is_empty() {
            self.unknown_extensions.insert(suffix.to_string());
        }
    }

    /// Appends a completed operation to the given category's log.
    pub fn record_outcome(&mut self, category: Category, outcome: Outcome) {
        self.outcomes.entry(category).or_default().push(outcome);
    }

    /// Returns the distinct resolved extensions seen this run.
    pub fn found_extensions(&self) -> &BTreeSet<String> {
        &self.found_extensions
    }

    /// Returns the distinct unresolved extension strings seen this run.
    pub fn unknown_extensions(&self) -> &BTreeSet<String> {
        &self.unknown_extensions
    }

    /// Returns the outcomes recorded for one category.
    pub fn outcomes_for(&self, category: Category) -> &[Outcome] {
        self.outcomes
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of files moved or unpacked.
    pub fn total_sorted(&self) -> usize {
        self.outcomes.values().map(Vec::len).sum()
    }

    /// Per-category sorted-file counts, in log order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.outcomes_for(category).len()))
            .collect()
    }

    /// Renders the three log sections: resolved extensions, unresolved
    /// extensions, and the per-category outcome records.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let found: Vec<&str> = self.found_extensions.iter().map(String::as_str).collect();
        let unknown: Vec<&str> = self.unknown_extensions.iter().map(String::as_str).collect();
        let _ = writeln!(out, "Extensions found: {}", found.join(", "));
        let _ = writeln!(out, "Unknown extensions: {}", unknown.join(", "));
        let _ = writeln!(out, "Files sorted:");
        for category in Category::ALL {
            let _ = writeln!(out, "\t{}:", category.dir_name());
            for outcome in self.outcomes_for(category) {
                let _ = writeln!(
                    out,
                    "\t\t'{}' {} '{}'",
                    outcome.source.display(),
                    outcome.action.label(),
                    outcome.destination.display()
                );
            }
        }
        out
    }

    /// Writes `logs.txt` directly under the sort root and returns its path.
    pub fn write_log(&self, root: &Path) -> io::Result<PathBuf> {
        let log_path = root.join("logs.txt");
        fs::write(&log_path, self.render())?;
        Ok(log_path)
    }
}
