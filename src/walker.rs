//! Concurrent tree traversal.
//!
//! Each directory is handled by one task: it spawns a scoped thread per
//! non-ignored subdirectory, sorts its own files sequentially, joins all
//! children, and finally removes itself if it ended up empty. The shared
//! `SortContext` carries the immutable configuration and the synchronized
//! report every task appends to.

use crate::file_category::{Category, ExtensionTable};
use crate::file_processor::{SortError, SortResult, process_file};
use crate::report::SortReport;
use crate::transliterate::Transliterator;
use indicatif::ProgressBar;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::thread;

/// Shared state for one sort run, passed by reference into every task.
///
/// Configuration (extension table, transliteration table, ignored folders)
/// is read-only during the walk; the report sits behind a mutex.
pub struct SortContext {
    base: PathBuf,
    table: ExtensionTable,
    transliterator: Transliterator,
    ignored: HashSet<PathBuf>,
    report: Mutex<SortReport>,
    progress: ProgressBar,
}

impl SortContext {
    /// Creates a context rooted at `base` with no visible progress output.
    pub fn new(base: PathBuf, table: ExtensionTable, ignored: HashSet<PathBuf>) -> Self {
        Self {
            base,
            table,
            transliterator: Transliterator::new(),
            ignored,
            report: Mutex::new(SortReport::new()),
            progress: ProgressBar::hidden(),
        }
    }

    /// Attaches a progress bar ticked once per sorted file.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// The sort root containing the category folders.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The extension table used for resolution.
    pub fn table(&self) -> &ExtensionTable {
        &self.table
    }

    /// The filename normalizer.
    pub fn transliterator(&self) -> &Transliterator {
        &self.transliterator
    }

    /// True for category destination folders, which are never walked.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignored.contains(path)
    }

    /// Runs `f` against the shared report. A poisoned lock still yields the
    /// report: a panicked writer only ever leaves it missing entries.
    pub fn with_report<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SortReport) -> R,
    {
        let mut report = self
            .report
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut report)
    }

    /// Advances the progress bar by one sorted file.
    pub fn tick(&self) {
        self.progress.inc(1);
    }

    /// Finishes the progress bar and takes the accumulated report.
    pub fn into_report(self) -> SortReport {
        self.progress.finish_and_clear();
        self.report
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pre-creates the category destination folders under the root and returns
/// them as the ignored-folder set for the walk.
///
/// Idempotent: folders that already exist are kept as-is. Must complete
/// before `walk` starts so already-sorted files are never revisited.
pub fn create_category_folders(root: &Path) -> SortResult<HashSet<PathBuf>> {
    let mut ignored = HashSet::new();
    for category in Category::ALL {
        let folder = root.join(category.dir_name());
        match fs::create_dir(&folder) {
            Ok(()) => {}
            // A pre-existing folder is fine; a file squatting on the name
            // is not.
            Err(e) if e.kind() == ErrorKind::AlreadyExists && folder.is_dir() => {}
            Err(e) => {
                return Err(SortError::DirectoryCreationFailed {
                    path: folder,
                    source: e,
                });
            }
        }
        ignored.insert(folder);
    }
    Ok(ignored)
}

/// Lists a directory's immediate children, split into subdirectories and
/// regular files. Entries that vanish mid-listing are skipped.
fn partition_children(dir: &Path) -> SortResult<(Vec<PathBuf>, Vec<PathBuf>)> {
    let entries = fs::read_dir(dir).map_err(|e| SortError::DirectoryReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut subdirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type() {
            if file_type.is_dir() {
                subdirs.push(entry.path());
            } else if file_type.is_file() {
                files.push(entry.path());
            }
        }
    }
    Ok((subdirs, files))
}

/// Recursively sorts a directory tree.
///
/// Spawns one scoped thread per non-ignored subdirectory, processes the
/// directory's own files on the calling thread, and joins every child
/// before returning. The first error (local or from a child) wins; children
/// are always joined regardless. After all descendant work settles, the
/// directory is removed if it is empty; that cleanup is best-effort and
/// failure to remove is ignored.
pub fn walk(ctx: &SortContext, dir: &Path) -> SortResult<()> {
    let (subdirs, files) = partition_children(dir)?;

    let result = thread::scope(|scope| {
        let mut handles = Vec::new();
        for subdir in &subdirs {
            if ctx.is_ignored(subdir) {
                continue;
            }
            handles.push(scope.spawn(move || walk(ctx, subdir)));
        }

        let mut outcome = Ok(());
        for file in &files {
            if outcome.is_ok() {
                outcome = process_file(ctx, file);
            }
        }

        for handle in handles {
            let child = handle.join().unwrap_or_else(|_| {
                Err(SortError::WalkerPanicked {
                    path: dir.to_path_buf(),
                })
            });
            if outcome.is_ok() {
                outcome = child;
            }
        }
        outcome
    });
    result?;

    // Best-effort cleanup of emptied directories.
    if let Ok(mut entries) = fs::read_dir(dir)
        && entries.next().is_none()
    {
        let _ = fs::remove_dir(dir);
    }

    Ok(())
}
