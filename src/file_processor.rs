//! Per-file sorting: destination planning and the move-or-unpack action.
//!
//! This module owns the crate's error type and the logic that takes one
//! discovered file from resolved extension to completed filesystem action,
//! recording the outcome in the shared report.

use crate::archive;
use crate::file_category::{Category, Resolution};
use crate::report::{Action, Outcome};
use crate::walker::SortContext;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Errors that can occur while sorting a tree.
#[derive(Debug)]
pub enum SortError {
    /// The supplied root is missing or not a directory.
    InvalidRoot { path: PathBuf },
    /// Failed to list a directory's children.
    DirectoryReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a category or unpack destination directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Failed to unpack an archive (corrupt, unreadable, or an unsupported
    /// format).
    ArchiveUnpackFailed { path: PathBuf, reason: String },
    /// Failed to delete an archive after unpacking it.
    FileRemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A subdirectory task panicked.
    WalkerPanicked { path: PathBuf },
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot { path } => {
                write!(
                    f,
                    "{} does not exist or is not a directory",
                    path.display()
                )
            }
            Self::DirectoryReadFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::ArchiveUnpackFailed { path, reason } => {
                write!(f, "Failed to unpack {}: {}", path.display(), reason)
            }
            Self::FileRemoveFailed { path, source } => {
                write!(
                    f,
                    "Failed to remove unpacked archive {}: {}",
                    path.display(),
                    source
                )
            }
            Self::WalkerPanicked { path } => {
                write!(f, "Walker task for {} panicked", path.display())
            }
        }
    }
}

impl std::error::Error for SortError {}

/// Result type for sort operations.
pub type SortResult<T> = Result<T, SortError>;

/// Computes a collision-free destination path inside a category folder.
///
/// Candidates are `<base>_<n>` for archives (they become folders, so no
/// extension) and `<base>_<n>.<EXT>` otherwise, with `n` starting at 1 and
/// incrementing until a non-existing name is found. The probe is not atomic
/// with respect to concurrent writers targeting the same folder; callers
/// retry when the action itself reports a conflict.
pub fn plan_destination(
    folder: &Path,
    base_name: &str,
    extension: &str,
    category: Category,
) -> PathBuf {
    let mut attempt: u32 = 1;
    loop {
        let candidate = if category == Category::Archive {
            format!("{base_name}_{attempt}")
        } else {
            format!("{base_name}_{attempt}.{extension}")
        };
        let destination = folder.join(candidate);
        if !destination.exists() {
            return destination;
        }
        attempt += 1;
    }
}

/// Sorts a single file: resolve its extension, then move it into its
/// category folder, or unpack it there if it is an archive.
///
/// Files with unrecognized extensions are recorded and left in place. A
/// destination that appears between the existence probe and the action
/// re-runs the disambiguation loop; any other filesystem failure propagates
/// to the walker.
pub fn process_file(ctx: &SortContext, path: &Path) -> SortResult<()> {
    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return Ok(());
    };

    let (extension, category) = match ctx.table().resolve(&file_name) {
        Resolution::Unknown { suffix } => {
            ctx.with_report(|report| report.record_unknown_extension(&suffix));
            return Ok(());
        }
        Resolution::Known {
            extension,
            category,
        } => {
            ctx.with_report(|report| report.record_found_extension(&extension));
            (extension, category)
        }
    };

    // Strip the matched extension's segments, then normalize what is left.
    let segments: Vec<&str> = file_name.split('.').collect();
    let extension_segments = extension.split('.').count();
    let base_name = segments[..segments.len() - extension_segments].join(".");
    let base_name = ctx.transliterator().normalize(&base_name);

    let folder = ctx.base().join(category.dir_name());

    loop {
        let destination = plan_destination(&folder, &base_name, &extension, category);

        if category == Category::Archive {
            match fs::create_dir(&destination) {
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(SortError::DirectoryCreationFailed {
                        path: destination,
                        source: e,
                    });
                }
                Ok(()) => {}
            }
            // A failed extraction must not leave the freshly created
            // destination folder (or a partial tree inside it) behind.
            if let Err(e) = archive::unpack(path, &destination) {
                let _ = fs::remove_dir_all(&destination);
                return Err(e);
            }
            fs::remove_file(path).map_err(|e| SortError::FileRemoveFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
            ctx.with_report(|report| {
                report.record_outcome(
                    category,
                    Outcome {
                        source: path.to_path_buf(),
                        destination: destination.clone(),
                        action: Action::Unpacked,
                    },
                );
            });
        } else {
            match fs::rename(path, &destination) {
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(SortError::FileMoveFailure {
                        source: path.to_path_buf(),
                        destination,
                        source_error: e,
                    });
                }
                Ok(()) => {}
            }
            ctx.with_report(|report| {
                report.record_outcome(
                    category,
                    Outcome {
                        source: path.to_path_buf(),
                        destination: destination.clone(),
                        action: Action::Moved,
                    },
                );
            });
        }

        ctx.tick();
        return Ok(());
    }
}
