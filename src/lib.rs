//! unclutter - a one-shot folder sorting utility
//!
//! This library recursively classifies files in a directory tree by
//! extension, moves them into category folders under the tree root, unpacks
//! archives into folders of their own, transliterates Cyrillic filenames,
//! and writes a log of everything it did. Subdirectories are walked
//! concurrently and removed once emptied.

pub mod archive;
pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_processor;
pub mod output;
pub mod report;
pub mod transliterate;
pub mod walker;

pub use config::{ConfigError, SortConfig};
pub use file_category::{Category, ExtensionTable, Resolution};
pub use file_processor::{SortError, SortResult};
pub use report::{Action, Outcome, SortReport};
pub use transliterate::Transliterator;
pub use walker::{SortContext, create_category_folders, walk};

pub use cli::{Cli, run_cli};
