//! File categorization by filename extension.
//!
//! Maps extension strings (possibly multi-segment, like "TAR.GZ") to broad
//! categories, each with a dedicated destination folder under the sort root.
//!
//! # Examples
//!
//! ```
//! use unclutter::file_category::{Category, ExtensionTable, Resolution};
//!
//! let table = ExtensionTable::default();
//! assert_eq!(
//!     table.resolve("photo.jpg"),
//!     Resolution::Known {
//!         extension: "JPG".to_string(),
//!         category: Category::Image,
//!     }
//! );
//! ```

use std::collections::HashMap;

/// A broad file category with a dedicated destination folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Image files (PNG, JPG, SVG, etc.)
    Image,
    /// Video files (MP4, MKV, AVI, etc.)
    Video,
    /// Document files (PDF, DOCX, TXT, etc.)
    Document,
    /// Audio files (MP3, WAV, OGG, etc.)
    Audio,
    /// Archive files (ZIP, TAR.GZ, etc.), unpacked rather than moved.
    Archive,
}

impl Category {
    /// All categories, in the order they appear in the log file.
    pub const ALL: [Category; 5] = [
        Category::Image,
        Category::Video,
        Category::Document,
        Category::Audio,
        Category::Archive,
    ];

    /// Returns the destination folder name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use unclutter::file_category::Category;
    ///
    /// assert_eq!(Category::Image.dir_name(), "images");
    /// assert_eq!(Category::Archive.dir_name(), "archives");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Image => "images",
            Category::Video => "video",
            Category::Document => "documents",
            Category::Audio => "audio",
            Category::Archive => "archives",
        }
    }

    /// Parses a category from its folder name. Used by configuration files.
    pub fn from_dir_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.dir_name() == name)
    }
}

/// The outcome of resolving a filename against the extension table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A known extension was matched (the longest one wins).
    Known {
        /// The matched extension, uppercased, e.g. "JPG" or "TAR.GZ".
        extension: String,
        /// The category the extension maps to.
        category: Category,
    },
    /// No known extension matched; the file is left in place.
    Unknown {
        /// Everything after the first dot, verbatim. Empty for dotless names.
        suffix: String,
    },
}

/// Maps known file extensions to categories.
///
/// Keys are stored uppercased and may contain multiple dot-separated
/// segments, which is what lets compound archive suffixes like "TAR.GZ"
/// beat their shorter "GZ" substring during resolution. Immutable once the
/// walk begins.
#[derive(Debug, Clone)]
pub struct ExtensionTable {
    map: HashMap<String, Category>,
}

impl ExtensionTable {
    /// Creates a table with all standard extension mappings.
    pub fn new() -> Self {
        let mut table = Self {
            map: HashMap::new(),
        };
        table.populate_standard_mappings();
        table
    }

    fn populate_standard_mappings(&mut self) {
        // Image extensions
        self.add_mapping("jpeg", Category::Image);
        self.add_mapping("png", Category::Image);
        self.add_mapping("jpg", Category::Image);
        self.add_mapping("svg", Category::Image);
        self.add_mapping("bmp", Category::Image);

        // Video extensions
        self.add_mapping("avi", Category::Video);
        self.add_mapping("mp4", Category::Video);
        self.add_mapping("mov", Category::Video);
        self.add_mapping("mkv", Category::Video);

        // Document extensions
        self.add_mapping("doc", Category::Document);
        self.add_mapping("docx", Category::Document);
        self.add_mapping("txt", Category::Document);
        self.add_mapping("pdf", Category::Document);
        self.add_mapping("xlsx", Category::Document);
        self.add_mapping("pptx", Category::Document);

        // Audio extensions
        self.add_mapping("mp3", Category::Audio);
        self.add_mapping("ogg", Category::Audio);
        self.add_mapping("wav", Category::Audio);
        self.add_mapping("amr", Category::Audio);

        // Archive extensions, including compound tar suffixes
        self.add_mapping("zip", Category::Archive);
        self.add_mapping("gz", Category::Archive);
        self.add_mapping("tar", Category::Archive);
        self.add_mapping("tar.gz", Category::Archive);
        self.add_mapping("tar.xz", Category::Archive);
        self.add_mapping("tar.bz", Category::Archive);
    }

    /// Adds an extension to category mapping (case-insensitive).
    pub fn add_mapping(&mut self, extension: &str, category: Category) {
        self.map.insert(extension.to_uppercase(), category);
    }

    /// Looks up a single extension string (case-insensitive).
    pub fn category_for(&self, extension: &str) -> Option<Category> {
        self.map.get(&extension.to_uppercase()).copied()
    }

    /// Resolves the best-matching known extension for a filename.
    ///
    /// The filename is split on `.` and every suffix of segments is tried
    /// longest-first, so a compound suffix like "tar.gz" is preferred over
    /// its trailing "gz" segment. The first match wins and is returned
    /// uppercased.
    ///
    /// # Examples
    ///
    /// ```
    /// use unclutter::file_category::{Category, ExtensionTable, Resolution};
    ///
    /// let table = ExtensionTable::default();
    /// assert_eq!(
    ///     table.resolve("backup.tar.gz"),
    ///     Resolution::Known {
    ///         extension: "TAR.GZ".to_string(),
    ///         category: Category::Archive,
    ///     }
    /// );
    /// assert_eq!(
    ///     table.resolve("notes.xyz"),
    ///     Resolution::Unknown { suffix: "xyz".to_string() }
    /// );
    /// ```
    pub fn resolve(&self, file_name: &str) -> Resolution {
        let segments: Vec<&str> = file_name.split('.').collect();
        for start in 0..segments.len() {
            let candidate = segments[start..].join(".").to_uppercase();
            if let Some(&category) = self.map.get(&candidate) {
                return Resolution::Known {
                    extension: candidate,
                    category,
                };
            }
        }
        Resolution::Unknown {
            suffix: segments[1..].join("."),
        }
    }
}

impl Default for ExtensionTable {
    fn default() -> Self {
        Self::new()
    }
}
