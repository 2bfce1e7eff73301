//! Loader-specific types: errors, configuration and discovered file sets.

use std::path::PathBuf;

use medref_types::Severity;
use thiserror::Error;

/// Errors that can occur while loading or building reference data.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error reading a data file.
    #[error("IO error reading data file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required file missing from the data directory.
    #[error("Required data file not found: {file_type} in {directory}")]
    RequiredFileMissing {
        /// The type of file that was missing.
        file_type: String,
        /// The directory that was searched.
        directory: String,
    },

    /// Invalid header - column count mismatch.
    #[error("Invalid header: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// Unexpected column name.
    #[error("Unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },

    /// Two medication records share a slug.
    #[error("Duplicate medication slug: {slug}")]
    DuplicateSlug {
        /// The repeated slug.
        slug: String,
    },

    /// The interaction graph has an edge without a matching reverse edge.
    #[error("Asymmetric interaction edge {from} -> {to}: forward '{forward}', reverse '{reverse}'")]
    AsymmetricEdge {
        /// Source slug.
        from: String,
        /// Partner slug.
        to: String,
        /// Normalized forward severity.
        forward: String,
        /// Normalized reverse severity, or "missing".
        reverse: String,
    },
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Configuration for CSV parsing.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether to trim whitespace around fields.
    pub trim: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

/// Policy controlling which interactions are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPolicy {
    /// Least severe level still reported. Pairs below it are computed
    /// and then suppressed.
    pub threshold: Severity,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            threshold: Severity::Moderate,
        }
    }
}

impl ReportPolicy {
    /// Creates a policy reporting everything at or above `threshold`.
    pub fn with_threshold(threshold: Severity) -> Self {
        Self { threshold }
    }

    /// Returns true if an interaction of this severity is reported.
    pub fn reports(&self, severity: Severity) -> bool {
        severity.meets(self.threshold)
    }
}

/// Discovered runtime data files.
#[derive(Debug, Clone, Default)]
pub struct DataFiles {
    /// Path to the medication dataset (JSON array of records).
    pub medications_file: Option<PathBuf>,
    /// Path to the interaction graph artifact.
    pub interactions_file: Option<PathBuf>,
}

impl DataFiles {
    /// Creates a new empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if both required files are present.
    pub fn has_required_files(&self) -> bool {
        self.medications_file.is_some() && self.interactions_file.is_some()
    }

    /// Returns a list of missing required files.
    pub fn missing_files(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.medications_file.is_none() {
            missing.push("Medications");
        }
        if self.interactions_file.is_none() {
            missing.push("Interactions");
        }
        missing
    }
}

/// A DDInter download file together with its category code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdinterFile {
    /// ATC-style category code from the filename (e.g. "A", "B").
    pub code: String,
    /// Path to the CSV file.
    pub path: PathBuf,
}
