//! Error types for heatreel.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for heatreel operations.
#[derive(Error, Debug)]
pub enum HeatreelError {
    /// The input directory could not be listed.
    #[error("cannot read directory '{}': {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token in a snapshot file is not a number.
    #[error("{}:{line}:{column}: '{token}' is not a number", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        token: String,
    },

    /// A row has a different number of columns than the first row.
    #[error("{}:{line}: expected {expected} columns, found {actual}", path.display())]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A snapshot file contains no data rows.
    #[error("'{}' contains no data", path.display())]
    EmptyGrid { path: PathBuf },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The discovered count does not match a contiguous run of snapshot files.
    #[error(
        "snapshot '{expected}' (index {index}) is missing; {discovered} matching entries were found"
    )]
    SequenceGap {
        index: usize,
        expected: String,
        discovered: usize,
    },

    /// No color map with the given name is registered.
    #[error("color map '{0}' not found")]
    UnknownColorMap(String),

    /// A configuration value is out of range.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// Frame rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// The external encoder failed.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for heatreel operations.
pub type Result<T> = std::result::Result<T, HeatreelError>;
