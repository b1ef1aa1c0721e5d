//! Error types for floodprep-table.

use std::path::PathBuf;

/// Error type for all fallible operations in the floodprep-table crate.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Returned when the table file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an underlying filesystem error.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the file has no header line.
    #[error("stream info table {} is empty", path.display())]
    MissingHeader {
        /// Offending file.
        path: PathBuf,
    },

    /// Returned when the header does not name a known column layout.
    #[error("unrecognised stream info header: '{header}'")]
    UnknownHeader {
        /// The header line as read.
        header: String,
    },

    /// Returned when a data row has the wrong number of fields.
    #[error("line {line}: expected {expected} fields, got {got}")]
    ColumnCount {
        /// 1-based line number.
        line: usize,
        /// Field count required by the header.
        expected: usize,
        /// Field count found.
        got: usize,
    },

    /// Returned when a field cannot be parsed.
    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        /// 1-based line number.
        line: usize,
        /// Column name.
        column: &'static str,
        /// Raw text.
        value: String,
    },

    /// Returned when the table holds no stream IDs at all.
    #[error("no stream IDs found in stream info table")]
    NoStreamIds,
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
