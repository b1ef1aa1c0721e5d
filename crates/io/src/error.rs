//! Error types for floodprep-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the floodprep-io crate.
///
/// Covers missing files, NetCDF library failures, malformed variables and
/// time axes, and configuration errors such as an empty time window or an
/// unknown return-period statistic.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a filesystem error.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when the discharge variable's dimensions name neither a
    /// `(time, rivid)` nor a `(rivid, time)` layout.
    #[error("cannot determine layout of '{name}' from dimensions {dims:?}")]
    UnknownLayout {
        /// Variable name.
        name: String,
        /// Dimension names as found.
        dims: Vec<String>,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a start/end filter selects no time steps.
    #[error("time window {start} .. {end} matches no time steps")]
    EmptyTimeWindow {
        /// Window start, or `-` if open.
        start: String,
        /// Window end, or `-` if open.
        end: String,
    },

    /// Returned when a reach index is outside the dataset.
    #[error("reach index {index} out of range for {len} reaches")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of reaches in the dataset.
        len: usize,
    },

    /// Returned for a return-period statistic name that is not recognised.
    #[error(
        "unknown return period '{name}' (expected one of: return_period_2, return_period_10, return_period_20, max_flow)"
    )]
    UnknownReturnPeriod {
        /// The name as given.
        name: String,
    },
}

impl IoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}
