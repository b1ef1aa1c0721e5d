//! Error types for floodprep-external.

use std::path::PathBuf;

/// Error type for all fallible operations in the floodprep-external crate.
#[derive(Debug, thiserror::Error)]
pub enum ExternalError {
    /// Returned when the process cannot be started.
    #[error("failed to run {}: {source}", executable.display())]
    Spawn {
        /// Program that was invoked.
        executable: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the process wrote to stderr.
    #[error("{} reported an error: {stderr}", executable.display())]
    Stderr {
        /// Program that was invoked.
        executable: PathBuf,
        /// Trimmed stderr text.
        stderr: String,
    },
}
