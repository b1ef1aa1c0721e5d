//! Error types for floodprep-inject.

use floodprep_ensemble::EnsembleError;
use floodprep_io::IoError;
use floodprep_table::TableError;

/// Error type for all fallible operations in the floodprep-inject crate.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    /// Stream info table failure.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Discharge or return-period dataset failure.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Ensemble buffer failure.
    #[error(transparent)]
    Ensemble(#[from] EnsembleError),

    /// Returned when a vector feature's ID field is missing or not numeric.
    #[error("feature {feature}: field '{field}' is not a usable stream ID ({value})")]
    FeatureId {
        /// Zero-based feature position in iteration order.
        feature: usize,
        /// ID field name.
        field: String,
        /// What was found instead.
        value: String,
    },

    /// Returned when an ensemble run has no forecast files.
    #[error("no prediction files found")]
    NoPredictionFiles,

    /// Returned when injector settings fail validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
}
