//! Error types for floodprep-ensemble.

/// Error type for all fallible operations in the floodprep-ensemble crate.
#[derive(Debug, thiserror::Error)]
pub enum EnsembleError {
    /// Returned when a member's discharge block has the wrong stream count.
    #[error("member {member}: expected {expected} streams, got {got}")]
    StreamCount {
        /// Ensemble member number.
        member: u32,
        /// Streams held by the buffers.
        expected: usize,
        /// Rows in the supplied block.
        got: usize,
    },

    /// Returned when a buffer slot is outside the allocated member range.
    #[error("member slot {slot} out of range for {n_members} members")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Allocated member slots.
        n_members: usize,
    },
}
