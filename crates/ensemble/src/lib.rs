//! # floodprep-ensemble
//!
//! Align ensemble forecast members onto fixed-width half buffers and reduce
//! them to one flow value per stream.
//!
//! Members `1..=51` share one resolution and are split at the first-half
//! boundary. The control member (52) is a coarser-then-finer composite that
//! is spliced onto the first-half cadence before it is stored. Statistics
//! run in two stages: across members per time step (method X), then across
//! the collapsed series (method Y).

mod buffers;
mod constants;
mod error;
mod splice;

pub use buffers::{EnsembleBuffers, MemberFill, collapse_members};
pub use constants::{CONTROL_MEMBER, SECOND_HALF_LEN, first_half_len};
pub use error::EnsembleError;
pub use floodprep_stats::Reduction;
pub use splice::{ControlRegime, splice_control, spliced_len};
