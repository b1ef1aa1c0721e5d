//! # floodprep-inject
//!
//! Every path that writes a value into the stream info table: slope or flow
//! straight from vector attributes, the peak of a single RAPID run, a
//! two-stage ensemble statistic, and a precomputed return period.
//!
//! Each injector takes a table and returns a new one; nothing is written to
//! disk here. Callers commit with [`StreamInfoTable::replace`].
//!
//! [`StreamInfoTable::replace`]: floodprep_table::StreamInfoTable::replace

mod assign;
mod attribute;
mod ensemble;
mod error;
mod peak;
mod return_period;

pub use attribute::{AttributeColumn, inject_attribute};
pub use ensemble::inject_ensemble_flow;
pub use error::InjectError;
pub use peak::{DEFAULT_MAX_CHUNK_ELEMENTS, PeakFlowConfig, batch_size, inject_peak_flow};
pub use return_period::inject_return_period;
