//! # floodprep-external
//!
//! Run the AutoRoute executable's preprocessing modes. The executable takes
//! positional arguments only and signals failure by writing to stderr, so
//! any stderr output is treated as an error regardless of exit status.

mod autoroute;
mod error;
mod run;

pub use autoroute::AutoRouteTool;
pub use error::ExternalError;
pub use run::run_positional;
