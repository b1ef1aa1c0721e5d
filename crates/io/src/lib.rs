//! # floodprep-io
//!
//! Read RAPID discharge and return-period NetCDF files. Discharge is exposed
//! through the [`DischargeSource`] trait as a `[reach][time]` array
//! addressable by river ID, so the injectors can work against either a file
//! on disk ([`RapidDataset`]) or an in-memory array ([`MemoryDischarge`]).

mod discharge;
mod error;
mod netcdf_read;
mod prediction;
mod rapid;
mod return_period;
mod time;

pub use discharge::{DischargeSource, MemoryDischarge, RiverSubset};
pub use error::IoError;
pub use prediction::{discover_prediction_files, ensemble_member};
pub use rapid::{QoutLayout, RIVER_ID_ALIASES, RapidDataset};
pub use return_period::{ReturnPeriod, ReturnPeriodTable, read_return_periods};
pub use time::{TimeUnit, parse_datetime, parse_time_units, time_window};
