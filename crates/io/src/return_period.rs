//! Precomputed return-period statistics.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::IoError;
use crate::netcdf_read;
use crate::rapid::RIVER_ID_ALIASES;

/// Statistic to read from a return-period file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnPeriod {
    /// 2-year flow.
    Year2,
    /// 10-year flow.
    Year10,
    /// 20-year flow.
    Year20,
    /// Maximum simulated flow.
    MaxFlow,
}

impl ReturnPeriod {
    /// Snake-case name as used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year2 => "return_period_2",
            Self::Year10 => "return_period_10",
            Self::Year20 => "return_period_20",
            Self::MaxFlow => "max_flow",
        }
    }

    /// Candidate variable names, in order of preference.
    ///
    /// Older return-period files carry no `max_flow` variable; those fall
    /// back to the 2-year flow.
    pub fn variables(self) -> &'static [&'static str] {
        match self {
            Self::Year2 => &["return_period_2"],
            Self::Year10 => &["return_period_10"],
            Self::Year20 => &["return_period_20"],
            Self::MaxFlow => &["max_flow", "return_period_2"],
        }
    }
}

impl FromStr for ReturnPeriod {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "return_period_2" => Ok(Self::Year2),
            "return_period_10" => Ok(Self::Year10),
            "return_period_20" => Ok(Self::Year20),
            "max_flow" => Ok(Self::MaxFlow),
            other => Err(IoError::UnknownReturnPeriod {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReturnPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One return-period statistic per river ID.
#[derive(Debug, Clone)]
pub struct ReturnPeriodTable {
    period: ReturnPeriod,
    lookup: HashMap<i64, f64>,
    len: usize,
}

impl ReturnPeriodTable {
    /// Build from parallel ID and value arrays.
    ///
    /// Repeated IDs keep their first value.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the lengths differ.
    pub fn new(period: ReturnPeriod, ids: &[i64], values: &[f64]) -> Result<Self, IoError> {
        if ids.len() != values.len() {
            return Err(IoError::DimensionMismatch {
                name: period.as_str().to_string(),
                expected: ids.len(),
                got: values.len(),
            });
        }
        let mut lookup = HashMap::with_capacity(ids.len());
        for (&id, &v) in ids.iter().zip(values) {
            lookup.entry(id).or_insert(v);
        }
        Ok(Self {
            period,
            lookup,
            len: ids.len(),
        })
    }

    /// Statistic held by the table.
    pub fn period(&self) -> ReturnPeriod {
        self.period
    }

    /// Value for `id`, if present.
    pub fn get(&self, id: i64) -> Option<f64> {
        self.lookup.get(&id).copied()
    }

    /// Number of entries in the source arrays.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Read the ID array and one statistic from a return-period NetCDF file.
///
/// # Errors
///
/// Returns [`IoError::MissingVariable`] if neither `rivid` nor `COMID`, or
/// none of the statistic's candidate variables, exists.
pub fn read_return_periods(path: &Path, period: ReturnPeriod) -> Result<ReturnPeriodTable, IoError> {
    let file = netcdf_read::open_file(path)?;
    let ids = netcdf_read::read_1d_ids(&file, &RIVER_ID_ALIASES, path)?;
    let var = netcdf_read::find_variable(&file, period.variables(), path)?;
    let values = netcdf_read::read_1d_f64(&file, &[var], path)?;
    debug!(
        path = %path.display(),
        %period,
        variable = var,
        reaches = ids.len(),
        "read return periods"
    );
    ReturnPeriodTable::new(period, &ids, &values)
}
