//! Discharge sources: a reach-by-time array addressable by river ID.

use std::collections::HashMap;
use std::ops::Range;

use chrono::NaiveDateTime;
use ndarray::Array2;

use crate::error::IoError;
use crate::time::time_window;

/// Requested river IDs split into those present in a dataset and those not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiverSubset {
    /// Dataset positions of `valid_ids`, in the same order.
    pub indices: Vec<usize>,
    /// Requested IDs found in the dataset, in request order.
    pub valid_ids: Vec<i64>,
    /// Requested IDs not found, in request order.
    pub missing_ids: Vec<i64>,
}

impl RiverSubset {
    /// Resolve `requested` against a dataset's ID array.
    ///
    /// Duplicate IDs in the dataset resolve to their first occurrence.
    pub fn resolve(dataset_ids: &[i64], requested: &[i64]) -> Self {
        let mut position = HashMap::with_capacity(dataset_ids.len());
        for (i, &id) in dataset_ids.iter().enumerate() {
            position.entry(id).or_insert(i);
        }
        let mut subset = Self::default();
        for &id in requested {
            match position.get(&id) {
                Some(&i) => {
                    subset.indices.push(i);
                    subset.valid_ids.push(id);
                }
                None => subset.missing_ids.push(id),
            }
        }
        subset
    }
}

/// A time-indexed discharge dataset.
pub trait DischargeSource {
    /// Number of time steps.
    fn size_time(&self) -> usize;

    /// Resolve an inclusive start/end filter to an index range.
    ///
    /// `Ok(None)` means no filter: use the whole series.
    fn time_index_range(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Option<Range<usize>>, IoError>;

    /// Split `ids` into present and missing reaches.
    fn subset_index_list(&self, ids: &[i64]) -> Result<RiverSubset, IoError>;

    /// Extract discharge as `[reach][time]` for the given dataset positions.
    fn qout(&self, indices: &[usize], time: Option<Range<usize>>) -> Result<Array2<f64>, IoError>;
}

pub(crate) fn check_time_range(
    time: Option<Range<usize>>,
    size_time: usize,
) -> Result<Range<usize>, IoError> {
    let range = time.unwrap_or(0..size_time);
    if range.end > size_time || range.start > range.end {
        return Err(IoError::DimensionMismatch {
            name: "time".to_string(),
            expected: size_time,
            got: range.end,
        });
    }
    Ok(range)
}

/// In-memory discharge source.
#[derive(Debug, Clone)]
pub struct MemoryDischarge {
    ids: Vec<i64>,
    times: Option<Vec<NaiveDateTime>>,
    qout: Array2<f64>,
}

impl MemoryDischarge {
    /// Build from river IDs and a `[reach][time]` array.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the array's first axis does
    /// not match the ID count.
    pub fn new(ids: Vec<i64>, qout: Array2<f64>) -> Result<Self, IoError> {
        if qout.nrows() != ids.len() {
            return Err(IoError::DimensionMismatch {
                name: "rivid".to_string(),
                expected: ids.len(),
                got: qout.nrows(),
            });
        }
        Ok(Self {
            ids,
            times: None,
            qout,
        })
    }

    /// Attach a time axis.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if its length does not match
    /// the array's time axis.
    pub fn with_times(mut self, times: Vec<NaiveDateTime>) -> Result<Self, IoError> {
        if times.len() != self.qout.ncols() {
            return Err(IoError::DimensionMismatch {
                name: "time".to_string(),
                expected: self.qout.ncols(),
                got: times.len(),
            });
        }
        self.times = Some(times);
        Ok(self)
    }
}

impl DischargeSource for MemoryDischarge {
    fn size_time(&self) -> usize {
        self.qout.ncols()
    }

    fn time_index_range(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Option<Range<usize>>, IoError> {
        time_window(self.times.as_deref(), start, end)
    }

    fn subset_index_list(&self, ids: &[i64]) -> Result<RiverSubset, IoError> {
        Ok(RiverSubset::resolve(&self.ids, ids))
    }

    fn qout(&self, indices: &[usize], time: Option<Range<usize>>) -> Result<Array2<f64>, IoError> {
        let range = check_time_range(time, self.size_time())?;
        let mut out = Array2::zeros((indices.len(), range.len()));
        for (r, &i) in indices.iter().enumerate() {
            if i >= self.ids.len() {
                return Err(IoError::IndexOutOfRange {
                    index: i,
                    len: self.ids.len(),
                });
            }
            out.row_mut(r)
                .assign(&self.qout.slice(ndarray::s![i, range.clone()]));
        }
        Ok(out)
    }
}
