//! RAPID Qout NetCDF reader.

use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use ndarray::Array2;
use tracing::debug;

use crate::discharge::{DischargeSource, RiverSubset, check_time_range};
use crate::error::IoError;
use crate::netcdf_read;
use crate::time::time_window;

/// River ID variable names, in order of preference.
pub const RIVER_ID_ALIASES: [&str; 2] = ["rivid", "COMID"];

const QOUT_VAR: &str = "Qout";
const TIME_VAR: &str = "time";

/// Axis order of the discharge variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QoutLayout {
    /// `Qout(time, rivid)`.
    TimeMajor,
    /// `Qout(rivid, time)`.
    ReachMajor,
}

/// An open RAPID discharge file.
///
/// IDs and the time axis are read eagerly; discharge is read per reach on
/// demand so only the requested slab is ever held in memory.
pub struct RapidDataset {
    path: PathBuf,
    file: netcdf::File,
    ids: Vec<i64>,
    times: Option<Vec<NaiveDateTime>>,
    layout: QoutLayout,
    size_time: usize,
}

impl std::fmt::Debug for RapidDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RapidDataset")
            .field("path", &self.path)
            .field("n_reaches", &self.ids.len())
            .field("size_time", &self.size_time)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl RapidDataset {
    /// Open a RAPID Qout file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`], [`IoError::MissingVariable`] when
    /// neither `rivid` nor `COMID` (or `Qout`) exists,
    /// [`IoError::UnknownLayout`] when `Qout` is not 2-D with a `time`
    /// dimension, and [`IoError::DimensionMismatch`] when the ID count does
    /// not match the reach dimension.
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let file = netcdf_read::open_file(path)?;
        let ids = netcdf_read::read_1d_ids(&file, &RIVER_ID_ALIASES, path)?;
        let dims = netcdf_read::dimension_names(&file, QOUT_VAR, path)?;

        let (layout, n_reach, size_time) = match dims.as_slice() {
            [(t, nt), (_, nr)] if t == TIME_VAR => (QoutLayout::TimeMajor, *nr, *nt),
            [(_, nr), (t, nt)] if t == TIME_VAR => (QoutLayout::ReachMajor, *nr, *nt),
            _ => {
                return Err(IoError::UnknownLayout {
                    name: QOUT_VAR.to_string(),
                    dims: dims.iter().map(|(n, _)| n.clone()).collect(),
                });
            }
        };
        if n_reach != ids.len() {
            return Err(IoError::DimensionMismatch {
                name: "rivid".to_string(),
                expected: ids.len(),
                got: n_reach,
            });
        }

        let times = netcdf_read::read_time_axis(&file, TIME_VAR)?;
        if let Some(t) = &times
            && t.len() != size_time
        {
            return Err(IoError::DimensionMismatch {
                name: TIME_VAR.to_string(),
                expected: size_time,
                got: t.len(),
            });
        }

        debug!(
            path = %path.display(),
            reaches = ids.len(),
            size_time,
            ?layout,
            "opened RAPID dataset"
        );
        Ok(Self {
            path: path.to_path_buf(),
            file,
            ids,
            times,
            layout,
            size_time,
        })
    }

    /// River IDs in file order.
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Time axis, if the file has one.
    pub fn times(&self) -> Option<&[NaiveDateTime]> {
        self.times.as_deref()
    }

    /// Detected axis order.
    pub fn layout(&self) -> QoutLayout {
        self.layout
    }
}

impl DischargeSource for RapidDataset {
    fn size_time(&self) -> usize {
        self.size_time
    }

    fn time_index_range(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Option<Range<usize>>, IoError> {
        time_window(self.times(), start, end)
    }

    fn subset_index_list(&self, ids: &[i64]) -> Result<RiverSubset, IoError> {
        Ok(RiverSubset::resolve(&self.ids, ids))
    }

    fn qout(&self, indices: &[usize], time: Option<Range<usize>>) -> Result<Array2<f64>, IoError> {
        let range = check_time_range(time, self.size_time)?;
        let var = self
            .file
            .variable(QOUT_VAR)
            .ok_or_else(|| IoError::MissingVariable {
                name: QOUT_VAR.to_string(),
                path: self.path.clone(),
            })?;

        let mut out = Array2::zeros((indices.len(), range.len()));
        if range.is_empty() {
            return Ok(out);
        }
        for (r, &i) in indices.iter().enumerate() {
            if i >= self.ids.len() {
                return Err(IoError::IndexOutOfRange {
                    index: i,
                    len: self.ids.len(),
                });
            }
            let values = match self.layout {
                QoutLayout::TimeMajor => var.get_values::<f64, _>((range.clone(), i))?,
                QoutLayout::ReachMajor => var.get_values::<f64, _>((i, range.clone()))?,
            };
            if values.len() != range.len() {
                return Err(IoError::DimensionMismatch {
                    name: TIME_VAR.to_string(),
                    expected: range.len(),
                    got: values.len(),
                });
            }
            for (t, v) in values.into_iter().enumerate() {
                out[[r, t]] = v;
            }
        }
        Ok(out)
    }
}
