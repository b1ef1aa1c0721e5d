//! Peak flow from a single discharge run, extracted in bounded batches.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use floodprep_ensemble::Reduction;
use floodprep_io::DischargeSource;
use floodprep_table::StreamInfoTable;
use ndarray::Axis;
use tracing::{debug, info, info_span};

use crate::assign::assign_flows;
use crate::error::InjectError;

/// Default element budget per extraction batch: five years of 3-hourly
/// steps for 4000 reaches.
pub const DEFAULT_MAX_CHUNK_ELEMENTS: usize = 8 * 365 * 5 * 4000;

/// Configuration for [`inject_peak_flow`].
///
/// Use the builder methods (`with_*`) to narrow the search window or change
/// the memory budget.
#[derive(Debug, Clone)]
pub struct PeakFlowConfig {
    /// Upper bound on reaches x time steps held in memory at once.
    max_chunk_elements: usize,
    /// Inclusive start of the peak search window.
    start: Option<NaiveDateTime>,
    /// Inclusive end of the peak search window.
    end: Option<NaiveDateTime>,
}

impl Default for PeakFlowConfig {
    fn default() -> Self {
        Self {
            max_chunk_elements: DEFAULT_MAX_CHUNK_ELEMENTS,
            start: None,
            end: None,
        }
    }
}

impl PeakFlowConfig {
    /// Set the per-batch element budget.
    pub fn with_max_chunk_elements(mut self, n: usize) -> Self {
        self.max_chunk_elements = n;
        self
    }

    /// Set the search window start.
    pub fn with_start(mut self, start: Option<NaiveDateTime>) -> Self {
        self.start = start;
        self
    }

    /// Set the search window end.
    pub fn with_end(mut self, end: Option<NaiveDateTime>) -> Self {
        self.end = end;
        self
    }

    /// Per-batch element budget.
    pub fn max_chunk_elements(&self) -> usize {
        self.max_chunk_elements
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), InjectError> {
        if self.max_chunk_elements == 0 {
            return Err(InjectError::InvalidConfig {
                reason: "max_chunk_elements must be > 0".to_string(),
            });
        }
        if let (Some(s), Some(e)) = (self.start, self.end)
            && s > e
        {
            return Err(InjectError::InvalidConfig {
                reason: format!("search window start {s} is after end {e}"),
            });
        }
        Ok(())
    }
}

/// Number of reaches per batch so that `batch x time_len` stays within
/// `budget`, clamped to `1..=n_ids`.
pub fn batch_size(budget: usize, time_len: usize, n_ids: usize) -> usize {
    let per_budget = budget / time_len.max(1);
    per_budget.clamp(1, n_ids.max(1))
}

/// Set every row's flow to the peak discharge of its stream.
///
/// Unique stream IDs are processed in batches sized by
/// [`batch_size`]. Each batch is resolved against the source, its
/// `[reach][time]` block extracted over the search window, and the NaN-
/// ignoring maximum taken per reach. Streams absent from the source get
/// `0.0`. Batching never changes the result.
///
/// # Errors
///
/// Fails before producing a table on an empty table, a window matching no
/// time steps, or any resolution or extraction error.
pub fn inject_peak_flow<S>(
    table: &StreamInfoTable,
    source: &S,
    config: &PeakFlowConfig,
) -> Result<StreamInfoTable, InjectError>
where
    S: DischargeSource + ?Sized,
{
    let _span = info_span!("peak_flow").entered();
    config.validate()?;

    let ids = table.unique_stream_ids()?;
    let window = source.time_index_range(config.start, config.end)?;
    let time_len = window.as_ref().map_or(source.size_time(), |r| r.len());
    let batch = batch_size(config.max_chunk_elements, time_len, ids.len());
    info!(
        streams = ids.len(),
        time_len,
        batch,
        batches = ids.len().div_ceil(batch),
        "extracting peak flows"
    );

    let mut peaks = HashMap::with_capacity(ids.len());
    let mut missing = Vec::new();
    for (b, chunk) in ids.chunks(batch).enumerate() {
        let subset = source.subset_index_list(chunk)?;
        let qout = source.qout(&subset.indices, window.clone())?;
        for (id, series) in subset.valid_ids.iter().zip(qout.axis_iter(Axis(0))) {
            peaks.insert(*id, Reduction::Max.apply(&series.to_vec()));
        }
        debug!(
            batch = b,
            valid = subset.valid_ids.len(),
            missing = subset.missing_ids.len(),
            "batch done"
        );
        missing.extend(subset.missing_ids);
    }

    Ok(assign_flows(table, &peaks, &missing))
}
