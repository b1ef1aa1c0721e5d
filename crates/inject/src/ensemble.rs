//! Flow from a multi-file ensemble forecast.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use floodprep_ensemble::{EnsembleBuffers, MemberFill, Reduction, first_half_len};
use floodprep_io::{DischargeSource, IoError, ensemble_member};
use floodprep_table::StreamInfoTable;
use tracing::{debug, info, info_span, warn};

use crate::assign::assign_flows;
use crate::error::InjectError;

/// Set every row's flow to a two-stage ensemble statistic.
///
/// `files` are the member forecasts, one per file; `open` turns a path into
/// a [`DischargeSource`]. The first file fixes the first-half width and
/// which streams are present. Any other member that cannot be opened,
/// lacks one of those streams, or does not fit the half buffers is logged
/// and left out.
///
/// `method_x` collapses members per time step; `method_y` collapses the
/// resulting series to one value. Streams absent from the first file get
/// `0.0`.
///
/// # Errors
///
/// Returns [`InjectError::NoPredictionFiles`] for an empty file list, and
/// propagates failures to read the table or the first file.
pub fn inject_ensemble_flow<S, F>(
    table: &StreamInfoTable,
    files: &[PathBuf],
    mut open: F,
    method_x: Reduction,
    method_y: Reduction,
) -> Result<StreamInfoTable, InjectError>
where
    S: DischargeSource,
    F: FnMut(&Path) -> Result<S, IoError>,
{
    let _span = info_span!("ensemble_flow", %method_x, %method_y).entered();

    let ids = table.unique_stream_ids()?;
    let Some(first_file) = files.first() else {
        return Err(InjectError::NoPredictionFiles);
    };

    let (subset, first_len) = {
        let first = open(first_file)?;
        (
            first.subset_index_list(&ids)?,
            first_half_len(first.size_time()),
        )
    };
    info!(
        members = files.len(),
        streams = subset.valid_ids.len(),
        first_half = first_len,
        "extracting ensemble members"
    );

    let mut buffers = EnsembleBuffers::new(subset.valid_ids.len(), files.len(), first_len);
    for (slot, path) in files.iter().enumerate() {
        let Some(member) = ensemble_member(path) else {
            warn!(path = %path.display(), "no ensemble member number in file name, skipping");
            continue;
        };
        let qout = match read_member(&mut open, path, &subset.valid_ids) {
            Ok(q) => q,
            Err(e) => {
                warn!(path = %path.display(), member, error = %e, "skipping ensemble member");
                continue;
            }
        };
        let fill = buffers.add_member(slot, member, qout.view())?;
        if fill != MemberFill::Skipped {
            debug!(member, ?fill, "member stored");
        }
    }
    let (n_first, n_second) = buffers.filled_counts();
    info!(first_half = n_first, second_half = n_second, "members aligned");

    let values = buffers.reduce(method_x, method_y);
    let flows: HashMap<i64, f64> = subset.valid_ids.iter().copied().zip(values).collect();
    Ok(assign_flows(table, &flows, &subset.missing_ids))
}

/// Open one member and extract `[stream][time]` for `ids`, in that order.
fn read_member<S, F>(open: &mut F, path: &Path, ids: &[i64]) -> Result<ndarray::Array2<f64>, IoError>
where
    S: DischargeSource,
    F: FnMut(&Path) -> Result<S, IoError>,
{
    let source = open(path)?;
    let subset = source.subset_index_list(ids)?;
    if let Some(&id) = subset.missing_ids.first() {
        return Err(IoError::DimensionMismatch {
            name: format!("rivid (stream {id} absent)"),
            expected: ids.len(),
            got: subset.valid_ids.len(),
        });
    }
    source.qout(&subset.indices, None)
}
