//! Broadcasting per-stream flows onto table rows.

use std::collections::HashMap;

use floodprep_table::StreamInfoTable;
use tracing::{info, warn};

/// Set every row's flow from `flows`, keyed by stream ID.
///
/// IDs listed in `missing` are logged once each and, like any other ID
/// absent from `flows`, receive `0.0`.
pub(crate) fn assign_flows(
    table: &StreamInfoTable,
    flows: &HashMap<i64, f64>,
    missing: &[i64],
) -> StreamInfoTable {
    for id in missing {
        warn!(stream_id = *id, "reach not found in dataset, setting flow to zero");
    }
    info!(
        streams = flows.len(),
        missing = missing.len(),
        rows = table.len(),
        "assigning flows"
    );
    table.with_flows(|id| Some(flows.get(&id).copied().unwrap_or(0.0)))
}
