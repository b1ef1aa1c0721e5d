//! Flow from precomputed return-period statistics.

use std::collections::HashMap;

use floodprep_io::ReturnPeriodTable;
use floodprep_table::StreamInfoTable;
use tracing::info_span;

use crate::assign::assign_flows;
use crate::error::InjectError;

/// Set every row's flow to its stream's return-period value.
///
/// Streams absent from `periods` get `0.0` and are logged; they never abort
/// the run.
///
/// # Errors
///
/// Returns [`InjectError::Table`] if the table has no stream IDs.
pub fn inject_return_period(
    table: &StreamInfoTable,
    periods: &ReturnPeriodTable,
) -> Result<StreamInfoTable, InjectError> {
    let _span = info_span!("return_period", period = %periods.period()).entered();

    let ids = table.unique_stream_ids()?;
    let mut flows = HashMap::with_capacity(ids.len());
    let mut missing = Vec::new();
    for id in ids {
        match periods.get(id) {
            Some(v) => {
                flows.insert(id, v);
            }
            None => missing.push(id),
        }
    }
    Ok(assign_flows(table, &flows, &missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodprep_io::ReturnPeriod;
    use floodprep_table::{Schema, StreamCell};

    #[test]
    fn lookup_and_miss() {
        let table = StreamInfoTable::new(
            Schema::Slope,
            vec![
                StreamCell::new(0, 0, 0, 5, 1).with_slope(0.1),
                StreamCell::new(1, 0, 1, 99, 1).with_slope(0.2),
                StreamCell::new(2, 0, 2, 5, 1).with_slope(0.3),
            ],
        );
        let periods =
            ReturnPeriodTable::new(ReturnPeriod::Year10, &[5, 6], &[42.0, 43.0]).unwrap();
        let out = inject_return_period(&table, &periods).unwrap();
        let flows: Vec<_> = out.rows().iter().map(|r| r.flow).collect();
        assert_eq!(flows, vec![Some(42.0), Some(0.0), Some(42.0)]);
        assert_eq!(out.rows()[1].slope, Some(0.2));
    }

    #[test]
    fn empty_table_is_error() {
        let periods = ReturnPeriodTable::new(ReturnPeriod::Year2, &[1], &[1.0]).unwrap();
        let err = inject_return_period(&StreamInfoTable::default(), &periods).unwrap_err();
        assert!(matches!(err, InjectError::Table(_)));
    }
}
