//! Stream ID -> row position lookup.

use std::collections::HashMap;

/// Positions of every row sharing a stream ID.
///
/// Built once per operation from the `StreamID` column so each lookup is a
/// hash probe rather than a scan of the whole column.
#[derive(Debug, Clone, Default)]
pub struct StreamIdIndex {
    positions: HashMap<i64, Vec<usize>>,
}

impl StreamIdIndex {
    /// Index a `StreamID` column.
    pub fn new(column: &[i64]) -> Self {
        let mut positions: HashMap<i64, Vec<usize>> = HashMap::new();
        for (i, &id) in column.iter().enumerate() {
            positions.entry(id).or_default().push(i);
        }
        Self { positions }
    }

    /// Row positions for `stream_id`, in ascending order. Empty if absent.
    pub fn rows_for(&self, stream_id: i64) -> &[usize] {
        self.positions.get(&stream_id).map_or(&[], Vec::as_slice)
    }
}
