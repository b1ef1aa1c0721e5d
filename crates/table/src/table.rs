//! In-memory stream info table.

use crate::error::TableError;
use crate::index::StreamIdIndex;
use crate::schema::Schema;

/// One rasterized stream cell.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamCell {
    /// Flattened DEM index of the cell.
    pub cell_index: i64,
    /// Raster row.
    pub row: i64,
    /// Raster column.
    pub col: i64,
    /// Reach the cell belongs to. Shared by many cells.
    pub stream_id: i64,
    /// Stream direction code.
    pub direction: i64,
    /// Channel slope, once appended.
    pub slope: Option<f64>,
    /// Design flow, once appended.
    pub flow: Option<f64>,
}

impl StreamCell {
    /// Create a base cell with no slope or flow.
    pub fn new(cell_index: i64, row: i64, col: i64, stream_id: i64, direction: i64) -> Self {
        Self {
            cell_index,
            row,
            col,
            stream_id,
            direction,
            slope: None,
            flow: None,
        }
    }

    /// Set the slope.
    pub fn with_slope(mut self, slope: f64) -> Self {
        self.slope = Some(slope);
        self
    }

    /// Set the flow.
    pub fn with_flow(mut self, flow: f64) -> Self {
        self.flow = Some(flow);
        self
    }
}

/// Ordered stream info table with an explicit [`Schema`].
///
/// Row order is the file order and is preserved by every transformation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamInfoTable {
    schema: Schema,
    rows: Vec<StreamCell>,
}

impl StreamInfoTable {
    /// Create a table from rows.
    pub fn new(schema: Schema, rows: Vec<StreamCell>) -> Self {
        Self { schema, rows }
    }

    /// Column layout.
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[StreamCell] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `StreamID` column, in row order.
    pub fn stream_id_column(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.stream_id).collect()
    }

    /// Sorted, de-duplicated stream IDs.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NoStreamIds`] if the table is empty.
    pub fn unique_stream_ids(&self) -> Result<Vec<i64>, TableError> {
        let mut ids = self.stream_id_column();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Err(TableError::NoStreamIds);
        }
        Ok(ids)
    }

    /// Build a stream ID -> row positions index.
    pub fn index(&self) -> StreamIdIndex {
        StreamIdIndex::new(&self.stream_id_column())
    }

    /// Return a copy with every row's slope replaced by `f(stream_id)`.
    ///
    /// `None` leaves the slope unset. The schema grows to at least
    /// [`Schema::Slope`].
    pub fn with_slopes(&self, mut f: impl FnMut(i64) -> Option<f64>) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|r| StreamCell {
                slope: f(r.stream_id),
                ..r.clone()
            })
            .collect();
        Self::new(self.schema.max(Schema::Slope), rows)
    }

    /// Return a copy with every row's flow replaced by `f(stream_id)`.
    ///
    /// `None` leaves the flow unset. The schema becomes [`Schema::Flow`].
    pub fn with_flows(&self, mut f: impl FnMut(i64) -> Option<f64>) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|r| StreamCell {
                flow: f(r.stream_id),
                ..r.clone()
            })
            .collect();
        Self::new(Schema::Flow, rows)
    }
}
