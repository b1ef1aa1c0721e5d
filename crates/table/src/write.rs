//! Stream info table writer.

use std::io::Write;

use crate::schema::{Delimiter, Schema};
use crate::table::StreamInfoTable;

impl StreamInfoTable {
    /// Write the header and every row.
    ///
    /// Optional columns required by the schema but unset on a row are
    /// written as `0`.
    pub fn write<W: Write>(&self, mut w: W, delimiter: Delimiter) -> std::io::Result<()> {
        let sep = delimiter.as_char().to_string();
        writeln!(w, "{}", self.schema().header().join(&sep))?;
        for r in self.rows() {
            write!(
                w,
                "{}{sep}{}{sep}{}{sep}{}{sep}{}",
                r.cell_index, r.row, r.col, r.stream_id, r.direction
            )?;
            if self.schema() >= Schema::Slope {
                write!(w, "{sep}{}", r.slope.unwrap_or(0.0))?;
            }
            if self.schema() >= Schema::Flow {
                write!(w, "{sep}{}", r.flow.unwrap_or(0.0))?;
            }
            writeln!(w)?;
        }
        w.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::StreamCell;

    fn render(table: &StreamInfoTable, delimiter: Delimiter) -> String {
        let mut buf = Vec::new();
        table.write(&mut buf, delimiter).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_space_delimited() {
        let table = StreamInfoTable::new(Schema::Base, vec![StreamCell::new(3, 0, 3, 42, 1)]);
        assert_eq!(
            render(&table, Delimiter::Space),
            "DEM_1D_Index Row Col StreamID StreamDirection\n3 0 3 42 1\n"
        );
    }

    #[test]
    fn unset_values_written_as_zero() {
        let table = StreamInfoTable::new(
            Schema::Flow,
            vec![StreamCell::new(3, 0, 3, 42, 1).with_flow(3.5)],
        );
        assert_eq!(
            render(&table, Delimiter::Comma),
            "DEM_1D_Index,Row,Col,StreamID,StreamDirection,Slope,Flow\n3,0,3,42,1,0,3.5\n"
        );
    }

    #[test]
    fn written_text_reads_back() {
        let table = StreamInfoTable::new(
            Schema::Slope,
            vec![
                StreamCell::new(0, 0, 0, 1, 2).with_slope(0.000_125),
                StreamCell::new(1, 0, 1, 1, 2).with_slope(1e-9),
            ],
        );
        let text = render(&table, Delimiter::Space);
        assert_eq!(StreamInfoTable::parse(&text).unwrap(), table);
    }
}
