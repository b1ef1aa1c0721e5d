//! Tolerant stream info table reader.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::TableError;
use crate::schema::Schema;
use crate::table::{StreamCell, StreamInfoTable};

fn split_fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect()
}

fn parse_field<T: FromStr>(line: usize, column: &'static str, raw: &str) -> Result<T, TableError> {
    raw.parse().map_err(|_| TableError::InvalidValue {
        line,
        column,
        value: raw.to_string(),
    })
}

impl StreamInfoTable {
    /// Read a stream info table from disk.
    ///
    /// Fields may be separated by commas, whitespace or both. Blank lines are
    /// skipped. The header is required and fixes the [`Schema`]; every data
    /// row must carry exactly that many fields.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::FileNotFound`] if the file does not exist,
    /// [`TableError::MissingHeader`] for an empty file,
    /// [`TableError::UnknownHeader`] for an unrecognised column layout, and
    /// [`TableError::ColumnCount`] / [`TableError::InvalidValue`] for
    /// malformed rows.
    pub fn read(path: &Path) -> Result<Self, TableError> {
        if !path.exists() {
            return Err(TableError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
        let table = Self::parse(&text).map_err(|e| match e {
            TableError::MissingHeader { .. } => TableError::MissingHeader {
                path: path.to_path_buf(),
            },
            other => other,
        })?;
        debug!(
            path = %path.display(),
            rows = table.len(),
            schema = ?table.schema(),
            "read stream info table"
        );
        Ok(table)
    }

    /// Parse table text. See [`StreamInfoTable::read`].
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l))
            .filter(|(_, l)| !l.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(TableError::MissingHeader {
                path: Default::default(),
            });
        };
        let schema =
            Schema::from_header(&split_fields(header)).ok_or_else(|| TableError::UnknownHeader {
                header: header.trim().to_string(),
            })?;
        let names = schema.header();
        let expected = schema.n_columns();

        let mut rows = Vec::new();
        for (line, raw) in lines {
            let fields = split_fields(raw);
            if fields.len() != expected {
                return Err(TableError::ColumnCount {
                    line,
                    expected,
                    got: fields.len(),
                });
            }
            let int = |i: usize| parse_field::<i64>(line, names[i], fields[i]);
            let mut cell = StreamCell::new(int(0)?, int(1)?, int(2)?, int(3)?, int(4)?);
            if schema >= Schema::Slope {
                cell.slope = Some(parse_field(line, names[5], fields[5])?);
            }
            if schema >= Schema::Flow {
                cell.flow = Some(parse_field(line, names[6], fields[6])?);
            }
            rows.push(cell);
        }
        Ok(Self::new(schema, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_delimited_base() {
        let text = "DEM_1D_Index Row Col StreamID StreamDirection\n\
                    12 0 12 101 4\n\
                    13 0 13 101 4\n";
        let table = StreamInfoTable::parse(text).unwrap();
        assert_eq!(table.schema(), Schema::Base);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1], StreamCell::new(13, 0, 13, 101, 4));
    }

    #[test]
    fn parses_mixed_delimiters_and_blank_lines() {
        let text = "DEM_1D_Index,Row,Col,StreamID,StreamDirection,Slope,Flow\n\
                    \n\
                    5, 1, 2, 7, 3, 0.002, 14.5\n\
                    6 1 3 7 3 0.002 14.5\n";
        let table = StreamInfoTable::parse(text).unwrap();
        assert_eq!(table.schema(), Schema::Flow);
        assert_eq!(table.rows()[0].flow, Some(14.5));
        assert_eq!(table.rows()[1].slope, Some(0.002));
    }

    #[test]
    fn rejects_short_row_with_line_number() {
        let text = "DEM_1D_Index Row Col StreamID StreamDirection Slope\n\
                    1 0 1 5 2 0.1\n\
                    2 0 2 5 2\n";
        let err = StreamInfoTable::parse(text).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnCount {
                line: 3,
                expected: 6,
                got: 5
            }
        ));
    }

    #[test]
    fn rejects_non_integer_stream_id() {
        let text = "DEM_1D_Index Row Col StreamID StreamDirection\n1 0 1 x5 2\n";
        let err = StreamInfoTable::parse(text).unwrap_err();
        assert!(matches!(
            err,
            TableError::InvalidValue {
                line: 2,
                column: "StreamID",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_header() {
        let err = StreamInfoTable::parse("a b c\n1 2 3\n").unwrap_err();
        assert!(matches!(err, TableError::UnknownHeader { .. }));
    }

    #[test]
    fn empty_text_is_missing_header() {
        let err = StreamInfoTable::parse("\n  \n").unwrap_err();
        assert!(matches!(err, TableError::MissingHeader { .. }));
    }

    #[test]
    fn header_only_is_empty_table() {
        let table = StreamInfoTable::parse("DEM_1D_Index Row Col StreamID StreamDirection\n")
            .unwrap();
        assert!(table.is_empty());
    }
}
