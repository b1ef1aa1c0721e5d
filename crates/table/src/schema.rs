//! Column layout and delimiter of the stream info table.

/// Column names of the five base columns, in file order.
pub const BASE_COLUMNS: [&str; 5] = ["DEM_1D_Index", "Row", "Col", "StreamID", "StreamDirection"];

/// Which optional columns the table carries.
///
/// The schema only ever grows: slope is column 6, flow is column 7. A flow
/// table always carries a slope column, even if slope was never appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Schema {
    /// `DEM_1D_Index Row Col StreamID StreamDirection`
    #[default]
    Base,
    /// Base columns plus `Slope`.
    Slope,
    /// Base columns plus `Slope` and `Flow`.
    Flow,
}

impl Schema {
    /// Number of fields per row.
    pub fn n_columns(self) -> usize {
        match self {
            Self::Base => 5,
            Self::Slope => 6,
            Self::Flow => 7,
        }
    }

    /// Header column names, in file order.
    pub fn header(self) -> Vec<&'static str> {
        let mut cols = BASE_COLUMNS.to_vec();
        if self >= Self::Slope {
            cols.push("Slope");
        }
        if self >= Self::Flow {
            cols.push("Flow");
        }
        cols
    }

    /// Determine the schema from header column names.
    ///
    /// Names are matched case-insensitively. `uFlow` is accepted for `Flow`
    /// because older ensemble runs wrote it.
    pub fn from_header(names: &[&str]) -> Option<Self> {
        let lower: Vec<String> = names.iter().map(|n| n.to_ascii_lowercase()).collect();
        let base_ok = lower.len() >= BASE_COLUMNS.len()
            && BASE_COLUMNS
                .iter()
                .zip(&lower)
                .all(|(want, got)| want.eq_ignore_ascii_case(got));
        if !base_ok {
            return None;
        }
        match &lower[BASE_COLUMNS.len()..] {
            [] => Some(Self::Base),
            [slope] if slope == "slope" => Some(Self::Slope),
            [slope, flow] if slope == "slope" && (flow == "flow" || flow == "uflow") => {
                Some(Self::Flow)
            }
            _ => None,
        }
    }
}

/// Field separator used when writing a table.
///
/// Reading accepts either, so tables written by any step can be re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Single space.
    #[default]
    Space,
    /// Single comma.
    Comma,
}

impl Delimiter {
    /// The separator character.
    pub fn as_char(self) -> char {
        match self {
            Self::Space => ' ',
            Self::Comma => ',',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_grows_monotonically() {
        assert_eq!(Schema::Base.header().len(), 5);
        assert_eq!(Schema::Slope.header().last(), Some(&"Slope"));
        assert_eq!(
            Schema::Flow.header(),
            vec![
                "DEM_1D_Index",
                "Row",
                "Col",
                "StreamID",
                "StreamDirection",
                "Slope",
                "Flow"
            ]
        );
        for s in [Schema::Base, Schema::Slope, Schema::Flow] {
            assert_eq!(s.header().len(), s.n_columns());
        }
    }

    #[test]
    fn from_header_round_trip() {
        for s in [Schema::Base, Schema::Slope, Schema::Flow] {
            assert_eq!(Schema::from_header(&s.header()), Some(s));
        }
    }

    #[test]
    fn from_header_accepts_legacy_uflow() {
        let names = [
            "DEM_1D_Index",
            "Row",
            "Col",
            "StreamID",
            "StreamDirection",
            "Slope",
            "uFlow",
        ];
        assert_eq!(Schema::from_header(&names), Some(Schema::Flow));
    }

    #[test]
    fn from_header_rejects_unknown() {
        assert_eq!(Schema::from_header(&["a", "b", "c"]), None);
        let flow_without_slope = [
            "DEM_1D_Index",
            "Row",
            "Col",
            "StreamID",
            "StreamDirection",
            "Flow",
        ];
        assert_eq!(Schema::from_header(&flow_without_slope), None);
    }

    #[test]
    fn schema_ordering() {
        assert!(Schema::Base < Schema::Slope);
        assert!(Schema::Slope < Schema::Flow);
        assert_eq!(Schema::Slope.max(Schema::Flow), Schema::Flow);
    }
}
