//! Slope and flow taken straight from vector attributes.

use std::collections::HashMap;

use floodprep_geo::{FieldValue, VectorLayer};
use floodprep_table::StreamInfoTable;
use tracing::{info, info_span, warn};

use crate::error::InjectError;

/// Table column an attribute is written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeColumn {
    /// Column 6.
    Slope,
    /// Column 7.
    Flow,
}

impl AttributeColumn {
    fn name(self) -> &'static str {
        match self {
            Self::Slope => "slope",
            Self::Flow => "flow",
        }
    }
}

/// Copy `value_field` from every feature of `layer` onto the rows whose
/// stream ID equals the feature's `id_field`.
///
/// Feature IDs are parsed as floats and truncated, so `"12.0"` and `12.9`
/// both address stream 12. When several features map to one stream the
/// last one wins. A null value leaves the column unset, as do streams no
/// feature reaches. Row order and the other columns are untouched.
///
/// # Errors
///
/// Returns [`InjectError::FeatureId`] if a feature lacks `id_field` or its
/// value is not numeric.
pub fn inject_attribute<L>(
    table: &StreamInfoTable,
    layer: &L,
    id_field: &str,
    value_field: &str,
    column: AttributeColumn,
) -> Result<StreamInfoTable, InjectError>
where
    L: VectorLayer + ?Sized,
{
    let _span = info_span!("inject_attribute", column = column.name(), value_field).entered();

    let mut values: HashMap<i64, Option<f64>> = HashMap::new();
    let mut n_features = 0usize;
    for (i, feature) in layer.features().enumerate() {
        n_features += 1;
        let raw = feature.field(id_field).unwrap_or(&FieldValue::Null);
        let id = raw.truncated_id().ok_or_else(|| InjectError::FeatureId {
            feature: i,
            field: id_field.to_string(),
            value: match raw {
                FieldValue::Null => "missing".to_string(),
                other => format!("{other:?}"),
            },
        })?;
        let value = feature.field(value_field).and_then(FieldValue::as_f64);
        values.insert(id, value);
    }

    let index = table.index();
    let matched: usize = values.keys().map(|&id| index.rows_for(id).len()).sum();
    let unmatched = table.len() - matched;
    info!(features = n_features, streams = values.len(), matched, "attributes collected");
    if unmatched > 0 {
        warn!(rows = unmatched, "rows matched by no feature left unset");
    }

    let lookup = |id: i64| values.get(&id).copied().flatten();
    Ok(match column {
        AttributeColumn::Slope => table.with_slopes(lookup),
        AttributeColumn::Flow => table.with_flows(lookup),
    })
}
