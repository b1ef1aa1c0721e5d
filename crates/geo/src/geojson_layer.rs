//! Load a stream layer from a GeoJSON FeatureCollection.

use std::path::Path;

use geojson::GeoJson;
use serde_json::Value;
use tracing::info;

use crate::crs::Crs;
use crate::error::GeoError;
use crate::layer::{Feature, FieldValue, MemoryLayer};

/// Read a GeoJSON FeatureCollection into a [`MemoryLayer`].
///
/// The legacy `crs` member (`{"type": "name", "properties": {"name":
/// "urn:ogc:def:crs:EPSG::32615"}}`) sets the layer CRS; without it the
/// RFC 7946 default of EPSG:4326 applies. A name without an EPSG code is
/// kept as is, so the layer cannot be reprojected.
///
/// # Errors
///
/// Returns [`GeoError::FileNotFound`] if the path does not exist, or
/// [`GeoError::GeoJson`] if the document is not a FeatureCollection or a
/// geometry cannot be converted.
pub fn read_geojson(path: &Path) -> Result<MemoryLayer, GeoError> {
    if !path.exists() {
        return Err(GeoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let geojson: GeoJson = text.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeoError::GeoJson {
            reason: format!("{} is not a FeatureCollection", path.display()),
        });
    };

    let crs = collection
        .foreign_members
        .as_ref()
        .and_then(|m| m.get("crs"))
        .and_then(|crs| crs.pointer("/properties/name"))
        .and_then(Value::as_str)
        .map(|name| Crs::from_ogc_name(name).unwrap_or_else(|| Crs::from_name(name)))
        .unwrap_or_else(Crs::wgs84);

    let mut features = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let geometry = feature
            .geometry
            .map(geo_types::Geometry::<f64>::try_from)
            .transpose()?;
        let mut out = Feature::new(geometry);
        if let Some(properties) = feature.properties {
            for (name, value) in properties {
                out = out.with_field(name, field_value(value));
            }
        }
        features.push(out);
    }

    info!(
        path = %path.display(),
        n_features = features.len(),
        crs = %crs,
        "loaded stream layer"
    );
    Ok(MemoryLayer::new(Some(crs), features))
}

fn field_value(value: Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Int(i64::from(b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Int(i),
            None => n.as_f64().map_or(FieldValue::Null, FieldValue::Float),
        },
        Value::String(s) => FieldValue::Text(s),
        other => FieldValue::Text(other.to_string()),
    }
}
