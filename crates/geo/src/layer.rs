//! Vector layer abstraction and an in-memory implementation.

use std::collections::HashMap;

use geo::Intersects;
use geo_types::{Geometry, Polygon};

use crate::crs::Crs;

/// Attribute value attached to a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Missing / null attribute.
    Null,
    /// Integer attribute.
    Int(i64),
    /// Floating-point attribute.
    Float(f64),
    /// Text attribute.
    Text(String),
}

impl FieldValue {
    /// Interpret the value as an integer stream ID by parsing it as a float
    /// and truncating toward zero.
    ///
    /// Sources often serialise integer IDs as `"1234.0"`, which a plain
    /// integer parse rejects. Returns `None` for nulls, unparseable text and
    /// non-finite numbers.
    pub fn truncated_id(&self) -> Option<i64> {
        let value = match self {
            Self::Null => return None,
            Self::Int(i) => return Some(*i),
            Self::Float(f) => *f,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then(|| value.trunc() as i64)
    }

    /// Interpret the value as a number. Text is parsed; null yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A vector feature: optional geometry plus named attributes.
#[derive(Debug, Clone, Default)]
pub struct Feature {
    geometry: Option<Geometry<f64>>,
    fields: HashMap<String, FieldValue>,
}

impl Feature {
    /// Create a feature with the given geometry and no attributes.
    pub fn new(geometry: Option<Geometry<f64>>) -> Self {
        Self {
            geometry,
            fields: HashMap::new(),
        }
    }

    /// Add or replace an attribute.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Look up an attribute by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Feature geometry, if any.
    pub fn geometry(&self) -> Option<&Geometry<f64>> {
        self.geometry.as_ref()
    }
}

/// A readable vector layer with an optional spatial read filter.
pub trait VectorLayer {
    /// Coordinate reference system of the layer's geometries.
    fn spatial_ref(&self) -> Option<&Crs>;

    /// Install (or clear, with `None`) a polygon restricting iteration to
    /// intersecting features.
    fn set_spatial_filter(&mut self, filter: Option<Polygon<f64>>);

    /// Currently installed spatial filter.
    fn spatial_filter(&self) -> Option<&Polygon<f64>>;

    /// Iterate over the features passing the current spatial filter.
    fn features(&self) -> Box<dyn Iterator<Item = &Feature> + '_>;
}

/// Vector layer held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayer {
    crs: Option<Crs>,
    features: Vec<Feature>,
    filter: Option<Polygon<f64>>,
}

impl MemoryLayer {
    /// Create a layer from features in the given CRS.
    pub fn new(crs: Option<Crs>, features: Vec<Feature>) -> Self {
        Self {
            crs,
            features,
            filter: None,
        }
    }

    /// Replace the layer's CRS, e.g. when the source file does not declare
    /// one.
    pub fn with_crs(mut self, crs: Option<Crs>) -> Self {
        self.crs = crs;
        self
    }

    /// Total number of features, ignoring the filter.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the layer has no features at all.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl VectorLayer for MemoryLayer {
    fn spatial_ref(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    fn set_spatial_filter(&mut self, filter: Option<Polygon<f64>>) {
        self.filter = filter;
    }

    fn spatial_filter(&self) -> Option<&Polygon<f64>> {
        self.filter.as_ref()
    }

    fn features(&self) -> Box<dyn Iterator<Item = &Feature> + '_> {
        match &self.filter {
            None => Box::new(self.features.iter()),
            Some(filter) => Box::new(
                self.features
                    .iter()
                    .filter(move |f| f.geometry().is_some_and(|g| g.intersects(filter))),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, Point};

    fn square(min: f64, max: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(min, min), (max, min), (max, max), (min, max)]),
            vec![],
        )
    }

    #[test]
    fn truncated_id_float_text() {
        assert_eq!(FieldValue::Text("1234.0".into()).truncated_id(), Some(1234));
        assert_eq!(FieldValue::Text(" 77.9 ".into()).truncated_id(), Some(77));
        assert_eq!(FieldValue::Float(-3.7).truncated_id(), Some(-3));
        assert_eq!(FieldValue::Int(42).truncated_id(), Some(42));
    }

    #[test]
    fn truncated_id_rejects_garbage() {
        assert_eq!(FieldValue::Null.truncated_id(), None);
        assert_eq!(FieldValue::Text("abc".into()).truncated_id(), None);
        assert_eq!(FieldValue::Float(f64::NAN).truncated_id(), None);
    }

    #[test]
    fn as_f64_variants() {
        assert_eq!(FieldValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(FieldValue::Text("0.003".into()).as_f64(), Some(0.003));
        assert_eq!(FieldValue::Null.as_f64(), None);
    }

    #[test]
    fn filter_restricts_iteration() {
        let inside = Feature::new(Some(Geometry::Point(Point::new(5.0, 5.0))))
            .with_field("id", FieldValue::Int(1));
        let crossing = Feature::new(Some(Geometry::LineString(LineString::from(vec![
            (-5.0, 5.0),
            (5.0, 5.0),
        ]))))
        .with_field("id", FieldValue::Int(2));
        let outside = Feature::new(Some(Geometry::Point(Point::new(50.0, 50.0))))
            .with_field("id", FieldValue::Int(3));
        let no_geom = Feature::new(None).with_field("id", FieldValue::Int(4));

        let mut layer = MemoryLayer::new(None, vec![inside, crossing, outside, no_geom]);
        assert_eq!(layer.features().count(), 4);

        layer.set_spatial_filter(Some(square(0.0, 10.0)));
        let ids: Vec<i64> = layer
            .features()
            .filter_map(|f| f.field("id").and_then(FieldValue::truncated_id))
            .collect();
        assert_eq!(ids, vec![1, 2]);

        layer.set_spatial_filter(None);
        assert_eq!(layer.features().count(), 4);
    }
}
