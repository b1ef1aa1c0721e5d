//! # floodprep-geo
//!
//! Geometry alignment between an elevation raster and a stream vector layer.
//!
//! The raster's corner extent is computed from its affine transform, carried
//! into the layer's coordinate system, and installed as a spatial filter so
//! only overlapping stream features are scanned. Failure to build the filter
//! is reported as [`SpatialFilter::Skipped`] rather than an error: iterating
//! the whole layer is slower but still correct.

mod crs;
mod error;
mod filter;
mod geojson_layer;
mod geotiff;
mod layer;
mod raster;
mod reproject;
mod transform;

pub use crs::Crs;
pub use error::GeoError;
pub use filter::{SpatialFilter, apply_spatial_filter, raster_extent_polygon};
pub use geojson_layer::read_geojson;
pub use layer::{Feature, FieldValue, MemoryLayer, VectorLayer};
pub use raster::{RasterGrid, RasterInfo};
pub use reproject::{CoordinateTransform, EpsgTransform, reproject};
pub use transform::GeoTransform;

pub use geo_types::{Coord, Geometry, LineString, Point, Polygon};
