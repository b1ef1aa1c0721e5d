//! Spatial filtering of a vector layer by a raster's footprint.

use geo_types::{LineString, Polygon};
use tracing::{info, warn};

use crate::crs::Crs;
use crate::error::GeoError;
use crate::layer::VectorLayer;
use crate::raster::RasterGrid;
use crate::reproject::{EpsgTransform, reproject};

/// Outcome of [`apply_spatial_filter`].
#[derive(Debug, Clone, PartialEq)]
pub enum SpatialFilter {
    /// The raster footprint, in the layer's CRS, was installed as the filter.
    Applied(Polygon<f64>),
    /// No filter was installed; the layer iterates every feature.
    Skipped {
        /// Why the filter could not be built.
        reason: String,
    },
}

impl SpatialFilter {
    /// Whether a filter polygon was installed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Build the raster's corner polygon reprojected into `target`.
///
/// # Errors
///
/// Returns [`GeoError::MissingCrs`] if the raster has no CRS,
/// [`GeoError::UnsupportedTransform`] if no transform exists, or
/// [`GeoError::NonFiniteCoordinate`] if reprojection breaks down.
pub fn raster_extent_polygon<R>(raster: &R, target: &Crs) -> Result<Polygon<f64>, GeoError>
where
    R: RasterGrid + ?Sized,
{
    let src = raster.crs().ok_or(GeoError::MissingCrs {
        what: "elevation raster",
    })?;
    let (cols, rows) = raster.size();
    let corners = raster.geo_transform().extent(cols, rows);

    let transform = EpsgTransform::new(src, target)?;
    let corners = reproject(&corners, &transform)?;

    // Polygon::new closes the ring.
    Ok(Polygon::new(LineString::from(corners), vec![]))
}

/// Restrict `layer` to the features overlapping `raster`.
///
/// Never fails: any problem building the filter is logged and reported as
/// [`SpatialFilter::Skipped`], leaving the layer unfiltered.
pub fn apply_spatial_filter<L, R>(layer: &mut L, raster: &R) -> SpatialFilter
where
    L: VectorLayer + ?Sized,
    R: RasterGrid + ?Sized,
{
    info!("attempting to filter stream layer by raster extent");
    let polygon = layer
        .spatial_ref()
        .ok_or(GeoError::MissingCrs {
            what: "stream layer",
        })
        .and_then(|target| raster_extent_polygon(raster, target));

    match polygon {
        Ok(polygon) => {
            layer.set_spatial_filter(Some(polygon.clone()));
            SpatialFilter::Applied(polygon)
        }
        Err(e) => {
            warn!(error = %e, "skipping filter, this may take longer");
            layer.set_spatial_filter(None);
            SpatialFilter::Skipped {
                reason: e.to_string(),
            }
        }
    }
}
