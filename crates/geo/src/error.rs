//! Error types for floodprep-geo.

use std::path::PathBuf;

/// Error type for all fallible operations in the floodprep-geo crate.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an underlying filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when one side of a coordinate transformation has no CRS.
    #[error("{what} has no coordinate reference system")]
    MissingCrs {
        /// Which dataset lacked a CRS.
        what: &'static str,
    },

    /// Returned when no transformation between two CRSs is available.
    #[error("unsupported coordinate transformation: {src} -> {dst}")]
    UnsupportedTransform {
        /// Source CRS identifier.
        src: String,
        /// Target CRS identifier.
        dst: String,
    },

    /// Returned when reprojection produces NaN or infinite coordinates.
    #[error("reprojected coordinate is not finite: ({x}, {y})")]
    NonFiniteCoordinate {
        /// Offending x value.
        x: f64,
        /// Offending y value.
        y: f64,
    },

    /// Returned when a raster header cannot be parsed.
    #[error("invalid raster header: {reason}")]
    InvalidHeader {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a TIFF file cannot be decoded.
    #[error("tiff error: {reason}")]
    Tiff {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a GeoJSON document cannot be parsed or converted.
    #[error("geojson error: {reason}")]
    GeoJson {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<tiff::TiffError> for GeoError {
    fn from(e: tiff::TiffError) -> Self {
        GeoError::Tiff {
            reason: e.to_string(),
        }
    }
}

impl From<geojson::Error> for GeoError {
    fn from(e: geojson::Error) -> Self {
        GeoError::GeoJson {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_crs() {
        let err = GeoError::MissingCrs {
            what: "stream layer",
        };
        assert_eq!(
            err.to_string(),
            "stream layer has no coordinate reference system"
        );
    }

    #[test]
    fn display_unsupported_transform() {
        let err = GeoError::UnsupportedTransform {
            src: "EPSG:3857".to_string(),
            dst: "EPSG:4326".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported coordinate transformation: EPSG:3857 -> EPSG:4326"
        );
    }

    #[test]
    fn display_invalid_header() {
        let err = GeoError::InvalidHeader {
            reason: "missing ncols".to_string(),
        };
        assert_eq!(err.to_string(), "invalid raster header: missing ncols");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<GeoError>();
    }
}
