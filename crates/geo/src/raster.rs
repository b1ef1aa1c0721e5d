//! Elevation raster metadata.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::crs::Crs;
use crate::error::GeoError;
use crate::transform::GeoTransform;

/// Read-only view of a georeferenced single-band grid.
///
/// Only the metadata needed to compute the raster's footprint is exposed;
/// cell values are never read here.
pub trait RasterGrid {
    /// Affine pixel -> world transform.
    fn geo_transform(&self) -> GeoTransform;
    /// Raster size as `(cols, rows)`.
    fn size(&self) -> (usize, usize);
    /// Coordinate reference system, if the raster declares one.
    fn crs(&self) -> Option<&Crs>;
}

/// Plain raster metadata record.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterInfo {
    transform: GeoTransform,
    cols: usize,
    rows: usize,
    crs: Option<Crs>,
}

impl RasterInfo {
    /// Create raster metadata from its parts.
    pub fn new(transform: GeoTransform, cols: usize, rows: usize, crs: Option<Crs>) -> Self {
        Self {
            transform,
            cols,
            rows,
            crs,
        }
    }

    /// Read the header of an ESRI ASCII grid (`.asc`).
    ///
    /// Recognises `ncols`, `nrows`, `xllcorner`/`xllcenter`,
    /// `yllcorner`/`yllcenter`, `cellsize` and `nodata_value` (ignored).
    /// Stops at the first line that is not a header key. The format carries
    /// no CRS, so the caller supplies it.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::FileNotFound`] if the path does not exist, or
    /// [`GeoError::InvalidHeader`] if a required key is missing or malformed.
    pub fn read_ascii_header(path: &Path, crs: Option<Crs>) -> Result<Self, GeoError> {
        if !path.exists() {
            return Err(GeoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let reader = BufReader::new(File::open(path)?);

        let mut ncols = None;
        let mut nrows = None;
        let mut xll = None;
        let mut yll = None;
        let mut centered = false;
        let mut cellsize = None;

        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(key) = parts.next() else {
                continue;
            };
            let key = key.to_ascii_lowercase();
            if key.parse::<f64>().is_ok() {
                break;
            }
            let value = parts.next().ok_or_else(|| GeoError::InvalidHeader {
                reason: format!("key '{key}' has no value"),
            })?;
            let parse_f64 = |v: &str| {
                v.parse::<f64>().map_err(|e| GeoError::InvalidHeader {
                    reason: format!("'{key}' value '{v}' is not a number: {e}"),
                })
            };
            let parse_usize = |v: &str| {
                v.parse::<usize>().map_err(|e| GeoError::InvalidHeader {
                    reason: format!("'{key}' value '{v}' is not a count: {e}"),
                })
            };
            match key.as_str() {
                "ncols" => ncols = Some(parse_usize(value)?),
                "nrows" => nrows = Some(parse_usize(value)?),
                "xllcorner" => xll = Some(parse_f64(value)?),
                "yllcorner" => yll = Some(parse_f64(value)?),
                "xllcenter" => {
                    xll = Some(parse_f64(value)?);
                    centered = true;
                }
                "yllcenter" => {
                    yll = Some(parse_f64(value)?);
                    centered = true;
                }
                "cellsize" => cellsize = Some(parse_f64(value)?),
                "nodata_value" => {}
                other => debug!(key = other, "ignoring unknown ascii grid header key"),
            }
        }

        let missing = |name: &str| GeoError::InvalidHeader {
            reason: format!("missing '{name}'"),
        };
        let cols = ncols.ok_or_else(|| missing("ncols"))?;
        let rows = nrows.ok_or_else(|| missing("nrows"))?;
        let mut x0 = xll.ok_or_else(|| missing("xllcorner"))?;
        let mut y0 = yll.ok_or_else(|| missing("yllcorner"))?;
        let cell = cellsize.ok_or_else(|| missing("cellsize"))?;

        if centered {
            x0 -= cell / 2.0;
            y0 -= cell / 2.0;
        }

        let transform = GeoTransform::new(x0, y0 + rows as f64 * cell, cell, -cell);
        Ok(Self::new(transform, cols, rows, crs))
    }
}

impl RasterGrid for RasterInfo {
    fn geo_transform(&self) -> GeoTransform {
        self.transform
    }

    fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }
}
