//! Affine geotransform for rasters.

use geo_types::Coord;

/// Affine transformation coefficients for georeferencing a raster.
///
/// Converts pixel coordinates (col, row) to world coordinates (x, y):
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// For north-up rasters both rotation terms are 0 and `pixel_height` is
/// negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner.
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner.
    pub origin_y: f64,
    /// Cell size in the x direction.
    pub pixel_width: f64,
    /// Cell size in the y direction, usually negative.
    pub pixel_height: f64,
    /// Row contribution to x (usually 0).
    pub row_rotation: f64,
    /// Column contribution to y (usually 0).
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Create a north-up transform with no rotation.
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// Create from the GDAL coefficient order
    /// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// World coordinates of the top-left corner of pixel `(col, row)`.
    pub fn pixel_to_geo_corner(&self, col: usize, row: usize) -> Coord<f64> {
        let col_f = col as f64;
        let row_f = row as f64;
        Coord {
            x: self.origin_x + col_f * self.pixel_width + row_f * self.row_rotation,
            y: self.origin_y + col_f * self.col_rotation + row_f * self.pixel_height,
        }
    }

    /// The four outer corners of a `cols` x `rows` raster, in the order
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn extent(&self, cols: usize, rows: usize) -> [Coord<f64>; 4] {
        [
            self.pixel_to_geo_corner(0, 0),
            self.pixel_to_geo_corner(cols, 0),
            self.pixel_to_geo_corner(cols, rows),
            self.pixel_to_geo_corner(0, rows),
        ]
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}
