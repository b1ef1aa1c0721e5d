//! Pure-Rust WGS84 <-> UTM reprojection (Snyder 1987, USGS formulas).
//!
//! Covers EPSG 4326 and the UTM zones 326xx (north) and 327xx (south), which
//! is what stream and elevation products are almost always delivered in.
//! No libproj dependency.

use geo_types::Coord;

use crate::crs::Crs;
use crate::error::GeoError;

// WGS84 ellipsoid constants
const A: f64 = 6_378_137.0; // semi-major axis (m)
const F: f64 = 1.0 / 298.257_223_563; // flattening
const E2: f64 = 2.0 * F - F * F; // eccentricity squared
const E_PRIME2: f64 = E2 / (1.0 - E2); // second eccentricity squared
const K0: f64 = 0.9996; // UTM scale factor
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Maps a single coordinate from one CRS into another.
pub trait CoordinateTransform {
    /// Transform `(x, y)` in the source CRS into the target CRS.
    fn transform(&self, x: f64, y: f64) -> (f64, f64);
}

/// Reproject every coordinate through `transform`.
///
/// # Errors
///
/// Returns [`GeoError::NonFiniteCoordinate`] if any result is NaN or infinite.
pub fn reproject<T>(coords: &[Coord<f64>], transform: &T) -> Result<Vec<Coord<f64>>, GeoError>
where
    T: CoordinateTransform + ?Sized,
{
    coords
        .iter()
        .map(|c| {
            let (x, y) = transform.transform(c.x, c.y);
            if x.is_finite() && y.is_finite() {
                Ok(Coord { x, y })
            } else {
                Err(GeoError::NonFiniteCoordinate { x, y })
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Projection {
    Wgs84,
    Utm { zone: u32, north: bool },
}

impl Projection {
    fn from_epsg(epsg: u32) -> Option<Self> {
        if epsg == 4326 {
            Some(Self::Wgs84)
        } else if (32601..=32660).contains(&epsg) {
            Some(Self::Utm {
                zone: epsg - 32600,
                north: true,
            })
        } else if (32701..=32760).contains(&epsg) {
            Some(Self::Utm {
                zone: epsg - 32700,
                north: false,
            })
        } else {
            None
        }
    }

    fn unproject(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::Wgs84 => (x, y),
            Self::Utm { zone, north } => utm_to_wgs84(x, y, zone, north),
        }
    }

    fn project(self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Self::Wgs84 => (lon, lat),
            Self::Utm { zone, north } => wgs84_to_utm(lon, lat, zone, north),
        }
    }
}

/// Transformation between two EPSG-identified coordinate systems.
///
/// Geographic coordinates are `(longitude, latitude)` in degrees; projected
/// coordinates are `(easting, northing)` in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsgTransform {
    src: Projection,
    dst: Projection,
    identity: bool,
}

impl EpsgTransform {
    /// Build a transform from `src` to `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::UnsupportedTransform`] unless both CRSs carry an
    /// EPSG code that is either identical or within WGS84 / UTM.
    pub fn new(src: &Crs, dst: &Crs) -> Result<Self, GeoError> {
        let unsupported = || GeoError::UnsupportedTransform {
            src: src.identifier(),
            dst: dst.identifier(),
        };
        let (Some(src_code), Some(dst_code)) = (src.epsg(), dst.epsg()) else {
            return Err(unsupported());
        };
        if src_code == dst_code {
            // Any CRS maps onto itself, supported projection or not.
            return Ok(Self {
                src: Projection::Wgs84,
                dst: Projection::Wgs84,
                identity: true,
            });
        }
        let src = Projection::from_epsg(src_code).ok_or_else(unsupported)?;
        let dst = Projection::from_epsg(dst_code).ok_or_else(unsupported)?;
        Ok(Self {
            src,
            dst,
            identity: false,
        })
    }
}

impl CoordinateTransform for EpsgTransform {
    fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        if self.identity {
            return (x, y);
        }
        let (lon, lat) = self.src.unproject(x, y);
        self.dst.project(lon, lat)
    }
}

fn central_meridian(zone: u32) -> f64 {
    ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians()
}

/// WGS84 (lon, lat) in degrees to UTM (easting, northing) in metres.
fn wgs84_to_utm(lon_deg: f64, lat_deg: f64, zone: u32, north: bool) -> (f64, f64) {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let lon0 = central_meridian(zone);

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let tan_lat = lat.tan();

    let n = A / (1.0 - E2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = E_PRIME2 * cos_lat * cos_lat;
    let a_coeff = cos_lat * (lon - lon0);
    let m = meridional_arc(lat);

    let a2 = a_coeff * a_coeff;
    let a4 = a2 * a2;
    let a6 = a4 * a2;

    // Snyder eq. 8-9
    let easting = K0
        * n
        * (a_coeff
            + (1.0 - t + c) * a2 * a_coeff / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * E_PRIME2) * a4 * a_coeff / 120.0)
        + FALSE_EASTING;

    // Snyder eq. 8-10
    let northing = K0
        * (m + n
            * tan_lat
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * E_PRIME2) * a6 / 720.0));

    let northing = if north {
        northing
    } else {
        northing + FALSE_NORTHING_SOUTH
    };

    (easting, northing)
}

/// UTM (easting, northing) in metres to WGS84 (lon, lat) in degrees.
fn utm_to_wgs84(easting: f64, northing: f64, zone: u32, north: bool) -> (f64, f64) {
    let x = easting - FALSE_EASTING;
    let y = if north {
        northing
    } else {
        northing - FALSE_NORTHING_SOUTH
    };

    let e4 = E2 * E2;
    let e6 = e4 * E2;

    // Footpoint latitude (Snyder eq. 7-19, 3-26)
    let m = y / K0;
    let mu = m / (A * (1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
    let e1 = (1.0 - (1.0 - E2).sqrt()) / (1.0 + (1.0 - E2).sqrt());
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let c1 = E_PRIME2 * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let denom = 1.0 - E2 * sin_phi1 * sin_phi1;
    let n1 = A / denom.sqrt();
    let r1 = A * (1.0 - E2) / denom.powf(1.5);
    let d = x / (n1 * K0);

    let d2 = d * d;
    let d4 = d2 * d2;
    let d6 = d4 * d2;

    // Snyder eq. 8-17
    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * E_PRIME2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                    - 252.0 * E_PRIME2
                    - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    // Snyder eq. 8-18
    let lon = central_meridian(zone)
        + (d - (1.0 + 2.0 * t1 + c1) * d2 * d / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * E_PRIME2 + 24.0 * t1 * t1)
                * d4
                * d
                / 120.0)
            / cos_phi1;

    (lon.to_degrees(), lat.to_degrees())
}

/// Meridional arc from the equator to `lat` (radians). Snyder eq. 3-21.
fn meridional_arc(lat: f64) -> f64 {
    let e4 = E2 * E2;
    let e6 = e4 * E2;

    A * ((1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
        - (3.0 * E2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn central_meridian_on_equator() {
        // Zone 30 is centred on 3 degrees west.
        let (e, n) = wgs84_to_utm(-3.0, 0.0, 30, true);
        assert_relative_eq!(e, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(n, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn southern_hemisphere_false_northing() {
        let (_, n) = wgs84_to_utm(-57.0, -0.0, 21, false);
        assert_relative_eq!(n, FALSE_NORTHING_SOUTH, epsilon = 1e-6);
    }

    #[test]
    fn forward_inverse_round_trip() {
        let samples = [
            (-93.2, 44.9, 15, true),
            (-95.9, 30.1, 15, true),
            (-58.4, -34.6, 21, false),
            (10.7, 59.9, 32, true),
        ];
        for (lon, lat, zone, north) in samples {
            let (e, n) = wgs84_to_utm(lon, lat, zone, north);
            let (lon2, lat2) = utm_to_wgs84(e, n, zone, north);
            assert_relative_eq!(lon2, lon, epsilon = 1e-6);
            assert_relative_eq!(lat2, lat, epsilon = 1e-6);
        }
    }

    #[test]
    fn epsg_transform_identity() {
        let t = EpsgTransform::new(&Crs::from_epsg(3857), &Crs::from_epsg(3857)).unwrap();
        assert_eq!(t.transform(12.5, -7.0), (12.5, -7.0));
    }

    #[test]
    fn epsg_transform_wgs84_to_utm() {
        let t = EpsgTransform::new(&Crs::wgs84(), &Crs::from_epsg(32630)).unwrap();
        let (e, n) = t.transform(-3.0, 0.0);
        assert_relative_eq!(e, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(n, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn epsg_transform_utm_to_utm_via_wgs84() {
        let there = EpsgTransform::new(&Crs::from_epsg(32615), &Crs::from_epsg(32614)).unwrap();
        let back = EpsgTransform::new(&Crs::from_epsg(32614), &Crs::from_epsg(32615)).unwrap();
        let (x, y) = there.transform(400_000.0, 4_800_000.0);
        let (x2, y2) = back.transform(x, y);
        assert_relative_eq!(x2, 400_000.0, epsilon = 0.05);
        assert_relative_eq!(y2, 4_800_000.0, epsilon = 0.05);
    }

    #[test]
    fn epsg_transform_unsupported() {
        let err = EpsgTransform::new(&Crs::from_epsg(3857), &Crs::wgs84()).unwrap_err();
        assert!(matches!(err, GeoError::UnsupportedTransform { .. }));

        let err = EpsgTransform::new(&Crs::from_name("PROJCS[]"), &Crs::wgs84()).unwrap_err();
        assert!(matches!(err, GeoError::UnsupportedTransform { .. }));
    }

    #[test]
    fn reproject_rejects_non_finite() {
        struct Broken;
        impl CoordinateTransform for Broken {
            fn transform(&self, _x: f64, _y: f64) -> (f64, f64) {
                (f64::INFINITY, 0.0)
            }
        }
        let coords = [Coord { x: 1.0, y: 2.0 }];
        let err = reproject(&coords, &Broken).unwrap_err();
        assert!(matches!(err, GeoError::NonFiniteCoordinate { .. }));
    }
}
