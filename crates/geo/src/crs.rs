//! Coordinate reference system handling.

use std::fmt;

/// Coordinate reference system of a raster or vector layer.
///
/// Only EPSG codes drive reprojection. A CRS declared by some other name is
/// kept for display, and any transform involving it is unsupported.
#[derive(Debug, Clone, PartialEq)]
pub struct Crs {
    epsg: Option<u32>,
    name: Option<String>,
}

impl Crs {
    /// Create a CRS from an EPSG code.
    pub fn from_epsg(code: u32) -> Self {
        Self {
            epsg: Some(code),
            name: None,
        }
    }

    /// Create a CRS known only by name or WKT text.
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            epsg: None,
            name: Some(name.into()),
        }
    }

    /// WGS84 geographic CRS (EPSG:4326).
    pub fn wgs84() -> Self {
        Self::from_epsg(4326)
    }

    /// Parse an OGC CRS name such as `urn:ogc:def:crs:EPSG::32615` or
    /// `EPSG:4326`. `OGC:1.3:CRS84` maps to EPSG:4326.
    pub fn from_ogc_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        if upper.ends_with("CRS84") {
            return Some(Self::wgs84());
        }
        let idx = upper.rfind("EPSG:")?;
        let code = upper[idx + 5..].trim_start_matches(':').parse().ok()?;
        Some(Self::from_epsg(code))
    }

    /// EPSG code, if known.
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Short identifier used in logs and error messages.
    pub fn identifier(&self) -> String {
        if let Some(code) = self.epsg {
            return format!("EPSG:{code}");
        }
        if let Some(name) = &self.name {
            return name.chars().take(50).collect();
        }
        "unknown".to_string()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}
