//! GeoTIFF georeferencing, read without decoding pixel data.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tiff::decoder::Decoder;
use tiff::tags::Tag;
use tracing::debug;

use crate::crs::Crs;
use crate::error::GeoError;
use crate::raster::RasterInfo;
use crate::transform::GeoTransform;

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const MODEL_TRANSFORMATION: u16 = 34264;
const GEO_KEY_DIRECTORY: u16 = 34735;

const GT_RASTER_TYPE_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_KEY: u16 = 3072;

const RASTER_PIXEL_IS_POINT: u16 = 2;
const USER_DEFINED: u16 = 32767;

fn tag(code: u16) -> Tag {
    Tag::from_u16_exhaustive(code)
}

fn f64_tag<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    code: u16,
) -> Result<Option<Vec<f64>>, GeoError> {
    decoder
        .find_tag(tag(code))?
        .map(|v| v.into_f64_vec())
        .transpose()
        .map_err(GeoError::from)
}

/// Short-valued GeoKeys as `(key, value)` pairs.
///
/// Keys stored in the double or ASCII parameter tags are skipped.
fn geo_keys(directory: &[u16]) -> Vec<(u16, u16)> {
    let Some(header) = directory.get(..4) else {
        return Vec::new();
    };
    let n = usize::from(header[3]);
    directory[4..]
        .chunks_exact(4)
        .take(n)
        .filter(|entry| entry[1] == 0)
        .map(|entry| (entry[0], entry[3]))
        .collect()
}

fn key_value(keys: &[(u16, u16)], key: u16) -> Option<u16> {
    keys.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// EPSG code declared by the GeoKey directory, projected before geographic.
fn declared_epsg(keys: &[(u16, u16)]) -> Option<u32> {
    [PROJECTED_CS_TYPE_KEY, GEOGRAPHIC_TYPE_KEY]
        .into_iter()
        .filter_map(|k| key_value(keys, k))
        .find(|code| *code != 0 && *code != USER_DEFINED)
        .map(u32::from)
}

fn read_transform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<GeoTransform, GeoError> {
    let scale = f64_tag(decoder, MODEL_PIXEL_SCALE)?;
    let tiepoint = f64_tag(decoder, MODEL_TIEPOINT)?;

    if let (Some(scale), Some(tiepoint)) = (&scale, &tiepoint)
        && scale.len() >= 2
        && tiepoint.len() >= 6
    {
        // tiepoint: [I, J, K, X, Y, Z]; scale: [ScaleX, ScaleY, ScaleZ]
        let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
        let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
        return Ok(GeoTransform::new(origin_x, origin_y, scale[0], -scale[1]));
    }

    if let Some(m) = f64_tag(decoder, MODEL_TRANSFORMATION)? {
        if m.len() < 8 {
            return Err(GeoError::InvalidHeader {
                reason: format!("model transformation has {} values, expected 16", m.len()),
            });
        }
        // Row-major 4x4: x = m0*col + m1*row + m3, y = m4*col + m5*row + m7
        return Ok(GeoTransform::from_gdal([m[3], m[0], m[1], m[7], m[4], m[5]]));
    }

    Err(GeoError::InvalidHeader {
        reason: "no pixel scale and tiepoint or model transformation tags".to_string(),
    })
}

impl RasterInfo {
    /// Read the georeferencing of a GeoTIFF.
    ///
    /// The grid comes from `ModelPixelScale` + `ModelTiepoint`, or from an
    /// `ModelTransformation` matrix. Pixel-is-point rasters are shifted
    /// half a cell to corner registration. `crs` overrides the EPSG code
    /// declared in the GeoKey directory.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::FileNotFound`] if the path does not exist,
    /// [`GeoError::Tiff`] if the file is not a readable TIFF, or
    /// [`GeoError::InvalidHeader`] if it carries no usable georeferencing.
    pub fn read_geotiff(path: &Path, crs: Option<Crs>) -> Result<Self, GeoError> {
        if !path.exists() {
            return Err(GeoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let mut decoder = Decoder::new(BufReader::new(File::open(path)?))?;
        let (width, height) = decoder.dimensions()?;
        let mut transform = read_transform(&mut decoder)?;

        let keys = decoder
            .find_tag(tag(GEO_KEY_DIRECTORY))?
            .map(|v| v.into_u16_vec())
            .transpose()?
            .map(|dir| geo_keys(&dir))
            .unwrap_or_default();

        if key_value(&keys, GT_RASTER_TYPE_KEY) == Some(RASTER_PIXEL_IS_POINT) {
            transform.origin_x -= transform.pixel_width / 2.0;
            transform.origin_y -= transform.pixel_height / 2.0;
        }

        let crs = crs.or_else(|| declared_epsg(&keys).map(Crs::from_epsg));
        debug!(
            path = %path.display(),
            cols = width,
            rows = height,
            crs = ?crs,
            "read geotiff georeferencing"
        );
        Ok(Self::new(transform, width as usize, height as usize, crs))
    }

    /// Read raster metadata, choosing the format by extension.
    ///
    /// `.asc` files are read as ESRI ASCII grids; everything else as
    /// GeoTIFF.
    ///
    /// # Errors
    ///
    /// Propagates the error of the chosen reader.
    pub fn open(path: &Path, crs: Option<Crs>) -> Result<Self, GeoError> {
        let is_ascii = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("asc"));
        if is_ascii {
            Self::read_ascii_header(path, crs)
        } else {
            Self::read_geotiff(path, crs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterGrid;
    use approx::assert_relative_eq;
    use tempfile::tempdir;
    use tiff::encoder::TiffEncoder;
    use tiff::encoder::colortype::Gray32Float;

    fn write_dem(path: &Path, cols: u32, rows: u32, tags: &[(u16, Vec<f64>)], keys: &[u16]) {
        let mut encoder = TiffEncoder::new(File::create(path).unwrap()).unwrap();
        let mut image = encoder.new_image::<Gray32Float>(cols, rows).unwrap();
        for (code, values) in tags {
            image
                .encoder()
                .write_tag(tag(*code), values.as_slice())
                .unwrap();
        }
        if !keys.is_empty() {
            image
                .encoder()
                .write_tag(tag(GEO_KEY_DIRECTORY), keys)
                .unwrap();
        }
        let data = vec![0.0f32; (cols * rows) as usize];
        image.write_data(&data).unwrap();
    }

    fn utm_keys(raster_type: u16) -> Vec<u16> {
        vec![
            1, 1, 0, 3, //
            1024, 0, 1, 1, //
            GT_RASTER_TYPE_KEY, 0, 1, raster_type, //
            PROJECTED_CS_TYPE_KEY, 0, 1, 32615,
        ]
    }

    #[test]
    fn scale_and_tiepoint_with_epsg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dem.tif");
        write_dem(
            &path,
            4,
            3,
            &[
                (MODEL_PIXEL_SCALE, vec![10.0, 10.0, 0.0]),
                (MODEL_TIEPOINT, vec![0.0, 0.0, 0.0, 500_000.0, 4_980_000.0, 0.0]),
            ],
            &utm_keys(1),
        );

        let info = RasterInfo::read_geotiff(&path, None).unwrap();
        assert_eq!(info.size(), (4, 3));
        assert_eq!(info.crs(), Some(&Crs::from_epsg(32615)));
        let gt = info.geo_transform();
        assert_relative_eq!(gt.origin_x, 500_000.0);
        assert_relative_eq!(gt.origin_y, 4_980_000.0);
        assert_relative_eq!(gt.pixel_width, 10.0);
        assert_relative_eq!(gt.pixel_height, -10.0);
    }

    #[test]
    fn configured_crs_overrides_geokeys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dem.tif");
        write_dem(
            &path,
            2,
            2,
            &[
                (MODEL_PIXEL_SCALE, vec![1.0, 1.0, 0.0]),
                (MODEL_TIEPOINT, vec![0.0, 0.0, 0.0, 0.0, 2.0, 0.0]),
            ],
            &utm_keys(1),
        );
        let info = RasterInfo::read_geotiff(&path, Some(Crs::from_epsg(32616))).unwrap();
        assert_eq!(info.crs(), Some(&Crs::from_epsg(32616)));
    }

    #[test]
    fn pixel_is_point_shifts_half_cell() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dem.tif");
        write_dem(
            &path,
            2,
            2,
            &[
                (MODEL_PIXEL_SCALE, vec![10.0, 10.0, 0.0]),
                (MODEL_TIEPOINT, vec![0.0, 0.0, 0.0, 100.0, 200.0, 0.0]),
            ],
            &utm_keys(RASTER_PIXEL_IS_POINT),
        );
        let gt = RasterInfo::read_geotiff(&path, None).unwrap().geo_transform();
        assert_relative_eq!(gt.origin_x, 95.0);
        assert_relative_eq!(gt.origin_y, 205.0);
    }

    #[test]
    fn model_transformation_without_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dem.tif");
        let m = vec![
            30.0, 0.0, 0.0, 1000.0, //
            0.0, -30.0, 0.0, 9000.0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        write_dem(&path, 5, 5, &[(MODEL_TRANSFORMATION, m)], &[]);

        let info = RasterInfo::read_geotiff(&path, None).unwrap();
        assert_eq!(info.crs(), None);
        let gt = info.geo_transform();
        assert_relative_eq!(gt.origin_x, 1000.0);
        assert_relative_eq!(gt.origin_y, 9000.0);
        assert_relative_eq!(gt.pixel_height, -30.0);
    }

    #[test]
    fn rotated_model_transformation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dem.tif");
        let m = vec![
            1.0, 0.5, 0.0, 10.0, //
            0.25, -1.0, 0.0, 20.0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        write_dem(&path, 4, 2, &[(MODEL_TRANSFORMATION, m)], &[]);

        let gt = RasterInfo::read_geotiff(&path, None).unwrap().geo_transform();
        let [_, tr, br, _] = gt.extent(4, 2);
        assert_relative_eq!(tr.x, 14.0);
        assert_relative_eq!(tr.y, 21.0);
        assert_relative_eq!(br.x, 15.0);
        assert_relative_eq!(br.y, 19.0);
    }

    #[test]
    fn plain_tiff_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.tif");
        write_dem(&path, 2, 2, &[], &[]);
        let err = RasterInfo::read_geotiff(&path, None).unwrap_err();
        assert!(matches!(err, GeoError::InvalidHeader { .. }));
    }

    #[test]
    fn truncated_tiff_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.tif");
        std::fs::write(&path, b"II*\0\xff\xff\xff\xffnot a tiff").unwrap();
        assert!(RasterInfo::read_geotiff(&path, None).is_err());
    }

    #[test]
    fn open_dispatches_on_extension() {
        let dir = tempdir().unwrap();
        let asc = dir.path().join("dem.ASC");
        std::fs::write(&asc, "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\n").unwrap();
        assert_eq!(RasterInfo::open(&asc, None).unwrap().size(), (2, 2));

        let tif = dir.path().join("dem.tif");
        std::fs::write(&tif, "ncols 2\n").unwrap();
        assert!(matches!(
            RasterInfo::open(&tif, None).unwrap_err(),
            GeoError::Tiff { .. }
        ));
    }

    #[test]
    fn geo_keys_skip_non_inline_values() {
        let dir = [1, 1, 0, 2, 3072, 34736, 1, 0, 2048, 0, 1, 4326];
        assert_eq!(geo_keys(&dir), vec![(2048, 4326)]);
        assert_eq!(declared_epsg(&geo_keys(&dir)), Some(4326));
        assert!(geo_keys(&[1, 1]).is_empty());
    }
}
