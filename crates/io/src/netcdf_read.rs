//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::IoError;
use crate::time::{offsets_to_datetimes, parse_time_units};

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Name of the first alias present in `file`.
pub(crate) fn find_variable<'a>(
    file: &netcdf::File,
    aliases: &[&'a str],
    path: &Path,
) -> Result<&'a str, IoError> {
    aliases
        .iter()
        .copied()
        .find(|alias| file.variable(alias).is_some())
        .ok_or_else(|| IoError::MissingVariable {
            name: aliases.first().copied().unwrap_or("unknown").to_string(),
            path: path.to_path_buf(),
        })
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 1-D integer ID variable, trying each alias in order.
pub(crate) fn read_1d_ids(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<i64>, IoError> {
    let name = find_variable(file, aliases, path)?;
    let var = file
        .variable(name)
        .ok_or_else(|| IoError::MissingVariable {
            name: name.to_string(),
            path: path.to_path_buf(),
        })?;
    Ok(var.get_values::<i64, _>(..)?)
}

/// Read a CF time variable into datetimes.
///
/// Returns `Ok(None)` if the variable is absent, and an error if it exists
/// but has no parseable `units` attribute.
pub(crate) fn read_time_axis(
    file: &netcdf::File,
    time_var: &str,
) -> Result<Option<Vec<NaiveDateTime>>, IoError> {
    let Some(var) = file.variable(time_var) else {
        return Ok(None);
    };

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    let (unit, epoch) = parse_time_units(&units_str)?;
    let offsets = var.get_values::<f64, _>(..)?;
    offsets_to_datetimes(unit, epoch, &offsets).map(Some)
}

/// Dimension names of a variable, in order.
pub(crate) fn dimension_names(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<Vec<(String, usize)>, IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;
    Ok(var
        .dimensions()
        .iter()
        .map(|d| (d.name(), d.len()))
        .collect())
}
