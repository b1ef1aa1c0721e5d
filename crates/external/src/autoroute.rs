//! The AutoRoute executable's preprocessing modes.

use std::path::{Path, PathBuf};

use tracing::info_span;

use crate::error::ExternalError;
use crate::run::run_positional;

/// Handle on an AutoRoute executable.
#[derive(Debug, Clone)]
pub struct AutoRouteTool {
    executable: PathBuf,
}

impl AutoRouteTool {
    /// Wrap the executable at `executable`.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Path of the executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Write a stream info table with flow directions from a stream raster.
    pub fn stream_info_with_direction(
        &self,
        stream_raster: &Path,
        stream_info_file: &Path,
        search_radius: u32,
    ) -> Result<String, ExternalError> {
        let _span = info_span!("stream_info_with_direction").entered();
        run_positional(
            &self.executable,
            [
                stream_raster.as_os_str().to_owned(),
                stream_info_file.as_os_str().to_owned(),
                search_radius.to_string().into(),
            ],
        )
    }

    /// Generate a Manning's n raster from land use on the elevation grid.
    pub fn manning_n_raster(
        &self,
        land_use: &Path,
        dem: &Path,
        manning_table: &Path,
        output_raster: &Path,
        default_n: f64,
    ) -> Result<String, ExternalError> {
        let _span = info_span!("manning_n_raster").entered();
        run_positional(
            &self.executable,
            [
                land_use.as_os_str().to_owned(),
                dem.as_os_str().to_owned(),
                manning_table.as_os_str().to_owned(),
                output_raster.as_os_str().to_owned(),
                default_n.to_string().into(),
            ],
        )
    }
}
