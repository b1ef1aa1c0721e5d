//! Commands that drive the AutoRoute executable.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use floodprep_external::AutoRouteTool;

use crate::cli::{ManningArgs, StreamInfoArgs};
use crate::config::FloodprepConfig;
use crate::convert;

/// Generate the stream info table from a stream raster.
pub fn run_stream_info(args: StreamInfoArgs) -> Result<()> {
    let _cmd = info_span!("stream_info").entered();
    let config = FloodprepConfig::load(args.common.config.as_deref())?;

    let stream_info = convert::stream_info_path(&args.common, &config)?;
    let exe = convert::require_path(
        args.autoroute.as_deref(),
        config.paths.autoroute.as_deref(),
        "autoroute",
        "autoroute",
    )?;

    let tool = AutoRouteTool::new(exe);
    info!(
        exe = %tool.executable().display(),
        raster = %args.stream_raster.display(),
        output = %stream_info.display(),
        "generating stream info table"
    );
    tool.stream_info_with_direction(&args.stream_raster, &stream_info, args.search_radius)
        .context("AutoRoute stream info generation failed")?;
    Ok(())
}

/// Generate a Manning's n raster on the elevation grid.
pub fn run_manning(args: ManningArgs) -> Result<()> {
    let _cmd = info_span!("manning").entered();
    let config = FloodprepConfig::load(args.common.config.as_deref())?;

    let dem = convert::require_path(
        args.dem.as_deref(),
        config.paths.dem.as_deref(),
        "dem",
        "dem",
    )?;
    let exe = convert::require_path(
        args.autoroute.as_deref(),
        config.paths.autoroute.as_deref(),
        "autoroute",
        "autoroute",
    )?;

    let tool = AutoRouteTool::new(exe);
    info!(
        exe = %tool.executable().display(),
        output = %args.output.display(),
        "generating Manning's n raster"
    );
    tool.manning_n_raster(
        &args.land_use,
        &dem,
        &args.manning_table,
        &args.output,
        args.default_n,
    )
    .context("AutoRoute Manning's n generation failed")?;
    Ok(())
}
