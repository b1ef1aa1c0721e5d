//! Commands that copy attributes from the stream vector layer.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use floodprep_geo::{MemoryLayer, SpatialFilter, apply_spatial_filter};
use floodprep_inject::{AttributeColumn, inject_attribute};
use floodprep_table::{Delimiter, StreamInfoTable};

use crate::cli::{AppendSlopeArgs, CommonArgs, FlowFromVectorArgs, VectorArgs};
use crate::config::FloodprepConfig;
use crate::convert;

/// Append slope from the stream layer.
pub fn run_append_slope(args: AppendSlopeArgs) -> Result<()> {
    let _cmd = info_span!("append_slope").entered();
    let config = FloodprepConfig::load(args.common.config.as_deref())?;
    let field = args.slope_field.unwrap_or_else(|| config.fields.slope.clone());
    run_attribute(&args.common, &args.vector, &config, &field, AttributeColumn::Slope)
}

/// Append flow from the stream layer.
pub fn run_flow_from_vector(args: FlowFromVectorArgs) -> Result<()> {
    let _cmd = info_span!("flow_from_vector").entered();
    let config = FloodprepConfig::load(args.common.config.as_deref())?;
    let field = args.flow_field.unwrap_or_else(|| config.fields.flow.clone());
    run_attribute(&args.common, &args.vector, &config, &field, AttributeColumn::Flow)
}

/// Restrict `layer` to the DEM footprint. An unreadable DEM skips the filter.
fn filter_by_dem(layer: &mut MemoryLayer, dem: &Path, epsg: Option<u32>) -> SpatialFilter {
    match convert::open_dem(dem, epsg) {
        Ok(raster) => apply_spatial_filter(layer, &raster),
        Err(e) => {
            let reason = format!("{e:#}");
            warn!(error = %reason, "skipping filter, this may take longer");
            SpatialFilter::Skipped { reason }
        }
    }
}

fn run_attribute(
    common: &CommonArgs,
    vector: &VectorArgs,
    config: &FloodprepConfig,
    value_field: &str,
    column: AttributeColumn,
) -> Result<()> {
    let stream_info = convert::stream_info_path(common, config)?;
    let streams = convert::require_path(
        vector.streams.as_deref(),
        config.paths.streams.as_deref(),
        "streams",
        "streams",
    )?;
    let id_field = vector
        .stream_id_field
        .as_deref()
        .unwrap_or(&config.fields.stream_id);

    let mut layer = convert::open_streams(&streams, config.paths.streams_epsg)?;
    if layer.is_empty() {
        warn!(path = %streams.display(), "stream layer has no features");
    } else {
        debug!(features = layer.len(), "stream layer loaded");
    }
    match vector.dem.as_deref().or(config.paths.dem.as_deref()) {
        Some(dem) => {
            let outcome = filter_by_dem(&mut layer, dem, config.paths.dem_epsg);
            info!(applied = outcome.is_applied(), "stream layer filter");
        }
        None => info!("no elevation raster configured, reading every stream feature"),
    }

    let table = StreamInfoTable::read(&stream_info)
        .with_context(|| format!("failed to read stream info table: {}", stream_info.display()))?;
    let updated = inject_attribute(&table, &layer, id_field, value_field, column)?;
    updated
        .replace(&stream_info, Delimiter::Space)
        .with_context(|| format!("failed to write stream info table: {}", stream_info.display()))?;
    Ok(())
}
