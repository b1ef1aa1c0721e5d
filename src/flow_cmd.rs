//! Commands that derive flow from RAPID discharge output.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use floodprep_inject::{inject_ensemble_flow, inject_peak_flow, inject_return_period};
use floodprep_io::{RapidDataset, discover_prediction_files, read_return_periods};
use floodprep_table::{Delimiter, StreamInfoTable};

use crate::cli::{FlowFromEnsembleArgs, FlowFromRapidArgs, FlowFromReturnPeriodArgs};
use crate::config::FloodprepConfig;
use crate::convert;

fn read_table(path: &Path) -> Result<StreamInfoTable> {
    StreamInfoTable::read(path)
        .with_context(|| format!("failed to read stream info table: {}", path.display()))
}

fn commit(table: &StreamInfoTable, path: &Path, delimiter: Delimiter) -> Result<()> {
    table
        .replace(path, delimiter)
        .with_context(|| format!("failed to write stream info table: {}", path.display()))
}

/// Append the peak flow of a single RAPID run.
pub fn run_rapid(args: FlowFromRapidArgs) -> Result<()> {
    let _cmd = info_span!("flow_from_rapid").entered();
    let config = FloodprepConfig::load(args.common.config.as_deref())?;
    let stream_info = convert::stream_info_path(&args.common, &config)?;
    let peak_cfg = convert::build_peak_config(&args, &config.flow)?;

    let table = read_table(&stream_info)?;
    info!(path = %args.qout.display(), "reading RAPID output");
    let source = RapidDataset::open(&args.qout)
        .with_context(|| format!("failed to open RAPID output: {}", args.qout.display()))?;
    info!(
        reaches = source.ids().len(),
        layout = ?source.layout(),
        "opened RAPID output"
    );
    let updated = inject_peak_flow(&table, &source, &peak_cfg)?;
    commit(&updated, &stream_info, Delimiter::Comma)
}

/// Append a two-stage statistic over an ensemble forecast.
pub fn run_ensemble(args: FlowFromEnsembleArgs) -> Result<()> {
    let _cmd = info_span!("flow_from_ensemble").entered();
    let config = FloodprepConfig::load(args.common.config.as_deref())?;
    let stream_info = convert::stream_info_path(&args.common, &config)?;
    let method_x = convert::parse_reduction(&args.method_x)?;
    let method_y = convert::parse_reduction(&args.method_y)?;

    let table = read_table(&stream_info)?;
    let files = discover_prediction_files(&args.prediction_dir).with_context(|| {
        format!(
            "failed to list prediction files: {}",
            args.prediction_dir.display()
        )
    })?;
    info!(files = files.len(), "found prediction files");
    let updated = inject_ensemble_flow(&table, &files, RapidDataset::open, method_x, method_y)
        .with_context(|| format!("in {}", args.prediction_dir.display()))?;
    commit(&updated, &stream_info, Delimiter::Space)
}

/// Append flow from a precomputed return-period file.
pub fn run_return_period(args: FlowFromReturnPeriodArgs) -> Result<()> {
    let _cmd = info_span!("flow_from_return_period").entered();
    let config = FloodprepConfig::load(args.common.config.as_deref())?;
    let stream_info = convert::stream_info_path(&args.common, &config)?;
    let period = convert::parse_return_period(&args.period)?;

    let table = read_table(&stream_info)?;
    let periods = read_return_periods(&args.return_period_file, period).with_context(|| {
        format!(
            "failed to read return periods: {}",
            args.return_period_file.display()
        )
    })?;
    if periods.is_empty() {
        warn!(period = %period, "return-period file holds no reaches, every flow will be 0");
    } else {
        info!(reaches = periods.len(), period = %period, "read return periods");
    }
    let updated = inject_return_period(&table, &periods)?;
    commit(&updated, &stream_info, Delimiter::Space)
}
