use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// floodprep: AutoRoute input preparation.
#[derive(Parser)]
#[command(
    name = "floodprep",
    version,
    about = "Prepare AutoRoute stream, slope and flow inputs"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate the stream info table from a stream raster (runs AutoRoute).
    StreamInfo(StreamInfoArgs),
    /// Generate a Manning's n raster from land use (runs AutoRoute).
    Manning(ManningArgs),
    /// Append slope from the stream vector layer.
    AppendSlope(AppendSlopeArgs),
    /// Append flow from an attribute of the stream vector layer.
    FlowFromVector(FlowFromVectorArgs),
    /// Append the peak flow of a single RAPID run.
    FlowFromRapid(FlowFromRapidArgs),
    /// Append a two-stage statistic over an ensemble forecast.
    FlowFromEnsemble(FlowFromEnsembleArgs),
    /// Append flow from a precomputed return-period file.
    FlowFromReturnPeriod(FlowFromReturnPeriodArgs),
}

/// Options shared by every subcommand.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Path to TOML configuration file. Defaults to `floodprep.toml` when
    /// present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the stream info table path from config.
    #[arg(short, long)]
    pub stream_info: Option<PathBuf>,
}

/// Arguments for the `stream-info` subcommand.
#[derive(clap::Args)]
pub struct StreamInfoArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Rasterized stream network on the DEM grid.
    #[arg(long)]
    pub stream_raster: PathBuf,

    /// Search radius in cells for flow direction.
    #[arg(long, default_value_t = 1)]
    pub search_radius: u32,

    /// Override the AutoRoute executable path from config.
    #[arg(long)]
    pub autoroute: Option<PathBuf>,
}

/// Arguments for the `manning` subcommand.
#[derive(clap::Args)]
pub struct ManningArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Land use raster.
    #[arg(long)]
    pub land_use: PathBuf,

    /// Land use class -> Manning's n table.
    #[arg(long)]
    pub manning_table: PathBuf,

    /// Output Manning's n raster.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Manning's n for classes missing from the table.
    #[arg(long, default_value_t = 0.035)]
    pub default_n: f64,

    /// Override the elevation raster path from config.
    #[arg(long)]
    pub dem: Option<PathBuf>,

    /// Override the AutoRoute executable path from config.
    #[arg(long)]
    pub autoroute: Option<PathBuf>,
}

/// Vector source options shared by the attribute subcommands.
#[derive(clap::Args)]
pub struct VectorArgs {
    /// Override the stream GeoJSON path from config.
    #[arg(long)]
    pub streams: Option<PathBuf>,

    /// Override the stream ID field name from config.
    #[arg(long)]
    pub stream_id_field: Option<String>,

    /// Override the elevation raster path from config.
    #[arg(long)]
    pub dem: Option<PathBuf>,
}

/// Arguments for the `append-slope` subcommand.
#[derive(clap::Args)]
pub struct AppendSlopeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub vector: VectorArgs,

    /// Override the slope field name from config.
    #[arg(long)]
    pub slope_field: Option<String>,
}

/// Arguments for the `flow-from-vector` subcommand.
#[derive(clap::Args)]
pub struct FlowFromVectorArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub vector: VectorArgs,

    /// Override the flow field name from config.
    #[arg(long)]
    pub flow_field: Option<String>,
}

/// Arguments for the `flow-from-rapid` subcommand.
#[derive(clap::Args)]
pub struct FlowFromRapidArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// RAPID Qout NetCDF file.
    #[arg(long)]
    pub qout: PathBuf,

    /// Start of the peak search window (YYYY-MM-DD[ HH:MM:SS]).
    #[arg(long)]
    pub start: Option<String>,

    /// End of the peak search window (YYYY-MM-DD[ HH:MM:SS]).
    #[arg(long)]
    pub end: Option<String>,

    /// Override the per-batch element budget from config.
    #[arg(long)]
    pub max_chunk_elements: Option<usize>,
}

/// Arguments for the `flow-from-ensemble` subcommand.
#[derive(clap::Args)]
pub struct FlowFromEnsembleArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory of per-member forecast NetCDF files.
    #[arg(long)]
    pub prediction_dir: PathBuf,

    /// Statistic across members: mean, mean_plus_std, mean_minus_std, max, min.
    #[arg(long, default_value = "mean")]
    pub method_x: String,

    /// Statistic across time: mean, mean_plus_std, mean_minus_std, max, min.
    #[arg(long, default_value = "max")]
    pub method_y: String,
}

/// Arguments for the `flow-from-return-period` subcommand.
#[derive(clap::Args)]
pub struct FlowFromReturnPeriodArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Return-period NetCDF file.
    #[arg(long)]
    pub return_period_file: PathBuf,

    /// return_period_2, return_period_10, return_period_20 or max_flow.
    #[arg(long)]
    pub period: String,
}
