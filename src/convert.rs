//! Pure conversion functions: CLI args + TOML config -> crate API types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use floodprep_ensemble::Reduction;
use floodprep_geo::{Crs, MemoryLayer, RasterInfo, read_geojson};
use floodprep_inject::PeakFlowConfig;
use floodprep_io::{ReturnPeriod, parse_datetime};

use crate::cli::{CommonArgs, FlowFromRapidArgs};
use crate::config::{FloodprepConfig, FlowToml};

/// Picks the CLI override, else the config value, else fails naming both.
pub fn require_path(
    cli: Option<&Path>,
    config: Option<&Path>,
    key: &str,
    flag: &str,
) -> Result<PathBuf> {
    cli.or(config)
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("no {key} path: set [paths].{key} in config or use --{flag}"))
}

/// Resolves the stream info table path.
pub fn stream_info_path(common: &CommonArgs, config: &FloodprepConfig) -> Result<PathBuf> {
    require_path(
        common.stream_info.as_deref(),
        config.paths.stream_info.as_deref(),
        "stream_info",
        "stream-info",
    )
}

/// Parses a reduction method name.
pub fn parse_reduction(s: &str) -> Result<Reduction> {
    s.parse()
        .with_context(|| format!("invalid reduction method: {s:?}"))
}

/// Parses a return-period statistic name.
pub fn parse_return_period(s: &str) -> Result<ReturnPeriod> {
    s.parse()
        .with_context(|| format!("invalid return period: {s:?}"))
}

/// Builds a [`PeakFlowConfig`] from the RAPID subcommand and `[flow]` table.
pub fn build_peak_config(args: &FlowFromRapidArgs, flow: &FlowToml) -> Result<PeakFlowConfig> {
    let start = args
        .start
        .as_deref()
        .map(parse_datetime)
        .transpose()
        .context("invalid --start")?;
    let end = args
        .end
        .as_deref()
        .map(parse_datetime)
        .transpose()
        .context("invalid --end")?;
    let cfg = PeakFlowConfig::default()
        .with_max_chunk_elements(args.max_chunk_elements.unwrap_or(flow.max_chunk_elements))
        .with_start(start)
        .with_end(end);
    cfg.validate()?;
    Ok(cfg)
}

/// Reads the stream GeoJSON, replacing its CRS when `epsg` is configured.
pub fn open_streams(path: &Path, epsg: Option<u32>) -> Result<MemoryLayer> {
    let layer = read_geojson(path)
        .with_context(|| format!("failed to read stream layer: {}", path.display()))?;
    Ok(match epsg {
        Some(code) => layer.with_crs(Some(Crs::from_epsg(code))),
        None => layer,
    })
}

/// Reads the elevation raster's grid metadata (GeoTIFF, or `.asc`).
pub fn open_dem(path: &Path, epsg: Option<u32>) -> Result<RasterInfo> {
    RasterInfo::open(path, epsg.map(Crs::from_epsg))
        .with_context(|| format!("failed to read elevation raster: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rapid_args(start: Option<&str>, end: Option<&str>) -> FlowFromRapidArgs {
        FlowFromRapidArgs {
            common: CommonArgs {
                config: None,
                stream_info: None,
            },
            qout: PathBuf::from("Qout.nc"),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            max_chunk_elements: None,
        }
    }

    #[test]
    fn cli_overrides_config_path() {
        let p = require_path(
            Some(Path::new("cli.txt")),
            Some(Path::new("cfg.txt")),
            "stream_info",
            "stream-info",
        )
        .unwrap();
        assert_eq!(p, PathBuf::from("cli.txt"));
        let p = require_path(None, Some(Path::new("cfg.txt")), "stream_info", "stream-info")
            .unwrap();
        assert_eq!(p, PathBuf::from("cfg.txt"));
    }

    #[test]
    fn missing_path_names_key_and_flag() {
        let err = require_path(None, None, "dem", "dem").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no dem path: set [paths].dem in config or use --dem"
        );
    }

    #[test]
    fn reductions_parse() {
        assert_eq!(parse_reduction("mean_plus_std").unwrap(), Reduction::MeanPlusStd);
        assert!(parse_reduction("median").is_err());
    }

    #[test]
    fn return_periods_parse() {
        assert_eq!(
            parse_return_period("return_period_20").unwrap(),
            ReturnPeriod::Year20
        );
        assert!(parse_return_period("return_period_100").is_err());
    }

    #[test]
    fn peak_config_from_args() {
        let args = rapid_args(Some("2015-01-01"), Some("2015-01-31 21:00:00"));
        let cfg = build_peak_config(&args, &FlowToml::default()).unwrap();
        assert_eq!(cfg.max_chunk_elements(), FlowToml::default().max_chunk_elements);

        let mut args = rapid_args(None, None);
        args.max_chunk_elements = Some(12);
        let cfg = build_peak_config(&args, &FlowToml::default()).unwrap();
        assert_eq!(cfg.max_chunk_elements(), 12);
    }

    #[test]
    fn peak_config_rejects_bad_dates() {
        let flow = FlowToml::default();
        assert!(build_peak_config(&rapid_args(Some("31/01/2015"), None), &flow).is_err());
        assert!(
            build_peak_config(&rapid_args(Some("2015-02-01"), Some("2015-01-01")), &flow)
                .is_err()
        );
    }
}
