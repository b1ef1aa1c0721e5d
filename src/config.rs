use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use floodprep_inject::DEFAULT_MAX_CHUNK_ELEMENTS;
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "floodprep.toml";

/// Top-level floodprep configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FloodprepConfig {
    /// Input and tool locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Vector attribute names.
    #[serde(default)]
    pub fields: FieldsConfig,

    /// Discharge extraction settings.
    #[serde(default)]
    pub flow: FlowToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub stream_info: Option<PathBuf>,
    pub dem: Option<PathBuf>,
    pub dem_epsg: Option<u32>,
    pub streams: Option<PathBuf>,
    pub streams_epsg: Option<u32>,
    pub autoroute: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldsConfig {
    #[serde(default = "default_stream_id_field")]
    pub stream_id: String,
    #[serde(default = "default_slope_field")]
    pub slope: String,
    #[serde(default = "default_flow_field")]
    pub flow: String,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            stream_id: default_stream_id_field(),
            slope: default_slope_field(),
            flow: default_flow_field(),
        }
    }
}

fn default_stream_id_field() -> String {
    "COMID".to_string()
}
fn default_slope_field() -> String {
    "slope".to_string()
}
fn default_flow_field() -> String {
    "flow".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowToml {
    #[serde(default = "default_max_chunk_elements")]
    pub max_chunk_elements: usize,
}

impl Default for FlowToml {
    fn default() -> Self {
        Self {
            max_chunk_elements: default_max_chunk_elements(),
        }
    }
}

fn default_max_chunk_elements() -> usize {
    DEFAULT_MAX_CHUNK_ELEMENTS
}

impl FloodprepConfig {
    /// Load `path`, or `floodprep.toml` if present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}
