use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Workspace crates whose events pass the default filter.
const CRATE_TARGETS: &[&str] = &[
    "floodprep",
    "floodprep_ensemble",
    "floodprep_external",
    "floodprep_geo",
    "floodprep_inject",
    "floodprep_io",
    "floodprep_table",
];

/// Target carrying the AutoRoute executable's stdout, one event per line.
const TOOL_OUTPUT_TARGET: &str = "floodprep_external::output";

/// `-v` count -> level for the workspace crates.
///
/// 0 warn, 1 info, 2 debug, 3+ trace.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Filter directives used when `RUST_LOG` is unset.
///
/// AutoRoute's own output stays visible at the default verbosity.
fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    let [level, tool_level] =
        [level, level.max(LevelFilter::INFO)].map(|l| l.to_string().to_ascii_lowercase());
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .chain(std::iter::once(format!("{TOOL_OUTPUT_TARGET}={tool_level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` replaces the verbosity-derived filter when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
