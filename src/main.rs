mod cli;
mod config;
mod convert;
mod flow_cmd;
mod logging;
mod prepare_cmd;
mod vector_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::StreamInfo(args) => prepare_cmd::run_stream_info(args),
        Command::Manning(args) => prepare_cmd::run_manning(args),
        Command::AppendSlope(args) => vector_cmd::run_append_slope(args),
        Command::FlowFromVector(args) => vector_cmd::run_flow_from_vector(args),
        Command::FlowFromRapid(args) => flow_cmd::run_rapid(args),
        Command::FlowFromEnsemble(args) => flow_cmd::run_ensemble(args),
        Command::FlowFromReturnPeriod(args) => flow_cmd::run_return_period(args),
    }
}
