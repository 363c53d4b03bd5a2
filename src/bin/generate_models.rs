#![forbid(unsafe_code)]

use clap::Parser;
use std::process::ExitCode;

use openduo::cli::GenerateModelsCli;
use openduo::{commands, logging};

fn main() -> ExitCode {
    let cli = GenerateModelsCli::parse();
    logging::init_tracing(if cli.verbose { "debug" } else { "info" });

    match commands::generate_models::execute(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
