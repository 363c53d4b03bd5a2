#![forbid(unsafe_code)]

use std::ffi::OsString;
use std::process::ExitCode;

use openduo::{commands, logging};

fn main() -> ExitCode {
    logging::init_tracing("warn");

    // Everything after argv[0] belongs to the agent
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    match commands::launch::execute(&args) {
        Ok(never) => match never {},
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
