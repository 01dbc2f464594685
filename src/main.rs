use std::process::ExitCode;

use clap::Parser;
use partroute::cli::{run_cli, Cli};

fn main() -> ExitCode {
    match run_cli(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
