//! Provides the main entry point to the program.
use binroute::cli::run_cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = run_cli() {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
