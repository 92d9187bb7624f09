use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use transync::cli::{Arguments, Command, ExitStatus, report};

/// Environment variable holding a tracing filter, e.g. `transync=trace`.
const LOG_ENV: &str = "TRANSYNC_LOG";

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "transync=debug" } else { "warn" })
    });

    // stdout carries command output (and MCP messages), so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    if matches!(args.command, Some(Command::Serve)) {
        if let Err(err) = transync::mcp::run_server() {
            eprintln!("Error: {}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match transync::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            report::print_error(&err);
            ExitStatus::from_error(&err).into()
        }
    }
}
