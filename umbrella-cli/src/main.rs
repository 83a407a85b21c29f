//! Binary crate for the `umbrella` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Printing the umbrella message

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use umbrella_core::UmbrellaError;

mod cli;

/// Log filter for the number of `-v` flags.
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();
    init_logging(cmd.verbose);

    let result = tokio::select! {
        res = cmd.run() => res,
        _ = tokio::signal::ctrl_c() => {
            error!("bye!");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            if let Some(hint) = err.downcast_ref::<UmbrellaError>().and_then(UmbrellaError::hint) {
                error!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}
