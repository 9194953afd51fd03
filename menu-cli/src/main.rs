//! Binary crate for the `menu` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Reporting a failed run with its stage and a non-zero exit code

use clap::Parser;
use menu_core::StageError;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<StageError>() {
                Some(stage_err) => tracing::error!(stage = %stage_err.stage(), "{err:#}"),
                None => tracing::error!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
