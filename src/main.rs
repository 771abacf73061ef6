//! # `atcmd`
//!
//! `atcmd` runs built-in `@commands` through the atcommander dispatcher.
//!
//! ## Usage
//!
//! ```sh
//! atcmd @echo text=hello upper @home
//! atcmd @env name=PATH json
//! atcmd @help
//! atcmd @echo help
//! ```
//!
//! Set `RUST_LOG` or pass `--verbose` to see how tokens are dispatched.

use atcommander::cli::Args;
use atcommander::system::real::RealSystem;
use clap::Parser as _;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    match atcommander::run(&args, Arc::new(RealSystem::new())) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{}", err);
            std::process::exit(err.exit_code());
        }
    }
}
