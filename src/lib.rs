//! `atcommander` - A subcommand dispatcher for `@command option` command lines
//!
//! Programs register named commands, each declaring its own options. A flat
//! token stream such as `@build release+ jobs=4 @deploy target=prod` is then
//! parsed into per-command option values plus an execution queue, which is
//! run in order until the first failure or a help request.

pub mod cli;
pub mod commander;
pub mod config;
pub mod error;
pub mod system;

pub use commander::{
    BoolOption, COMMAND_MARKER, Command, Commander, Context, FloatOption, HELP, IntOption,
    OptionValue, StringOption,
};
pub use config::Settings;
pub use error::CommanderError;

use cli::Args;
use std::sync::Arc;
use system::System;
use tracing::debug;

/// Main entry point for the atcmd binary
///
/// # Errors
///
/// Returns an error if the tokens fail to parse or a command fails.
pub fn run(args: &Args, system: Arc<dyn System>) -> Result<(), CommanderError> {
    let settings = Settings::default()
        .with_name(format!("atcmd {}", env!("CARGO_PKG_VERSION")))
        .with_system(system);
    let mut commander = Commander::new(settings);
    cli::register_builtins(&mut commander);

    let tokens = args.command_tokens();
    let consumed = commander.parse(&tokens)?;
    debug!("Consumed {consumed} of {} tokens", tokens.len());
    commander.run()
}
