//! Command registry, per-command contexts and option values
//!
//! Token streams look like `@cmd1 opt1 opt2- name=value @cmd2 help`:
//! tokens starting with `@` select a command, and the tokens up to the next
//! command token set that command's options.

pub mod command;
pub mod context;
pub mod options;
pub mod registry;

pub use command::Command;
pub use context::Context;
pub use options::{BoolOption, FloatOption, IntOption, OptionValue, StringOption};
pub use registry::Commander;

/// Prefix marking a token as a command selector
pub const COMMAND_MARKER: char = '@';

/// Reserved command and option name that requests help
pub const HELP: &str = "help";
