//! Command trait implemented by every registered subcommand

use super::Context;
use anyhow::Result;

/// A subcommand that can be registered with a [`Commander`](super::Commander)
///
/// The same command instance is shared by every context created for it, so
/// `init` runs once at registration and again at the start of every parse.
/// Commands that keep results around between calls need interior mutability.
///
/// # Example
///
/// ```
/// use atcommander::{BoolOption, Command, Context};
///
/// struct Greet;
///
/// impl Command for Greet {
///     fn description(&self) -> &str {
///         "Print a greeting"
///     }
///
///     fn init(&self, ctx: &mut Context) {
///         ctx.declare_option("loud", BoolOption::new(false), "Shout it");
///     }
///
///     fn run(&self, ctx: &Context) -> anyhow::Result<()> {
///         let text = if ctx.get_bool("loud") == Some(true) { "HELLO\n" } else { "hello\n" };
///         ctx.system().write_out(text)?;
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// One-line description shown in help listings
    fn description(&self) -> &str;

    /// Declare the command's options on a fresh context
    #[inline]
    fn init(&self, _ctx: &mut Context) {}

    /// Execute the command with the options parsed into `ctx`
    ///
    /// # Errors
    ///
    /// Any error aborts the remaining queued commands and is reported with
    /// the command name as prefix.
    fn run(&self, ctx: &Context) -> Result<()>;
}
