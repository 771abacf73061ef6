//! Built-in commands of the atcmd binary

use crate::commander::{BoolOption, Command, Commander, Context, StringOption};
use anyhow::{Context as _, Result, anyhow};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Register all built-in commands
///
/// # Panics
///
/// Panics if one of the built-in names is already registered.
pub fn register_builtins(commander: &mut Commander) {
    commander.register("echo", Arc::new(EchoCommand));
    commander.register("env", Arc::new(EnvCommand));
    commander.register("home", Arc::new(HomeCommand));
}

/// `@echo text=VALUE upper[+-]`
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn description(&self) -> &str {
        "Print the given text"
    }

    fn init(&self, ctx: &mut Context) {
        ctx.declare_option("text", StringOption::new(""), "Text to print");
        ctx.declare_option("upper", BoolOption::new(false), "Print in upper case");
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let text = ctx.get_string("text").unwrap_or_default();
        let line = if ctx.get_bool("upper").unwrap_or(false) {
            text.to_uppercase()
        } else {
            text.to_owned()
        };
        ctx.system().write_out(&format!("{line}\n"))?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EnvEntry<'a> {
    name: &'a str,
    value: Option<String>,
}

/// `@env name=VALUE json[+-]`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn description(&self) -> &str {
        "Print an environment variable"
    }

    fn init(&self, ctx: &mut Context) {
        ctx.declare_option("name", StringOption::new("HOME"), "Variable name");
        ctx.declare_option("json", BoolOption::new(false), "Print as a JSON object");
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let name = ctx.get_string("name").unwrap_or_default();
        if name.is_empty() {
            return Err(anyhow!("variable name is empty"));
        }
        let value = ctx.system().env_value(name);
        info!("Looked up environment variable {name}");

        if ctx.get_bool("json").unwrap_or(false) {
            let json = serde_json::to_string(&EnvEntry { name, value })
                .context("cannot serialize environment entry")?;
            ctx.system().write_out(&format!("{json}\n"))?;
            return Ok(());
        }
        match value {
            Some(value) => ctx.system().write_out(&format!("{value}\n"))?,
            None => return Err(anyhow!("{name} is not set")),
        }
        Ok(())
    }
}

/// `@home`
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeCommand;

impl Command for HomeCommand {
    fn description(&self) -> &str {
        "Print the home directory"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let home = ctx
            .system()
            .home_dir()
            .context("cannot determine home directory")?;
        ctx.system().write_out(&format!("{}\n", home.display()))?;
        Ok(())
    }
}
