//! Per-command option scope
//!
//! A `Context` holds one command's declared options and its help flag, and
//! parses the run of option tokens that follows the command token.

use super::options::{BoolOption, FloatOption, IntOption, OptionValue, StringOption};
use super::{COMMAND_MARKER, Command, HELP};
use crate::config::Settings;
use crate::error::CommanderError;
use crate::system::System;
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use tracing::debug;

/// Default renderings that are not worth showing in help listings
const UNINTERESTING_DEFAULTS: [&str; 5] = ["", "false", "0", "0.0", "\"\""];

struct DeclaredOption {
    value: Box<dyn OptionValue>,
    description: String,
}

/// Options and help state of one registered command
pub struct Context {
    settings: Arc<Settings>,
    command: Arc<dyn Command>,
    help: bool,
    options: BTreeMap<String, DeclaredOption>,
}

impl Context {
    /// Create an empty context without running the command's initializer
    #[must_use]
    #[inline]
    pub fn new(settings: Arc<Settings>, command: Arc<dyn Command>) -> Self {
        Self {
            settings,
            command,
            help: false,
            options: BTreeMap::new(),
        }
    }

    /// Create a context and let the command declare its options on it
    #[must_use]
    pub fn initialize(settings: Arc<Settings>, command: Arc<dyn Command>) -> Self {
        let mut ctx = Self::new(settings, Arc::clone(&command));
        command.init(&mut ctx);
        ctx
    }

    /// Declare an option with the given name and default value
    ///
    /// # Panics
    ///
    /// Panics if the name is already declared or is the reserved word `help`.
    /// Both are bugs in the command's `init`, not user input errors.
    pub fn declare_option<O, S>(&mut self, name: &str, option: O, description: S)
    where
        O: OptionValue,
        S: Into<String>,
    {
        if self.options.contains_key(name) {
            panic!(
                "{}",
                CommanderError::DuplicateOption {
                    name: name.to_owned()
                }
            );
        }
        if name == HELP {
            panic!(
                "{}",
                CommanderError::IllegalOptionName {
                    name: name.to_owned()
                }
            );
        }
        self.options.insert(
            name.to_owned(),
            DeclaredOption {
                value: Box::new(option),
                description: description.into(),
            },
        );
    }

    /// Get a declared option
    #[must_use]
    #[inline]
    pub fn get_option(&self, name: &str) -> Option<&dyn OptionValue> {
        self.options.get(name).map(|declared| declared.value.as_ref())
    }

    /// Get a declared option as a concrete kind
    #[must_use]
    #[inline]
    pub fn get_option_as<O: OptionValue>(&self, name: &str) -> Option<&O> {
        self.get_option(name)?.as_any().downcast_ref::<O>()
    }

    /// Value of a toggle option, `None` if absent or of another kind
    #[must_use]
    #[inline]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get_option_as::<BoolOption>(name).map(BoolOption::get)
    }

    /// Value of a string option, `None` if absent or of another kind
    #[must_use]
    #[inline]
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get_option_as::<StringOption>(name).map(StringOption::get)
    }

    /// Value of an integer option, `None` if absent or of another kind
    #[must_use]
    #[inline]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get_option_as::<IntOption>(name).map(IntOption::get)
    }

    /// Value of a float option, `None` if absent or of another kind
    #[must_use]
    #[inline]
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get_option_as::<FloatOption>(name).map(FloatOption::get)
    }

    /// Whether `help` appeared among this command's options
    #[must_use]
    #[inline]
    pub const fn help_requested(&self) -> bool {
        self.help
    }

    #[must_use]
    #[inline]
    pub fn command(&self) -> &Arc<dyn Command> {
        &self.command
    }

    #[must_use]
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// System for output and environment lookups
    #[must_use]
    #[inline]
    pub fn system(&self) -> &dyn System {
        self.settings.system()
    }

    /// Render all options as `[name:value name:value]`, sorted by name
    #[must_use]
    pub fn options_string(&self) -> String {
        let pairs: Vec<String> = self
            .options
            .iter()
            .map(|(name, declared)| format!("{name}:{}", declared.value))
            .collect();
        format!("[{}]", pairs.join(" "))
    }

    /// Parse option tokens up to the next command token
    ///
    /// Returns the number of tokens consumed. The command token that stops
    /// the scan is not counted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An option name is not declared
    /// - An option rejects its value selector (prefixed with the option name)
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<usize, CommanderError> {
        let mut consumed = 0;
        for token in tokens {
            let token = token.as_ref();
            if token.starts_with(COMMAND_MARKER) {
                break;
            }
            consumed += 1;
            if token == HELP {
                self.help = true;
                continue;
            }

            let (name, selector) = split_option_token(token);
            let declared = self
                .options
                .get_mut(name)
                .ok_or_else(|| CommanderError::UnknownOption {
                    name: name.to_owned(),
                })?;
            declared
                .value
                .set(selector)
                .map_err(|err| CommanderError::in_option(name, err))?;
            debug!("Option {name} set to {}", declared.value);
        }
        Ok(consumed)
    }

    /// Render the help listing of this command
    #[must_use]
    pub fn render_help(&self, command_name: &str) -> String {
        let mut text = format!(
            "{}\n{}\n\n{COMMAND_MARKER}{command_name}: {}\noptions:\n  {HELP}\tShow this help and exit\n",
            self.settings.name(),
            self.settings.copyright(),
            self.command.description(),
        );
        let listing: String = self
            .options
            .iter()
            .map(|(name, declared)| {
                let rendered = declared.value.to_string();
                let default_part = if UNINTERESTING_DEFAULTS.contains(&rendered.as_str()) {
                    String::new()
                } else {
                    format!(" (default {rendered})")
                };
                format!(
                    "  {name}{}\t{}{default_part}\n",
                    declared.value.value_format(),
                    declared.description,
                )
            })
            .collect();
        text.push_str(&listing);
        text
    }

    /// Write the help listing of this command to the output sink
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink fails.
    #[inline]
    pub fn write_help(&self, command_name: &str) -> io::Result<()> {
        self.system().write_out(&self.render_help(command_name))
    }
}

/// Split `name`, `name+`, `name-` or `name=value` into name and value selector
fn split_option_token(token: &str) -> (&str, &str) {
    let name = match token.split_once('=') {
        Some((name, _)) => name,
        None => token.strip_suffix(['+', '-']).unwrap_or(token),
    };
    (name, &token[name.len()..])
}
