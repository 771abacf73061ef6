//! Command registry and dispatcher

use super::{COMMAND_MARKER, Command, Context, HELP};
use crate::config::Settings;
use crate::error::CommanderError;
use crate::system::System;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of named commands
///
/// A `Commander` turns a flat token stream such as
/// `["@build", "release+", "@deploy", "target=prod"]` into per-command
/// option values plus an execution queue, and then runs the queue.
///
/// Every call to [`Commander::parse`] starts from freshly initialized
/// contexts, so option values never leak from one parse to the next.
#[derive(Default)]
pub struct Commander {
    settings: Arc<Settings>,
    contexts: BTreeMap<String, Context>,
    help: bool,
    queue: Vec<String>,
}

impl Commander {
    #[must_use]
    #[inline]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            contexts: BTreeMap::new(),
            help: false,
            queue: Vec::new(),
        }
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        self.settings.name()
    }

    #[must_use]
    #[inline]
    pub fn copyright(&self) -> &str {
        self.settings.copyright()
    }

    #[must_use]
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    #[inline]
    pub fn system(&self) -> &dyn System {
        self.settings.system()
    }

    /// Register a command under the given name and return its context
    ///
    /// The command's `init` runs immediately so that its options are known.
    ///
    /// # Panics
    ///
    /// Panics if the name is already registered, is empty, is the reserved
    /// word `help`, or ends with `+`, `-` or `=`.
    pub fn register<C: Command + 'static>(&mut self, name: &str, command: Arc<C>) -> &Context {
        if self.contexts.contains_key(name) {
            panic!(
                "{}",
                CommanderError::DuplicateCommand {
                    name: name.to_owned()
                }
            );
        }
        if name.is_empty() || name == HELP || name.ends_with(['+', '-', '=']) {
            panic!(
                "{}",
                CommanderError::IllegalCommandName {
                    name: name.to_owned()
                }
            );
        }
        debug!("Registering command {COMMAND_MARKER}{name}");
        let ctx = Context::initialize(Arc::clone(&self.settings), command);
        self.contexts.entry(name.to_owned()).or_insert(ctx)
    }

    /// Get the context of a registered command
    #[must_use]
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// Registered command names in lexicographic order
    #[inline]
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Commands queued by the last parse, in invocation order
    #[must_use]
    #[inline]
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Whether `@help` appeared in the last parse
    #[must_use]
    #[inline]
    pub const fn help_requested(&self) -> bool {
        self.help
    }

    /// Rebuild every context from its command and clear the parse state
    pub fn reset(&mut self) {
        for ctx in self.contexts.values_mut() {
            let command = Arc::clone(ctx.command());
            *ctx = Context::initialize(Arc::clone(&self.settings), command);
        }
        self.help = false;
        self.queue.clear();
        debug!("Reset {} command contexts", self.contexts.len());
    }

    /// Parse a token stream into command options and an execution queue
    ///
    /// Returns the number of tokens consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A token in command position does not start with `@`
    /// - A command is not registered
    /// - A command appears more than once
    /// - A command's options fail to parse (prefixed with `@name: `)
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<usize, CommanderError> {
        self.reset();
        let mut index = 0;
        while let Some(token) = tokens.get(index) {
            let token = token.as_ref();
            let Some(name) = token.strip_prefix(COMMAND_MARKER) else {
                return Err(CommanderError::ExpectedCommand {
                    token: token.to_owned(),
                });
            };
            if name == HELP {
                self.help = true;
                index += 1;
                continue;
            }

            let ctx = self
                .contexts
                .get_mut(name)
                .ok_or_else(|| CommanderError::UnknownCommand {
                    name: name.to_owned(),
                })?;
            if self.queue.iter().any(|queued| queued == name) {
                return Err(CommanderError::DuplicateInvocation {
                    name: name.to_owned(),
                });
            }
            let consumed = ctx
                .parse(&tokens[index + 1..])
                .map_err(|err| CommanderError::in_command(name, err))?;
            debug!("Parsed {COMMAND_MARKER}{name} with {consumed} option tokens");
            self.queue.push(name.to_owned());
            index += consumed + 1;
        }
        Ok(index)
    }

    /// Render the listing of all registered commands
    #[must_use]
    pub fn render_help(&self) -> String {
        let mut text = format!(
            "{}\n{}\n\ncommands:\n  {COMMAND_MARKER}{HELP}\tShow this help and exit\n",
            self.name(),
            self.copyright(),
        );
        let listing: String = self
            .contexts
            .iter()
            .map(|(name, ctx)| {
                format!(
                    "  {COMMAND_MARKER}{name}\t{}\n",
                    ctx.command().description()
                )
            })
            .collect();
        text.push_str(&listing);
        text
    }

    /// Run the commands queued by the last parse
    ///
    /// If `@help` was given, only the command listing is written. Otherwise,
    /// if any queued command was given `help`, only the first such command's
    /// help is written. Otherwise the queued commands run in order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A command fails (prefixed with `@name: `); later commands do not run
    /// - Writing help to the output sink fails
    pub fn run(&self) -> Result<(), CommanderError> {
        if self.help {
            self.system().write_out(&self.render_help())?;
            return Ok(());
        }
        if let Some((name, ctx)) = self.queued().find(|(_, ctx)| ctx.help_requested()) {
            ctx.write_help(name)?;
            return Ok(());
        }
        for (name, ctx) in self.queued() {
            debug!("Running {COMMAND_MARKER}{name}");
            ctx.command()
                .run(ctx)
                .map_err(|inner| CommanderError::CommandFailed {
                    name: name.clone(),
                    inner,
                })?;
        }
        Ok(())
    }

    fn queued(&self) -> impl Iterator<Item = (&String, &Context)> + '_ {
        self.queue
            .iter()
            .filter_map(move |name| self.contexts.get(name).map(|ctx| (name, ctx)))
    }
}
