//! Error types with exit codes

use std::io;
use thiserror::Error;

/// Main error type for atcommander
///
/// The `Display` output of every variant is part of the public contract:
/// callers print it verbatim, and nested variants add one prefix per level
/// (`@command: option: detail`).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CommanderError {
    /// A command name was registered twice
    #[error("commander has already command {name}")]
    DuplicateCommand { name: String },

    /// A command name is reserved or ends with `+`, `-` or `=`
    #[error("illegal command name: {name}")]
    IllegalCommandName { name: String },

    /// An option name was declared twice in the same context
    #[error("option name {name} is already used")]
    DuplicateOption { name: String },

    /// An option name is reserved
    #[error("illegal option name: {name}")]
    IllegalOptionName { name: String },

    /// A token in command position does not start with the command marker
    #[error("expected command name, but got: {token}")]
    ExpectedCommand { token: String },

    /// The command is not registered
    #[error("unknown command: @{name}")]
    UnknownCommand { name: String },

    /// The command appears twice in one token stream
    #[error("cannot run @{name} multiple times")]
    DuplicateInvocation { name: String },

    /// A parse error inside the option run of a command
    #[error("@{name}: {inner}")]
    InCommand {
        name: String,
        inner: Box<CommanderError>,
    },

    /// The option is not declared by the command
    #[error("unknown option: {name}")]
    UnknownOption { name: String },

    /// An error raised while setting an option
    #[error("{name}: {inner}")]
    InOption {
        name: String,
        inner: Box<CommanderError>,
    },

    /// The value selector is not accepted by the option kind
    #[error("illegal {kind} value: {token}")]
    IllegalValue { kind: &'static str, token: String },

    /// A queued command returned an error from its run routine
    ///
    /// The alternate form prints the whole cause chain, `outer: cause`.
    #[error("@{name}: {inner:#}")]
    CommandFailed { name: String, inner: anyhow::Error },

    /// Writing to the output sink failed
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl CommanderError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub fn exit_code(&self) -> i32 {
        match *self {
            Self::DuplicateCommand { .. }
            | Self::IllegalCommandName { .. }
            | Self::DuplicateOption { .. }
            | Self::IllegalOptionName { .. } => 1,
            Self::ExpectedCommand { .. }
            | Self::UnknownCommand { .. }
            | Self::DuplicateInvocation { .. }
            | Self::UnknownOption { .. }
            | Self::IllegalValue { .. } => 2,
            Self::InCommand { ref inner, .. } | Self::InOption { ref inner, .. } => {
                inner.exit_code()
            }
            Self::CommandFailed { .. } => 3,
            Self::Output(_) => 4,
        }
    }

    /// Wrap a parse error with the command it belongs to
    #[inline]
    pub fn in_command<S: Into<String>>(name: S, inner: Self) -> Self {
        Self::InCommand {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    /// Wrap an option error with the option it belongs to
    #[inline]
    pub fn in_option<S: Into<String>>(name: S, inner: Self) -> Self {
        Self::InOption {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    /// Create an illegal value error for the given option kind
    #[inline]
    pub fn illegal_value<S: Into<String>>(kind: &'static str, token: S) -> Self {
        Self::IllegalValue {
            kind,
            token: token.into(),
        }
    }

    /// Whether this is a setup fault raised by misuse of the registration API
    #[must_use]
    #[inline]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            *self,
            Self::DuplicateCommand { .. }
                | Self::IllegalCommandName { .. }
                | Self::DuplicateOption { .. }
                | Self::IllegalOptionName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_messages() {
        let err = CommanderError::in_command(
            "cmd1",
            CommanderError::in_option(
                "opt2",
                CommanderError::illegal_value("OptionBool", "=X"),
            ),
        );
        assert_eq!(err.to_string(), "@cmd1: opt2: illegal OptionBool value: =X");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_command_failure_message() {
        let err = CommanderError::CommandFailed {
            name: "cmd2".to_owned(),
            inner: anyhow::anyhow!("always fail"),
        };
        assert_eq!(err.to_string(), "@cmd2: always fail");
        assert_eq!(err.exit_code(), 3);
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_command_failure_keeps_cause() {
        let inner = anyhow::anyhow!("permission denied").context("cannot open file");
        let err = CommanderError::CommandFailed {
            name: "load".to_owned(),
            inner,
        };
        assert_eq!(err.to_string(), "@load: cannot open file: permission denied");
    }

    #[test]
    fn test_configuration_errors() {
        let err = CommanderError::DuplicateCommand {
            name: "cmd1".to_owned(),
        };
        assert!(err.is_configuration());
        assert_eq!(err.exit_code(), 1);
    }
}
