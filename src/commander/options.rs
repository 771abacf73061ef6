//! Option values settable from `name`, `name+`, `name-` and `name=VALUE` tokens
//!
//! Each option kind accepts a value selector, which is one of `""`, `"+"`,
//! `"-"` or `"=VALUE"`. New kinds only need to implement [`OptionValue`];
//! neither [`Context`](super::Context) nor [`Commander`](super::Commander)
//! know about concrete kinds.

use crate::error::CommanderError;
use std::any::Any;
use std::fmt;

/// A named option's value cell
///
/// The `Display` implementation is the canonical rendering of the current
/// value. It is used by help listings to decide whether a default is worth
/// showing.
pub trait OptionValue: fmt::Display + Any {
    /// Set the value from a value selector
    ///
    /// # Errors
    ///
    /// Returns `CommanderError::IllegalValue` if the selector is not
    /// accepted by this option kind.
    fn set(&mut self, selector: &str) -> Result<(), CommanderError>;

    /// Syntax hint shown after the option name in help listings
    fn value_format(&self) -> &'static str;

    /// Access the concrete option for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Toggle option: `name` and `name+` set it, `name-` clears it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolOption {
    value: bool,
}

impl BoolOption {
    #[must_use]
    #[inline]
    pub const fn new(value: bool) -> Self {
        Self { value }
    }

    #[must_use]
    #[inline]
    pub const fn get(&self) -> bool {
        self.value
    }
}

impl OptionValue for BoolOption {
    fn set(&mut self, selector: &str) -> Result<(), CommanderError> {
        match selector {
            "" | "+" => self.value = true,
            "-" => self.value = false,
            _ => return Err(CommanderError::illegal_value("OptionBool", selector)),
        }
        Ok(())
    }

    fn value_format(&self) -> &'static str {
        "[+-]"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for BoolOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// String option: `name=VALUE` stores `VALUE` verbatim, bare `name` clears it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringOption {
    value: String,
}

impl StringOption {
    #[must_use]
    #[inline]
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[must_use]
    #[inline]
    pub fn get(&self) -> &str {
        &self.value
    }
}

impl OptionValue for StringOption {
    fn set(&mut self, selector: &str) -> Result<(), CommanderError> {
        if selector.is_empty() {
            self.value.clear();
        } else if let Some(value) = selector.strip_prefix('=') {
            value.clone_into(&mut self.value);
        } else {
            return Err(CommanderError::illegal_value("OptionString", selector));
        }
        Ok(())
    }

    fn value_format(&self) -> &'static str {
        "=VALUE"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for StringOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.value))
    }
}

/// Double-quote a string, escaping quotes, backslashes and control characters
///
/// ASCII control characters without a short escape render as `\xNN`; other
/// control characters render as `\uNNNN`.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{b}' => quoted.push_str("\\v"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\x{:02x}", u32::from(c))),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Integer option: only `name=N` is accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntOption {
    value: i64,
}

impl IntOption {
    #[must_use]
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self { value }
    }

    #[must_use]
    #[inline]
    pub const fn get(&self) -> i64 {
        self.value
    }
}

impl OptionValue for IntOption {
    fn set(&mut self, selector: &str) -> Result<(), CommanderError> {
        self.value = selector
            .strip_prefix('=')
            .and_then(|literal| literal.parse().ok())
            .ok_or_else(|| CommanderError::illegal_value("OptionInt", selector))?;
        Ok(())
    }

    fn value_format(&self) -> &'static str {
        "=INT"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for IntOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Floating point option: only `name=X` is accepted
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatOption {
    value: f64,
}

impl FloatOption {
    #[must_use]
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }

    #[must_use]
    #[inline]
    pub const fn get(&self) -> f64 {
        self.value
    }
}

impl OptionValue for FloatOption {
    fn set(&mut self, selector: &str) -> Result<(), CommanderError> {
        self.value = selector
            .strip_prefix('=')
            .and_then(|literal| literal.parse().ok())
            .ok_or_else(|| CommanderError::illegal_value("OptionFloat", selector))?;
        Ok(())
    }

    fn value_format(&self) -> &'static str {
        "=FLOAT"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for FloatOption {
    // Debug keeps the fractional part, so zero renders as `0.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}
