//! System abstraction for environment lookups and text output
//!
//! This module provides a unified trait for all external system interactions
//! the commander needs, allowing for easy testing with mock implementations.

use std::env::VarError;
use std::io;
use std::path::PathBuf;

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Unified trait for system operations (environment + output sink)
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::env`, `dirs` and stdout
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// Get an environment variable
    fn env_var(&self, key: &str) -> Result<String, VarError>;

    /// Get the user's home directory
    fn home_dir(&self) -> io::Result<PathBuf>;

    /// Write text to the output sink
    ///
    /// The text is written as-is; callers supply their own newlines.
    fn write_out(&self, text: &str) -> io::Result<()>;

    /// Get an environment variable, treating unset and empty values alike
    #[inline]
    fn env_value(&self, key: &str) -> Option<String> {
        self.env_var(key).ok().filter(|value| !value.is_empty())
    }
}
