//! Mock system implementation for testing

use super::System;
use std::collections::HashMap;
use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides an in-memory environment and captures everything
/// written to the output sink. Clones share the same state, so a test can
/// hand one clone to a `Commander` and inspect the output through another.
///
/// # Example
/// ```
/// use atcommander::system::{mock::MockSystem, System};
///
/// let system = MockSystem::new()
///     .with_env("HOME", "/home/user").unwrap();
///
/// system.write_out("hello\n").unwrap();
/// assert_eq!(system.env_var("HOME").unwrap(), "/home/user");
/// assert_eq!(system.output(), "hello\n");
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    env_vars: HashMap<String, String>,
    home_dir: Option<PathBuf>,
    output: String,
}

impl MockSystem {
    /// Create a new `MockSystem` with default state
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                env_vars: HashMap::new(),
                home_dir: None,
                output: String::new(),
            })),
        }
    }

    /// Set an environment variable (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_env(self, key: &str, value: &str) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.env_vars.insert(key.to_owned(), value.to_owned());
        drop(state);
        Ok(self)
    }

    /// Set the home directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_home_dir<P: AsRef<Path>>(self, dir: P) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.home_dir = Some(dir.as_ref().to_path_buf());
        drop(state);
        Ok(self)
    }

    /// Everything written to the output sink so far
    #[must_use]
    #[inline]
    pub fn output(&self) -> String {
        self.state
            .read()
            .map(|state| state.output.clone())
            .unwrap_or_default()
    }

    /// Discard the captured output
    #[inline]
    pub fn clear_output(&self) {
        if let Ok(mut state) = self.state.write() {
            state.output.clear();
        }
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    #[expect(clippy::map_err_ignore, reason = "This is for VarError")]
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        let state = self.state.read().map_err(|_| VarError::NotPresent)?;
        state.env_vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[inline]
    fn home_dir(&self) -> io::Result<PathBuf> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state
            .home_dir
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "home directory not set"))
    }

    #[inline]
    fn write_out(&self, text: &str) -> io::Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.output.push_str(text);
        Ok(())
    }
}
