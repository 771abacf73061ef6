//! Commander identity and injected collaborators

use crate::system::{RealSystem, System};
use std::fmt;
use std::sync::Arc;

/// Default commander name, used when none is given
pub const DEFAULT_NAME: &str = "An atcommander application";

/// Default copyright line, used when none is given
pub const DEFAULT_COPYRIGHT: &str = "Copyright 2018- The atcommander Authors.";

/// Settings shared by a commander and all of its contexts
#[derive(Clone)]
pub struct Settings {
    name: String,
    copyright: String,
    system: Arc<dyn System>,
}

impl Settings {
    /// Create settings, filling empty fields with the defaults
    #[must_use]
    #[inline]
    pub fn new<N: Into<String>, C: Into<String>>(
        name: N,
        copyright: C,
        system: Arc<dyn System>,
    ) -> Self {
        Self::default()
            .with_name(name)
            .with_copyright(copyright)
            .with_system(system)
    }

    /// Set the commander name (builder pattern)
    ///
    /// An empty name keeps the current one.
    #[must_use]
    #[inline]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
        self
    }

    /// Set the copyright line (builder pattern)
    ///
    /// An empty copyright keeps the current one.
    #[must_use]
    #[inline]
    pub fn with_copyright<S: Into<String>>(mut self, copyright: S) -> Self {
        let copyright = copyright.into();
        if !copyright.is_empty() {
            self.copyright = copyright;
        }
        self
    }

    /// Set the system used for output and environment lookups (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_system(mut self, system: Arc<dyn System>) -> Self {
        self.system = system;
        self
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    #[must_use]
    #[inline]
    pub fn system(&self) -> &dyn System {
        self.system.as_ref()
    }
}

impl Default for Settings {
    #[inline]
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            copyright: DEFAULT_COPYRIGHT.to_owned(),
            system: Arc::new(RealSystem::new()),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("name", &self.name)
            .field("copyright", &self.copyright)
            .finish_non_exhaustive()
    }
}
