//! Configuration module
//!
//! Holds the commander settings and their defaults

pub mod settings;

pub use settings::{DEFAULT_COPYRIGHT, DEFAULT_NAME, Settings};
