//! Command-line interface module
//!
//! Handles top-level argument parsing and the built-in commands

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;
