//! Error handling module
//!
//! Defines the parse and run error type with exit codes

pub mod types;

pub use types::*;
