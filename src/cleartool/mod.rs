//! cleartool execution layer
//!
//! This module handles executing cleartool commands and parsing their
//! output.

pub mod constants;
mod executor;
mod format;
/// Parser module (public for integration testing)
pub mod parser;

pub use executor::ClearTool;
pub use format::{FIELD_SEPARATOR, Formats};

use std::io;
use thiserror::Error;

/// Errors that can occur when executing cleartool commands
#[derive(Error, Debug)]
pub enum ClearToolError {
    #[error("cleartool command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("Failed to parse cleartool output: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("cleartool is not installed or not in PATH")]
    ClearToolNotFound,
}
