//! CLI support for clove-path
//!
//! The binary is a thin wrapper over these functions, so they can also be
//! embedded in other tools.

mod check;
mod query;

pub use check::execute_check;
pub use query::{QueryOptions, execute_query};

use std::io;

use thiserror::Error;

use crate::error::{EvalError, SyntaxError};

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] SyntaxError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}
