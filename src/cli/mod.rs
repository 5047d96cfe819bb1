//! CLI support for miniexpr
//!
//! Provides programmatic access to the `miniexpr` command so other tools can
//! embed it.

mod check;
pub mod logger;

pub use check::{CheckOptions, CheckResult, DEMO_EXPRESSIONS, execute_check};

use std::io;

use crate::{EvalError, convert::ConvertError};

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Lexing, parsing or evaluation failed
    #[error("{0}")]
    Eval(#[from] EvalError),
    /// The variable context could not be loaded
    #[error("Invalid variables: {0}")]
    Variables(#[from] ConvertError),
    /// JSON serialization error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No expression provided
    #[error("No expression provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,
}
