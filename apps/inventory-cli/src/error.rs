//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ─┐                                                     │
//! │  CoreError ───────┼──► CliError ──► "error: <message>" on stderr        │
//! │  DbError ─────────┤                 exit code from ErrorCode            │
//! │  io / json ───────┘                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use inventory_core::{CoreError, ValidationError};
use inventory_db::DbError;

/// Error returned from commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A live stream ended without producing a value.
    #[error("Item stream closed unexpectedly")]
    StreamClosed,
}

/// Process exit codes, grouped by who has to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad input or unknown id: the user should fix the command.
    Usage = 2,

    /// Refused by a stock rule.
    BusinessLogic = 3,

    /// The database could not be opened or queried.
    Database = 4,

    /// Anything else.
    Internal = 1,
}

impl CliError {
    /// Maps the error to a process exit code.
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Validation(_)
            | CliError::Core(CoreError::Validation(_))
            | CliError::Core(CoreError::ItemNotFound(_)) => ErrorCode::Usage,
            CliError::Core(CoreError::OutOfStock { .. }) => ErrorCode::BusinessLogic,
            CliError::Db(_) => ErrorCode::Database,
            CliError::Config(_) | CliError::Io(_) | CliError::Json(_) | CliError::StreamClosed => {
                ErrorCode::Internal
            }
        }
    }
}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;
