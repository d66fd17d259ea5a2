//! Core error type.
//!
//! Sub-crates define their own error enums for their failure taxonomy and
//! keep `CoreError` for configuration and I/O problems that cut across them.

use thiserror::Error;

/// The base error type for `vn-core` and configuration handling.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `vn-core`.
pub type CoreResult<T> = Result<T, CoreError>;
