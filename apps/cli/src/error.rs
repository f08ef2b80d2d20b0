//! # CLI Error Type
//!
//! Unified error type for command handling.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  "add food 1 x ..." ──► ValidationError ──┐                            │
//! │  "frobnicate"       ──► usage             ├──► CliError ──► stderr     │
//! │  "reload"           ──► WarehouseError ───┘    (code + message)         │
//! │                                                                         │
//! │  Every CliError is printed and the loop continues; only startup        │
//! │  failures end the process.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;
use warehouse_core::ValidationError;
use warehouse_store::{ConfigError, WarehouseError};

/// Error shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes printed in front of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unknown command or wrong argument count
    Usage,

    /// A field did not parse
    ValidationError,

    /// The data file could not be read or decoded
    StorageError,

    /// warehouse.toml is unusable
    ConfigError,

    /// Runtime or terminal failure
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Usage => "USAGE",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Usage, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<WarehouseError> for CliError {
    fn from(err: WarehouseError) -> Self {
        match err {
            WarehouseError::Config(e) => e.into(),
            WarehouseError::Storage(e) => CliError::new(ErrorCode::StorageError, e.to_string()),
            WarehouseError::NoRuntime => CliError::internal(WarehouseError::NoRuntime.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::internal(err.to_string())
    }
}
