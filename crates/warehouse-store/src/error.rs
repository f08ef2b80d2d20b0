//! # Store Error Types
//!
//! Error types for the codec, file storage, configuration and the store.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────┐  ┌─────────────────────┐ │
//! │  │   Codec (config)    │  │  Codec (parse)  │  │      Storage        │ │
//! │  │   FATAL             │  │  whole load     │  │  logged, store      │ │
//! │  │                     │  │  rejected       │  │  keeps running      │ │
//! │  │  EmptyTagField      │  │  Syntax         │  │  Io                 │ │
//! │  │  DuplicateRegistr.  │  │  NotAnArray     │  │  Codec              │ │
//! │  │  TagFieldCollision  │  │  MissingTag     │  │                     │ │
//! │  │  UnregisteredKind   │  │  UnknownTag     │  │                     │ │
//! │  │                     │  │  NonFiniteValue │  │                     │ │
//! │  │                     │  │  InvalidRecord  │  │                     │ │
//! │  └─────────────────────┘  └─────────────────┘  └─────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────────────────────────────┐  │
//! │  │      Config         │  │              Warehouse                  │  │
//! │  │  Read / Parse       │  │  Startup failures only: bad config,     │  │
//! │  │  Invalid            │  │  no tokio runtime for the monitor       │  │
//! │  └─────────────────────┘  └─────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use warehouse_core::ProductKind;

// =============================================================================
// Codec Errors
// =============================================================================

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Failures of the tagged JSON codec.
///
/// Element-level variants carry the array index of the offending object.
#[derive(Debug, Error)]
pub enum CodecError {
    // =========================================================================
    // Configuration Errors (programming mistakes)
    // =========================================================================
    /// The tag field name is blank.
    #[error("Tag field name must not be empty")]
    EmptyTagField,

    /// A kind or a label was registered twice.
    #[error("Duplicate registration for {kind} as '{label}': kinds and labels must be unique")]
    DuplicateRegistration { kind: ProductKind, label: String },

    /// A variant already serializes a field named like the tag field.
    #[error("Subtype '{label}' already has a field named '{field}'; use a different tag field name")]
    TagFieldCollision { field: String, label: String },

    /// A record's kind has no registered label.
    #[error("Cannot serialize {0}: kind is not registered")]
    UnregisteredKind(ProductKind),

    // =========================================================================
    // Parse Errors (bad input)
    // =========================================================================
    /// The document is not valid JSON.
    #[error("Malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The document root is not an array.
    #[error("Expected a JSON array of products")]
    NotAnArray,

    /// An array element is not an object.
    #[error("Product #{index} is not a JSON object")]
    NotAnObject { index: usize },

    /// An element has no tag field.
    #[error("Product #{index} does not define a field named '{field}'")]
    MissingTag { index: usize, field: String },

    /// The tag field holds something other than a string.
    #[error("Product #{index}: field '{field}' must be a string")]
    TagNotString { index: usize, field: String },

    /// The tag names no registered subtype.
    #[error("Product #{index}: unknown subtype '{label}'")]
    UnknownTag { index: usize, label: String },

    /// The body is missing a field or has one of the wrong kind.
    #[error("Product #{index} ({label}) is invalid: {source}")]
    InvalidRecord {
        index: usize,
        label: String,
        #[source]
        source: serde_json::Error,
    },

    /// A numeric field holds NaN or an infinity, which JSON cannot carry.
    #[error("Product #{index}: field '{field}' must be a finite number")]
    NonFiniteValue { index: usize, field: String },

    /// Writing a record failed.
    #[error("Failed to serialize products: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl CodecError {
    /// Returns true for registry/configuration mistakes, which are fatal.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CodecError::EmptyTagField
                | CodecError::DuplicateRegistration { .. }
                | CodecError::TagFieldCollision { .. }
                | CodecError::UnregisteredKind(_)
        )
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures of a persistence strategy.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl StorageError {
    /// Returns true if the file did not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("Config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No explicit path and no platform config directory.
    #[error("No config path available")]
    NoConfigPath,

    /// A setting holds an unusable value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Warehouse Errors
// =============================================================================

/// Result type alias for store operations that may fail.
pub type WarehouseResult<T> = Result<T, WarehouseError>;

/// Errors surfaced by the store itself.
///
/// Everyday mutations never return these; they log persistence failures
/// and carry on.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Explicit load failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The monitor is enabled but no tokio runtime is running.
    #[error("Expiration monitor needs a running tokio runtime")]
    NoRuntime,
}
