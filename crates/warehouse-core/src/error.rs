//! # Error Types
//!
//! Domain-specific error types for warehouse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  warehouse-core errors (this file)                                     │
//! │  ├── CoreError        - Record-level failures                          │
//! │  └── ValidationError  - Form text that does not parse                  │
//! │                                                                         │
//! │  warehouse-store errors (separate crate)                               │
//! │  ├── CodecError       - Malformed JSON, bad tag registry               │
//! │  ├── StorageError     - File I/O failures                              │
//! │  └── WarehouseError   - Store startup failures                         │
//! │                                                                         │
//! │  Flow: ValidationError stops at the form; it never reaches the store   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductKind;

// =============================================================================
// Core Error
// =============================================================================

/// Record-level errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record was asked for as a variant it does not belong to.
    #[error("Product {id} is {actual}, expected {expected}")]
    VariantMismatch {
        id: i32,
        expected: ProductKind,
        actual: ProductKind,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when raw form text cannot be turned into a typed field.
/// The record itself accepts any typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., "abc" for a quantity, "2026-13-01" for a date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates an InvalidFormat error for a field.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
