//! # warehouse-core: Product Records for Warehouse Master
//!
//! This crate holds the inventory's domain types with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Warehouse Master Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Caller (desktop form / CLI)                      │   │
//! │  │     raw text ──► ProductForm::parse ──► Product                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ warehouse-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐  ┌──────────────────┐  ┌─────────────┐  │   │
//! │  │   │      types       │  │    validation    │  │    error    │  │   │
//! │  │   │  Product         │  │  ProductForm     │  │  CoreError  │  │   │
//! │  │   │  FoodProduct     │  │  parse_product_id│  │  Validation │  │   │
//! │  │   │  Electronics...  │  │                  │  │  Error      │  │   │
//! │  │   └──────────────────┘  └──────────────────┘  └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TIMERS • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                warehouse-store (Store Layer)                    │   │
//! │  │        JSON codec, file storage, store, expiration monitor      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product record variants and their kind
//! - [`validation`] - Form text parsing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use warehouse_core::{ElectronicsProduct, FoodProduct, Product};
//!
//! let bread: Product = FoodProduct::new(
//!     3001,
//!     "Bread",
//!     45.50,
//!     4,
//!     NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
//! )
//! .into();
//! let charger: Product = ElectronicsProduct::new(3002, "Charger", 1490.0, 2, 6).into();
//!
//! assert_eq!(bread.value() + charger.value(), 3162.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
pub use validation::{parse_product_id, ProductForm};
