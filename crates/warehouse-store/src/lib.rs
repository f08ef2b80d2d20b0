//! # warehouse-store: Inventory Store for Warehouse Master
//!
//! Owns the live product collection, its JSON file, and the background
//! expiration monitor.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       warehouse-store Layout                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Warehouse                                │   │
//! │  │   add / remove / list / search / value / counts / expired       │   │
//! │  │   load_data / shutdown                                          │   │
//! │  └──────┬──────────────────────┬───────────────────────┬──────────┘   │
//! │         │                      │                       │               │
//! │  ┌──────▼───────┐   ┌──────────▼─────────┐   ┌─────────▼──────────┐   │
//! │  │  Inventory   │◄──│ ExpirationMonitor  │   │  ProductStorage    │   │
//! │  │ RwLock<Vec>  │   │ tokio interval     │   │  JsonFileStorage   │   │
//! │  └──────────────┘   └────────────────────┘   └─────────┬──────────┘   │
//! │                                                        │               │
//! │                                              ┌─────────▼──────────┐   │
//! │                                              │   ProductCodec     │   │
//! │                                              │   TypeRegistry     │   │
//! │                                              └────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use warehouse_core::ElectronicsProduct;
//! use warehouse_store::{Warehouse, WarehouseConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), warehouse_store::WarehouseError> {
//! let warehouse = Warehouse::open(WarehouseConfig::default())?;
//! warehouse.load_data();
//!
//! warehouse.add_product(ElectronicsProduct::new(3002, "Charger", 1490.0, 2, 6));
//! println!("Total value: {:.2}", warehouse.total_value());
//!
//! warehouse.shutdown();
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod config;
pub mod error;
pub mod inventory;
pub mod monitor;
pub mod storage;
pub mod warehouse;

// =============================================================================
// Re-exports
// =============================================================================

pub use codec::{ProductCodec, TypeRegistry, TypeRegistryBuilder, DEFAULT_TAG_FIELD};
pub use config::{MonitorSettings, StorageSettings, WarehouseConfig};
pub use error::{
    CodecError, CodecResult, ConfigError, ConfigResult, StorageError, StorageResult,
    WarehouseError, WarehouseResult,
};
pub use inventory::Inventory;
pub use monitor::{ExpirationMonitor, ExpirationNotifier, MonitorHandle, TracingNotifier};
pub use storage::{JsonFileStorage, ProductStorage};
pub use warehouse::{Warehouse, WarehouseBuilder};
