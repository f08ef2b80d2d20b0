//! # Warehouse Store
//!
//! The explicit context object that owns the product collection, its
//! persistence, and the expiration monitor.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Warehouse Operations                              │
//! │                                                                         │
//! │  Caller                    Lock          Effect                        │
//! │  ──────                    ────          ──────                        │
//! │  add_product(p) ─────────► write ──────► push, save whole collection   │
//! │  remove_product(id) ─────► write ──────► drop all with id, save        │
//! │  load_data() ────────────► write ──────► replace all (on success only) │
//! │                                                                         │
//! │  all_products() ─────────► read ───────► cloned snapshot               │
//! │  search_by_name(q) ──────► read ───────► case-insensitive matches      │
//! │  total_value() ──────────► read ───────► Σ price × quantity            │
//! │  product_type_counts() ──► read ───────► label → count                 │
//! │  expired_food_products() ► read ───────► food dated before today       │
//! │                                                                         │
//! │  ExpirationMonitor ──────► read ───────► every interval, from start    │
//! │                                                                         │
//! │  NOTE: saves run while the write lock is held, so the file always      │
//! │        reflects mutations in the order they happened.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! A failed save is logged and the in-memory change stays: memory runs
//! ahead of disk until the next successful save. A failed load is logged
//! and the previous collection is kept.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDate};
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};
use warehouse_core::{FoodProduct, Product};

use crate::codec::ProductCodec;
use crate::config::WarehouseConfig;
use crate::error::{WarehouseError, WarehouseResult};
use crate::inventory::{self, Inventory};
use crate::monitor::{ExpirationMonitor, ExpirationNotifier, MonitorHandle, TracingNotifier};
use crate::storage::{JsonFileStorage, ProductStorage};

// =============================================================================
// Builder
// =============================================================================

/// Assembles a [`Warehouse`] from configuration and optional collaborators.
pub struct WarehouseBuilder {
    config: WarehouseConfig,
    storage: Option<Arc<dyn ProductStorage>>,
    notifier: Option<Arc<dyn ExpirationNotifier>>,
}

impl WarehouseBuilder {
    /// Replaces the JSON file storage.
    pub fn with_storage(mut self, storage: Arc<dyn ProductStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Replaces the logging notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn ExpirationNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Validates the config and starts the store.
    ///
    /// The collection starts empty; call [`Warehouse::load_data`] to read
    /// the data file. When the monitor is enabled its first scan runs
    /// right away on the current tokio runtime.
    pub fn start(self) -> WarehouseResult<Warehouse> {
        self.config.validate()?;

        let storage = self.storage.unwrap_or_else(|| {
            let codec = ProductCodec::standard().with_pretty(self.config.storage.pretty);
            Arc::new(JsonFileStorage::new(codec))
        });
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier));
        let inventory = Inventory::new();

        let monitor = if self.config.monitor.enabled {
            let runtime = Handle::try_current().map_err(|_| WarehouseError::NoRuntime)?;
            let monitor =
                ExpirationMonitor::new(inventory.clone(), notifier, self.config.scan_interval());
            Some(monitor.spawn(&runtime))
        } else {
            info!("Expiration monitor disabled");
            None
        };

        info!(
            path = %self.config.data_path().display(),
            storage = storage.name(),
            "Warehouse started"
        );

        Ok(Warehouse {
            config: self.config,
            inventory,
            storage,
            monitor: Mutex::new(monitor),
        })
    }
}

// =============================================================================
// Warehouse
// =============================================================================

/// In-memory product collection backed by a single data file.
///
/// Shared by reference between callers; every method takes `&self`.
pub struct Warehouse {
    config: WarehouseConfig,
    inventory: Inventory,
    storage: Arc<dyn ProductStorage>,
    monitor: Mutex<Option<MonitorHandle>>,
}

impl Warehouse {
    pub fn builder(config: WarehouseConfig) -> WarehouseBuilder {
        WarehouseBuilder {
            config,
            storage: None,
            notifier: None,
        }
    }

    /// Starts a store with JSON file storage and the logging notifier.
    pub fn open(config: WarehouseConfig) -> WarehouseResult<Self> {
        Self::builder(config).start()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a record and saves the whole collection.
    pub fn add_product(&self, product: impl Into<Product>) {
        let product = product.into();
        let id = product.id();

        self.inventory.with_products_mut(|products| {
            products.push(product);
            self.persist(products);
        });

        info!(id, "Product added");
    }

    /// Removes every record with `id`, then saves even if none matched.
    pub fn remove_product(&self, id: i32) {
        let removed = self.inventory.with_products_mut(|products| {
            let before = products.len();
            products.retain(|p| p.id() != id);
            let removed = before - products.len();
            self.persist(products);
            removed
        });

        if removed == 0 {
            debug!(id, "No product with this id");
        } else {
            info!(id, removed, "Product removed");
        }
    }

    fn persist(&self, products: &[Product]) {
        let path = self.data_path();
        if let Err(e) = self.storage.save(products, path) {
            error!(
                error = %e,
                path = %path.display(),
                "Failed to save products; memory is ahead of disk"
            );
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot copy in insertion order.
    pub fn all_products(&self) -> Vec<Product> {
        self.inventory.snapshot()
    }

    /// Case-insensitive substring match on names, in insertion order.
    pub fn search_by_name(&self, query: &str) -> Vec<Product> {
        self.inventory
            .with_products(|products| inventory::search_by_name(products, query))
    }

    pub fn total_value(&self) -> f64 {
        self.inventory.with_products(inventory::total_value)
    }

    /// Record counts keyed by variant label (`"FoodProduct"`, ...).
    pub fn product_type_counts(&self) -> BTreeMap<&'static str, usize> {
        self.inventory.with_products(inventory::type_counts)
    }

    /// Food records whose expiration date is before today's local date.
    pub fn expired_food_products(&self) -> Vec<FoodProduct> {
        self.expired_food_products_on(Local::now().date_naive())
    }

    /// Food records whose expiration date is before `today`.
    pub fn expired_food_products_on(&self, today: NaiveDate) -> Vec<FoodProduct> {
        self.inventory
            .with_products(|products| inventory::expired_on(products, today))
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    pub fn data_path(&self) -> &Path {
        self.config.data_path()
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Replaces the collection with the data file's contents.
    ///
    /// On failure the error is logged and the collection is untouched.
    pub fn load_data(&self) {
        if let Err(e) = self.try_load_data() {
            if matches!(&e, WarehouseError::Storage(s) if s.is_not_found()) {
                warn!(path = %self.data_path().display(), "Data file not found, starting empty");
            } else {
                error!(error = %e, "Failed to load products; keeping current data");
            }
        }
    }

    /// Like [`load_data`](Self::load_data) but returns the error.
    ///
    /// Returns the number of records loaded.
    pub fn try_load_data(&self) -> WarehouseResult<usize> {
        let path = self.data_path();

        // Read under the write lock so a concurrent add cannot be overwritten
        self.inventory.with_products_mut(|products| -> WarehouseResult<usize> {
            let loaded = self.storage.load(path)?;
            let count = loaded.len();
            *products = loaded;

            info!(path = %path.display(), count, "Products loaded");
            Ok(count)
        })
    }

    /// Stops the expiration monitor. An in-flight scan completes.
    pub fn shutdown(&self) {
        let handle = self
            .monitor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match handle {
            Some(mut handle) => {
                handle.shutdown();
                info!("Warehouse shut down");
            }
            None => debug!("Warehouse already shut down"),
        }
    }

    /// Whether the expiration monitor is still scheduled.
    pub fn is_monitoring(&self) -> bool {
        self.monitor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(MonitorHandle::is_running)
    }
}

impl std::fmt::Debug for Warehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Warehouse")
            .field("config", &self.config)
            .field("storage", &self.storage.name())
            .field("len", &self.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
