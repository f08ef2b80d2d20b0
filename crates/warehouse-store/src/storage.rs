//! # Storage Module
//!
//! Persistence strategies for the product collection.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Persistence Contract                              │
//! │                                                                         │
//! │  save(products, path)                                                  │
//! │  └── encode all ──► replace the whole file (no append, not atomic)     │
//! │                                                                         │
//! │  load(path)                                                            │
//! │  └── read the whole file ──► decode all ──► fresh Vec                  │
//! │      missing file or bad JSON = error; nothing partial is returned     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tracing::debug;
use warehouse_core::Product;

use crate::codec::ProductCodec;
use crate::error::{StorageError, StorageResult};

// =============================================================================
// Storage Trait
// =============================================================================

/// A way of persisting the full product collection at a path.
///
/// Implementations are shared between the caller and the expiration
/// monitor, hence `Send + Sync`.
pub trait ProductStorage: Send + Sync {
    /// Writes `products` to `path`, replacing any prior content.
    fn save(&self, products: &[Product], path: &Path) -> StorageResult<()>;

    /// Reads the full collection stored at `path`.
    fn load(&self, path: &Path) -> StorageResult<Vec<Product>>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

// =============================================================================
// JSON File Storage
// =============================================================================

/// Stores products as a tagged JSON array in a single file.
#[derive(Debug, Clone, Default)]
pub struct JsonFileStorage {
    codec: ProductCodec,
}

impl JsonFileStorage {
    pub fn new(codec: ProductCodec) -> Self {
        JsonFileStorage { codec }
    }

    /// Standard registry, pretty-printed output.
    pub fn standard() -> Self {
        Self::new(ProductCodec::standard())
    }

    pub fn codec(&self) -> &ProductCodec {
        &self.codec
    }
}

impl ProductStorage for JsonFileStorage {
    fn save(&self, products: &[Product], path: &Path) -> StorageResult<()> {
        let bytes = self.codec.encode(products)?;

        std::fs::write(path, &bytes).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            count = products.len(),
            bytes = bytes.len(),
            "Saved products"
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> StorageResult<Vec<Product>> {
        let bytes = std::fs::read(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let products = self.codec.decode(&bytes)?;

        debug!(path = %path.display(), count = products.len(), "Loaded products");
        Ok(products)
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use chrono::NaiveDate;
    use warehouse_core::{ElectronicsProduct, FoodProduct};

    fn products() -> Vec<Product> {
        vec![
            ElectronicsProduct::new(2001, "USB-C cable", 390.0, 10, 3).into(),
            FoodProduct::new(
                2002,
                "Milk 2.5%",
                89.9,
                12,
                NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            )
            .into(),
        ]
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.json");
        let storage = JsonFileStorage::standard();

        storage.save(&products(), &path).unwrap();
        assert_eq!(storage.load(&path).unwrap(), products());
    }

    #[test]
    fn test_save_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.json");
        let storage = JsonFileStorage::standard();

        storage.save(&products(), &path).unwrap();
        storage.save(&products()[..1], &path).unwrap();

        let loaded = storage.load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), 2001);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileStorage::standard()
            .load(&dir.path().join("absent.json"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("warehouse.json");
        let err = JsonFileStorage::standard().save(&products(), &path).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_corrupt_file_is_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStorage::standard().load(&path).unwrap_err();
        assert!(matches!(err, StorageError::Codec(CodecError::Syntax(_))));
    }

    #[test]
    fn test_name() {
        assert_eq!(JsonFileStorage::default().name(), "json-file");
    }
}
