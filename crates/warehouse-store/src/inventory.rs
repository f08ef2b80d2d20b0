//! # Inventory
//!
//! The shared, lock-guarded product collection.
//!
//! ## Thread Safety
//! The collection lives in `Arc<RwLock<Vec<Product>>>` because the caller
//! and the expiration monitor touch it concurrently:
//! 1. Mutations take the write lock, so no reader sees half an update
//! 2. Queries and the monitor scan share the read lock
//!
//! A poisoned lock is recovered rather than propagated: every mutation
//! leaves the `Vec` in a valid state before anything can panic.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;
use warehouse_core::{FoodProduct, Product};

/// Cloneable handle to the product collection.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: Arc<RwLock<Vec<Product>>>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the collection.
    ///
    /// ## Usage
    /// ```rust
    /// use warehouse_store::Inventory;
    ///
    /// let inventory = Inventory::new();
    /// assert_eq!(inventory.with_products(|p| p.len()), 0);
    /// ```
    pub fn with_products<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Product]) -> R,
    {
        let products = self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&products)
    }

    /// Executes a function with write access to the collection.
    pub fn with_products_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<Product>) -> R,
    {
        let mut products = self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut products)
    }

    /// Copy of the collection in insertion order.
    pub fn snapshot(&self) -> Vec<Product> {
        self.with_products(<[Product]>::to_vec)
    }

    pub fn len(&self) -> usize {
        self.with_products(<[Product]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Queries
// =============================================================================
// Pure functions over a borrowed slice, run under the read lock.

/// Records whose name contains `query`, ignoring case.
pub fn search_by_name(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Sum of `price * quantity` in plain floating point.
pub fn total_value(products: &[Product]) -> f64 {
    products.iter().map(Product::value).sum()
}

/// Record count per canonical variant label.
pub fn type_counts(products: &[Product]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for product in products {
        *counts.entry(product.kind().label()).or_insert(0) += 1;
    }
    counts
}

/// Food records dated strictly before `today`.
pub fn expired_on(products: &[Product], today: NaiveDate) -> Vec<FoodProduct> {
    products
        .iter()
        .filter_map(Product::as_food)
        .filter(|food| food.is_expired_on(today))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use warehouse_core::ElectronicsProduct;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stock() -> Vec<Product> {
        vec![
            FoodProduct::new(1, "Банан", 95.0, 3, date(2026, 10, 1)).into(),
            ElectronicsProduct::new(2, "Наушники", 3200.0, 1, 12).into(),
            FoodProduct::new(3, "Банановый йогурт", 60.0, 2, date(2026, 10, 18)).into(),
        ]
    }

    #[test]
    fn test_search_ignores_case_and_keeps_order() {
        let found = search_by_name(&stock(), "БАНАН");
        let ids: Vec<i32> = found.iter().map(Product::id).collect();
        assert_eq!(ids, [1, 3]);
        assert!(search_by_name(&stock(), "kiwi").is_empty());
    }

    #[test]
    fn test_total_value() {
        assert_eq!(total_value(&stock()), 285.0 + 3200.0 + 120.0);
        assert_eq!(total_value(&[]), 0.0);
    }

    #[test]
    fn test_type_counts() {
        let counts = type_counts(&stock());
        assert_eq!(counts["FoodProduct"], 2);
        assert_eq!(counts["ElectronicsProduct"], 1);
        assert_eq!(counts.values().sum::<usize>(), 3);
        assert!(type_counts(&[]).is_empty());
    }

    #[test]
    fn test_expired_is_strict() {
        let expired = expired_on(&stock(), date(2026, 10, 18));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].info.id, 1);
    }

    #[test]
    fn test_handles_share_state() {
        let inventory = Inventory::new();
        let other = inventory.clone();

        inventory.with_products_mut(|p| p.extend(stock()));
        assert_eq!(other.len(), 3);

        let mut copy = other.snapshot();
        copy.clear();
        assert!(!inventory.is_empty());
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let inventory = Inventory::new();
        let poisoner = inventory.clone();

        let _ = std::thread::spawn(move || {
            poisoner.with_products_mut(|p| {
                p.push(ElectronicsProduct::new(9, "Radio", 1.0, 1, 0).into());
                panic!("boom");
            })
        })
        .join();

        assert_eq!(inventory.len(), 1);
    }
}
