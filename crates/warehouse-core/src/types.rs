//! # Domain Types
//!
//! Product records stored by the warehouse.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product Records                                 │
//! │                                                                         │
//! │                      ┌─────────────────────┐                            │
//! │                      │       Product       │                            │
//! │                      │  (sum type, tagged  │                            │
//! │                      │   by ProductKind)   │                            │
//! │                      └──────────┬──────────┘                            │
//! │                  ┌──────────────┴──────────────┐                        │
//! │                  ▼                             ▼                        │
//! │  ┌───────────────────────────┐  ┌───────────────────────────┐          │
//! │  │       FoodProduct         │  │    ElectronicsProduct     │          │
//! │  │  ───────────────────────  │  │  ───────────────────────  │          │
//! │  │  info: ProductInfo        │  │  info: ProductInfo        │          │
//! │  │  expiration_date (date)   │  │  warranty_months (int)    │          │
//! │  └───────────────────────────┘  └───────────────────────────┘          │
//! │                                                                         │
//! │  ProductInfo: id, name, price, quantity (shared by every variant)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Validation Here
//! Records accept any value: a negative price or an empty name is stored
//! as given. Text-to-type checks live in [`crate::validation`], at the
//! boundary where raw form input arrives.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};

// =============================================================================
// Product Kind
// =============================================================================

/// The variant a product record belongs to.
///
/// A record's kind is fixed when it is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProductKind {
    /// Perishable goods with an expiration date.
    Food,
    /// Devices with a warranty period.
    Electronics,
}

impl ProductKind {
    /// Every kind, in declaration order.
    pub const ALL: [ProductKind; 2] = [ProductKind::Food, ProductKind::Electronics];

    /// Canonical label, used for type counts and as the default JSON tag.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductKind::Food => "FoodProduct",
            ProductKind::Electronics => "ElectronicsProduct",
        }
    }

    /// Field names written by this variant's serialized body.
    pub const fn fields(&self) -> &'static [&'static str] {
        match self {
            ProductKind::Food => FoodProduct::FIELDS,
            ProductKind::Electronics => ElectronicsProduct::FIELDS,
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductKind {
    type Err = ValidationError;

    /// Accepts the short form names ("Food", "Electronics") and the
    /// canonical labels, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" | "foodproduct" => Ok(ProductKind::Food),
            "electronics" | "electronicsproduct" => Ok(ProductKind::Electronics),
            _ => Err(ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: vec!["Food".to_string(), "Electronics".to_string()],
            }),
        }
    }
}

// =============================================================================
// Common Fields
// =============================================================================

/// Fields shared by every product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInfo {
    /// Caller-supplied key. Uniqueness is not enforced.
    pub id: i32,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: f64,

    /// Units in stock.
    pub quantity: i32,
}

impl ProductInfo {
    /// Creates the common part of a product record.
    pub fn new(id: i32, name: impl Into<String>, price: f64, quantity: i32) -> Self {
        ProductInfo {
            id,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Stock value (`price * quantity`).
    #[inline]
    pub fn value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

// =============================================================================
// Food
// =============================================================================

/// A perishable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FoodProduct {
    #[serde(flatten)]
    pub info: ProductInfo,

    /// Last day the product may be sold (calendar date, no time zone).
    #[ts(as = "String")]
    pub expiration_date: NaiveDate,
}

impl FoodProduct {
    /// Serialized field names, in write order.
    pub const FIELDS: &'static [&'static str] =
        &["id", "name", "price", "quantity", "expirationDate"];

    pub fn new(
        id: i32,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        expiration_date: NaiveDate,
    ) -> Self {
        FoodProduct {
            info: ProductInfo::new(id, name, price, quantity),
            expiration_date,
        }
    }

    /// True when the expiration date lies strictly before `today`.
    ///
    /// A product expiring today is still sellable.
    #[inline]
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiration_date < today
    }
}

// =============================================================================
// Electronics
// =============================================================================

/// A device sold with a warranty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ElectronicsProduct {
    #[serde(flatten)]
    pub info: ProductInfo,

    /// Warranty length in months.
    pub warranty_months: i32,
}

impl ElectronicsProduct {
    /// Serialized field names, in write order.
    pub const FIELDS: &'static [&'static str] =
        &["id", "name", "price", "quantity", "warrantyMonths"];

    pub fn new(
        id: i32,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        warranty_months: i32,
    ) -> Self {
        ElectronicsProduct {
            info: ProductInfo::new(id, name, price, quantity),
            warranty_months,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// One inventory item: exactly one of the product variants.
///
/// ## Mutation
/// Common fields change through the `set_*` methods; variant fields change
/// through [`Product::as_food_mut`] / [`Product::as_electronics_mut`]. None of
/// these can turn a food record into an electronics record.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Food(FoodProduct),
    Electronics(ElectronicsProduct),
}

impl Product {
    /// Returns the variant of this record.
    pub fn kind(&self) -> ProductKind {
        match self {
            Product::Food(_) => ProductKind::Food,
            Product::Electronics(_) => ProductKind::Electronics,
        }
    }

    /// Returns the common fields.
    pub fn info(&self) -> &ProductInfo {
        match self {
            Product::Food(p) => &p.info,
            Product::Electronics(p) => &p.info,
        }
    }

    fn info_mut(&mut self) -> &mut ProductInfo {
        match self {
            Product::Food(p) => &mut p.info,
            Product::Electronics(p) => &mut p.info,
        }
    }

    #[inline]
    pub fn id(&self) -> i32 {
        self.info().id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.info().name
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.info().price
    }

    #[inline]
    pub fn quantity(&self) -> i32 {
        self.info().quantity
    }

    pub fn set_id(&mut self, id: i32) {
        self.info_mut().id = id;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.info_mut().name = name.into();
    }

    pub fn set_price(&mut self, price: f64) {
        self.info_mut().price = price;
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.info_mut().quantity = quantity;
    }

    /// Stock value (`price * quantity`).
    #[inline]
    pub fn value(&self) -> f64 {
        self.info().value()
    }

    pub fn as_food(&self) -> Option<&FoodProduct> {
        match self {
            Product::Food(p) => Some(p),
            Product::Electronics(_) => None,
        }
    }

    pub fn as_food_mut(&mut self) -> Option<&mut FoodProduct> {
        match self {
            Product::Food(p) => Some(p),
            Product::Electronics(_) => None,
        }
    }

    pub fn as_electronics(&self) -> Option<&ElectronicsProduct> {
        match self {
            Product::Electronics(p) => Some(p),
            Product::Food(_) => None,
        }
    }

    pub fn as_electronics_mut(&mut self) -> Option<&mut ElectronicsProduct> {
        match self {
            Product::Electronics(p) => Some(p),
            Product::Food(_) => None,
        }
    }
}

impl From<FoodProduct> for Product {
    fn from(p: FoodProduct) -> Self {
        Product::Food(p)
    }
}

impl From<ElectronicsProduct> for Product {
    fn from(p: ElectronicsProduct) -> Self {
        Product::Electronics(p)
    }
}

impl TryFrom<Product> for FoodProduct {
    type Error = CoreError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        match product {
            Product::Food(p) => Ok(p),
            other => Err(CoreError::VariantMismatch {
                id: other.id(),
                expected: ProductKind::Food,
                actual: other.kind(),
            }),
        }
    }
}

impl TryFrom<Product> for ElectronicsProduct {
    type Error = CoreError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        match product {
            Product::Electronics(p) => Ok(p),
            other => Err(CoreError::VariantMismatch {
                id: other.id(),
                expected: ProductKind::Electronics,
                actual: other.kind(),
            }),
        }
    }
}

fn write_info(f: &mut fmt::Formatter<'_>, kind: ProductKind, info: &ProductInfo) -> fmt::Result {
    write!(
        f,
        "{}{{id={}, name='{}', price={:?}, quantity={}, ",
        kind.label(),
        info.id,
        info.name,
        info.price,
        info.quantity
    )
}

/// Human-readable rendering; always ends with the variant field.
///
/// ```text
/// FoodProduct{id=3001, name='Bread', price=45.5, quantity=4, expirationDate=2026-03-10}
/// ElectronicsProduct{id=3002, name='Charger', price=1490.0, quantity=2, warrantyMonths=6}
/// ```
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Food(p) => fmt::Display::fmt(p, f),
            Product::Electronics(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl fmt::Display for FoodProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_info(f, ProductKind::Food, &self.info)?;
        write!(f, "expirationDate={}}}", self.expiration_date.format("%Y-%m-%d"))
    }
}

impl fmt::Display for ElectronicsProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_info(f, ProductKind::Electronics, &self.info)?;
        write!(f, "warrantyMonths={}}}", self.warranty_months)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
