//! # Validation Module
//!
//! Turns raw form text into typed product records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form / command line                                          │
//! │  └── Collects raw text for each field                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── id, quantity      → i32                                           │
//! │  ├── price             → f64                                           │
//! │  └── extra             → YYYY-MM-DD (Food) or months (Electronics)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Warehouse store                                              │
//! │  └── Accepts any typed record, persists it                             │
//! │                                                                         │
//! │  A parse failure stops at layer 2: the store never sees bad input.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use warehouse_core::validation::ProductForm;
//! use warehouse_core::ProductKind;
//!
//! let form = ProductForm {
//!     kind: "Food".into(),
//!     id: "3001".into(),
//!     name: "Bread".into(),
//!     price: "45.50".into(),
//!     quantity: "4".into(),
//!     extra: "2026-03-10".into(),
//! };
//!
//! let product = form.parse().unwrap();
//! assert_eq!(product.kind(), ProductKind::Food);
//! ```
//!
//! Range checks are deliberately absent: a negative price parses fine.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{ElectronicsProduct, FoodProduct, Product, ProductKind};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Form
// =============================================================================

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// "Food" or "Electronics" (case-insensitive).
    pub kind: String,
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: String,
    /// Expiration date for food, warranty months for electronics.
    pub extra: String,
}

impl ProductForm {
    /// Parses every field and builds the matching product variant.
    ///
    /// Fields are checked in form order; the first failure is returned.
    pub fn parse(&self) -> ValidationResult<Product> {
        let kind: ProductKind = self.kind.parse()?;
        let id = parse_int("id", &self.id)?;
        let name = self.name.trim().to_string();
        let price = parse_price(&self.price)?;
        let quantity = parse_int("quantity", &self.quantity)?;

        let product = match kind {
            ProductKind::Food => {
                let expiration_date = parse_date("expirationDate", &self.extra)?;
                FoodProduct::new(id, name, price, quantity, expiration_date).into()
            }
            ProductKind::Electronics => {
                let warranty_months = parse_int("warrantyMonths", &self.extra)?;
                ElectronicsProduct::new(id, name, price, quantity, warranty_months).into()
            }
        };

        Ok(product)
    }
}

// =============================================================================
// Field Parsers
// =============================================================================

/// Parses the id typed into the remove action.
pub fn parse_product_id(text: &str) -> ValidationResult<i32> {
    parse_int("id", text)
}

fn required<'a>(field: &str, text: &'a str) -> ValidationResult<&'a str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(text)
}

fn parse_int(field: &str, text: &str) -> ValidationResult<i32> {
    required(field, text)?
        .parse::<i32>()
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

fn parse_price(text: &str) -> ValidationResult<f64> {
    let price = required("price", text)?
        .parse::<f64>()
        .map_err(|e| ValidationError::invalid_format("price", e.to_string()))?;

    // "NaN" and "inf" parse as f64 but are not prices
    if !price.is_finite() {
        return Err(ValidationError::invalid_format("price", "must be a finite number"));
    }

    Ok(price)
}

fn parse_date(field: &str, text: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(required(field, text)?, "%Y-%m-%d")
        .map_err(|e| ValidationError::invalid_format(field, format!("expected YYYY-MM-DD ({e})")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn food_form() -> ProductForm {
        ProductForm {
            kind: "Food".into(),
            id: "3001".into(),
            name: " Bread ".into(),
            price: "45.50".into(),
            quantity: "4".into(),
            extra: "2026-03-10".into(),
        }
    }

    #[test]
    fn test_parse_food() {
        let product = food_form().parse().unwrap();
        let food = product.as_food().unwrap();
        assert_eq!(food.info.id, 3001);
        assert_eq!(food.info.name, "Bread");
        assert_eq!(food.info.price, 45.5);
        assert_eq!(food.info.quantity, 4);
        assert_eq!(food.expiration_date, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    }

    #[test]
    fn test_parse_electronics() {
        let form = ProductForm {
            kind: "electronics".into(),
            id: "3002".into(),
            name: "Charger 65W".into(),
            price: "1490".into(),
            quantity: "2".into(),
            extra: "6".into(),
        };
        let product = form.parse().unwrap();
        assert_eq!(product.kind(), ProductKind::Electronics);
        assert_eq!(product.as_electronics().unwrap().warranty_months, 6);
    }

    #[test]
    fn test_bad_numbers_name_the_field() {
        let mut form = food_form();
        form.quantity = "four".into();
        assert_eq!(form.parse().unwrap_err().field(), "quantity");

        let mut form = food_form();
        form.price = "".into();
        assert!(matches!(form.parse(), Err(ValidationError::Required { .. })));

        let mut form = food_form();
        form.price = "NaN".into();
        assert_eq!(form.parse().unwrap_err().field(), "price");
    }

    #[test]
    fn test_food_requires_iso_date() {
        let mut form = food_form();
        form.extra = "10.03.2026".into();
        let err = form.parse().unwrap_err();
        assert_eq!(err.field(), "expirationDate");
    }

    #[test]
    fn test_electronics_requires_integer_months() {
        let mut form = food_form();
        form.kind = "Electronics".into();
        assert_eq!(form.parse().unwrap_err().field(), "warrantyMonths");
    }

    #[test]
    fn test_unknown_kind() {
        let mut form = food_form();
        form.kind = "Furniture".into();
        assert!(matches!(form.parse(), Err(ValidationError::NotAllowed { .. })));
    }

    #[test]
    fn test_negative_values_are_accepted() {
        let mut form = food_form();
        form.price = "-1".into();
        form.quantity = "-3".into();
        let product = form.parse().unwrap();
        assert_eq!(product.price(), -1.0);
        assert_eq!(product.quantity(), -3);
    }

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id(" 2001 ").unwrap(), 2001);
        assert!(parse_product_id("x").is_err());
        assert!(parse_product_id("").is_err());
    }
}
