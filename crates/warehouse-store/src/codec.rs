//! # Product Codec
//!
//! Tagged JSON encoding for product collections.
//!
//! ## Wire Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       warehouse.json Layout                             │
//! │                                                                         │
//! │  [                                                                      │
//! │    {                                                                    │
//! │      "type": "FoodProduct",        ◄── tag field, written first        │
//! │      "id": 3001,                                                        │
//! │      "name": "Bread",                                                   │
//! │      "price": 45.5,                                                     │
//! │      "quantity": 4,                                                     │
//! │      "expirationDate": "2026-03-10" ◄── ISO-8601 date, no zone          │
//! │    },                                                                   │
//! │    {                                                                    │
//! │      "type": "ElectronicsProduct",                                      │
//! │      "id": 3002, "name": "Charger", "price": 1490.0, "quantity": 2,     │
//! │      "warrantyMonths": 6                                                │
//! │    }                                                                    │
//! │  ]                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Type Registry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Registry (fixed once built)                          │
//! │                                                                         │
//! │   ProductKind::Food        ◄──────►  "FoodProduct"                      │
//! │   ProductKind::Electronics ◄──────►  "ElectronicsProduct"               │
//! │                                                                         │
//! │   build() rejects:                                                     │
//! │   • an empty tag field name                                            │
//! │   • a kind or label registered twice                                   │
//! │   • a tag field that a variant body already uses ("name", "id", ...)   │
//! │                                                                         │
//! │   READ:  tag ──► label lookup (case-sensitive) ──► variant decoder     │
//! │   WRITE: kind ──► label lookup ──► { tag, ...variant body }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any bad element fails the whole document; there is no partial decode.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;
use warehouse_core::{ElectronicsProduct, FoodProduct, Product, ProductKind};

use crate::error::{CodecError, CodecResult};

/// Tag field name used by the standard registry.
pub const DEFAULT_TAG_FIELD: &str = "type";

// =============================================================================
// Type Registry
// =============================================================================

/// Bidirectional mapping between product kinds and their JSON tag labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    tag_field: String,
    label_to_kind: HashMap<String, ProductKind>,
    kind_to_label: HashMap<ProductKind, String>,
}

impl TypeRegistry {
    /// Starts a registry that stores the variant label under `tag_field`.
    pub fn builder(tag_field: impl Into<String>) -> TypeRegistryBuilder {
        TypeRegistryBuilder {
            tag_field: tag_field.into(),
            entries: Vec::new(),
        }
    }

    /// Every kind under its canonical label, tagged with `"type"`.
    ///
    /// Runs the same checks as [`TypeRegistryBuilder::build`].
    pub fn standard() -> Self {
        let mut registry = TypeRegistry::empty(DEFAULT_TAG_FIELD.to_string());

        for kind in ProductKind::ALL {
            let registered = registry.insert(kind, kind.label().to_string());
            debug_assert!(registered.is_ok(), "canonical labels must register: {registered:?}");
        }

        registry
    }

    fn empty(tag_field: String) -> Self {
        TypeRegistry {
            tag_field,
            label_to_kind: HashMap::new(),
            kind_to_label: HashMap::new(),
        }
    }

    /// Adds one mapping, rejecting duplicates and tag collisions.
    fn insert(&mut self, kind: ProductKind, label: String) -> CodecResult<()> {
        if self.label_to_kind.contains_key(&label) || self.kind_to_label.contains_key(&kind) {
            return Err(CodecError::DuplicateRegistration { kind, label });
        }

        if kind.fields().contains(&self.tag_field.as_str()) {
            return Err(CodecError::TagFieldCollision {
                field: self.tag_field.clone(),
                label,
            });
        }

        self.label_to_kind.insert(label.clone(), kind);
        self.kind_to_label.insert(kind, label);
        Ok(())
    }

    /// Returns the tag field name.
    pub fn tag_field(&self) -> &str {
        &self.tag_field
    }

    /// Returns the label written for `kind`.
    pub fn label_of(&self, kind: ProductKind) -> Option<&str> {
        self.kind_to_label.get(&kind).map(String::as_str)
    }

    /// Returns the kind a label decodes to. Labels are case-sensitive.
    pub fn kind_of(&self, label: &str) -> Option<ProductKind> {
        self.label_to_kind.get(label).copied()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for [`TypeRegistry`].
///
/// ## Usage
/// ```rust
/// use warehouse_core::ProductKind;
/// use warehouse_store::codec::TypeRegistry;
///
/// let registry = TypeRegistry::builder("kind")
///     .register(ProductKind::Food, "food")
///     .register(ProductKind::Electronics, "electronics")
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.kind_of("food"), Some(ProductKind::Food));
/// ```
#[derive(Debug, Clone)]
pub struct TypeRegistryBuilder {
    tag_field: String,
    entries: Vec<(ProductKind, String)>,
}

impl TypeRegistryBuilder {
    /// Registers `kind` under `label`.
    pub fn register(mut self, kind: ProductKind, label: impl Into<String>) -> Self {
        self.entries.push((kind, label.into()));
        self
    }

    /// Validates the registrations and freezes the registry.
    pub fn build(self) -> CodecResult<TypeRegistry> {
        if self.tag_field.trim().is_empty() {
            return Err(CodecError::EmptyTagField);
        }

        let mut registry = TypeRegistry::empty(self.tag_field);
        for (kind, label) in self.entries {
            registry.insert(kind, label)?;
        }

        Ok(registry)
    }
}

// =============================================================================
// Codec
// =============================================================================

/// Encodes and decodes product sequences as a JSON array of tagged objects.
#[derive(Debug, Clone)]
pub struct ProductCodec {
    registry: TypeRegistry,
    pretty: bool,
}

impl ProductCodec {
    /// Creates a codec over a built registry. Output is pretty-printed.
    pub fn new(registry: TypeRegistry) -> Self {
        ProductCodec {
            registry,
            pretty: true,
        }
    }

    /// Codec with the standard registry.
    pub fn standard() -> Self {
        Self::new(TypeRegistry::standard())
    }

    /// Toggles indentation of the encoded document.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    // =========================================================================
    // Write Path
    // =========================================================================

    /// Encodes products as JSON bytes.
    pub fn encode(&self, products: &[Product]) -> CodecResult<Vec<u8>> {
        let document = self.to_value(products)?;

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)
        } else {
            serde_json::to_vec(&document)
        }
        .map_err(CodecError::Serialize)?;

        debug!(count = products.len(), bytes = bytes.len(), "Encoded products");
        Ok(bytes)
    }

    /// Encodes products as a JSON array value.
    pub fn to_value(&self, products: &[Product]) -> CodecResult<Value> {
        products
            .iter()
            .enumerate()
            .map(|(index, product)| self.encode_one(index, product))
            .collect::<CodecResult<Vec<_>>>()
            .map(Value::Array)
    }

    fn encode_one(&self, index: usize, product: &Product) -> CodecResult<Value> {
        let kind = product.kind();
        let label = self
            .registry
            .label_of(kind)
            .ok_or(CodecError::UnregisteredKind(kind))?;

        let body = match product {
            Product::Food(p) => serde_json::to_value(p),
            Product::Electronics(p) => serde_json::to_value(p),
        }
        .map_err(CodecError::Serialize)?;

        let Value::Object(fields) = body else {
            return Err(CodecError::NotAnObject { index });
        };

        if !product.price().is_finite() {
            return Err(CodecError::NonFiniteValue {
                index,
                field: "price".to_string(),
            });
        }

        let tag_field = self.registry.tag_field();
        if fields.contains_key(tag_field) {
            return Err(CodecError::TagFieldCollision {
                field: tag_field.to_string(),
                label: label.to_string(),
            });
        }

        let mut tagged = Map::with_capacity(fields.len() + 1);
        tagged.insert(tag_field.to_string(), Value::String(label.to_string()));
        tagged.extend(fields);

        Ok(Value::Object(tagged))
    }

    // =========================================================================
    // Read Path
    // =========================================================================

    /// Decodes JSON bytes into products, in document order.
    pub fn decode(&self, bytes: &[u8]) -> CodecResult<Vec<Product>> {
        let document: Value = serde_json::from_slice(bytes).map_err(CodecError::Syntax)?;
        let products = self.from_value(document)?;

        debug!(count = products.len(), "Decoded products");
        Ok(products)
    }

    /// Decodes a JSON array value into products.
    pub fn from_value(&self, document: Value) -> CodecResult<Vec<Product>> {
        let Value::Array(elements) = document else {
            return Err(CodecError::NotAnArray);
        };

        elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| self.decode_one(index, element))
            .collect()
    }

    fn decode_one(&self, index: usize, element: Value) -> CodecResult<Product> {
        let Value::Object(mut fields) = element else {
            return Err(CodecError::NotAnObject { index });
        };

        let tag_field = self.registry.tag_field();
        let label = match fields.remove(tag_field) {
            Some(Value::String(label)) => label,
            Some(_) => {
                return Err(CodecError::TagNotString {
                    index,
                    field: tag_field.to_string(),
                })
            }
            None => {
                return Err(CodecError::MissingTag {
                    index,
                    field: tag_field.to_string(),
                })
            }
        };

        let kind = self
            .registry
            .kind_of(&label)
            .ok_or_else(|| CodecError::UnknownTag {
                index,
                label: label.clone(),
            })?;

        let body = Value::Object(fields);
        let decoded = match kind {
            ProductKind::Food => serde_json::from_value::<FoodProduct>(body).map(Product::from),
            ProductKind::Electronics => {
                serde_json::from_value::<ElectronicsProduct>(body).map(Product::from)
            }
        };

        decoded.map_err(|source| CodecError::InvalidRecord {
            index,
            label,
            source,
        })
    }
}

impl Default for ProductCodec {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// Tests
// =============================================================================
