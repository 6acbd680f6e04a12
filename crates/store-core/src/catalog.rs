//! # Product Catalog
//!
//! The `ProductRepository` trait is the injected persistence capability
//! for the catalog. Handlers and the storefront compose against this
//! trait, never against a concrete store.
//!
//! `ProductCatalog` is the serializable seed format, loaded from
//! `config/products.toml` at startup.

use crate::error::StoreResult;
use crate::product::Product;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persistence capability for the product catalog.
///
/// `create` returns the stored product (the implementation may assign
/// the id and timestamps). `update` and `delete` fail with
/// `StoreError::ProductNotFound` for unknown ids.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch a single product by id
    async fn get(&self, id: &str) -> StoreResult<Option<Product>>;

    /// List all products
    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// Store a new product
    async fn create(&self, product: Product) -> StoreResult<Product>;

    /// Replace fields of an existing product
    async fn update(&self, id: &str, product: Product) -> StoreResult<Product>;

    /// Remove a product
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Type alias for a shared repository (dynamic dispatch)
pub type BoxedProductRepository = Arc<dyn ProductRepository>;

/// Seed catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Find a product by ID
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Get all active products
    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.active)
    }

    /// Load catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
