//! # In-Memory Product Repository
//!
//! `ProductRepository` implementation backed by a `RwLock<HashMap>`,
//! seeded from the TOML catalog at startup. The repository is an
//! explicit injected capability, so swapping in a database later means
//! implementing one trait.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use store_core::{Product, ProductCatalog, ProductRepository, StoreError, StoreResult};
use uuid::Uuid;

/// Thread-safe in-memory product store
#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl MemoryProductRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded from a catalog
    pub fn with_catalog(catalog: ProductCatalog) -> Self {
        let products = catalog
            .products
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self {
            products: RwLock::new(products),
        }
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, Product>>> {
        self.products
            .read()
            .map_err(|_| StoreError::Internal("product store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Product>>> {
        self.products
            .write()
            .map_err(|_| StoreError::Internal("product store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self.read()?.values().cloned().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(products)
    }

    async fn create(&self, mut product: Product) -> StoreResult<Product> {
        if product.id.is_empty() {
            product.id = Uuid::new_v4().to_string();
        }

        let now = Utc::now();
        product.created_at = now;
        product.updated_at = now;

        let mut products = self.write()?;
        if products.contains_key(&product.id) {
            return Err(StoreError::InvalidRequest(format!(
                "Product already exists: {}",
                product.id
            )));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, mut product: Product) -> StoreResult<Product> {
        let mut products = self.write()?;
        let existing = products
            .get(id)
            .ok_or_else(|| StoreError::ProductNotFound {
                product_id: id.to_string(),
            })?;

        product.id = id.to_string();
        product.created_at = existing.created_at;
        product.updated_at = Utc::now();
        products.insert(id.to_string(), product.clone());
        Ok(product)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut products = self.write()?;
        products
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::ProductNotFound {
                product_id: id.to_string(),
            })
    }
}
