//! In-memory product store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, PortError, ProductId};
use domain_inventory::{Product, ProductPort};

/// In-memory product storage for tests and local development
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductPort for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<(), PortError> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(PortError::conflict(format!(
                "product {} already exists",
                product.id
            )));
        }
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn get(&self, id: ProductId) -> Result<Product, PortError> {
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Product", id))
    }

    async fn list(&self) -> Result<Vec<Product>, PortError> {
        let mut products: Vec<Product> =
            self.products.read().await.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn update(&self, product: &Product) -> Result<(), PortError> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(PortError::not_found("Product", product.id)),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<(), PortError> {
        match self.products.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(PortError::not_found("Product", id)),
        }
    }
}

impl DomainPort for InMemoryProductStore {
    fn adapter_name(&self) -> &'static str {
        "memory-products"
    }
}
