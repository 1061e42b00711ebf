//! Product storage port

use async_trait::async_trait;
use core_kernel::{DomainPort, PortError, ProductId};

use crate::product::Product;

/// Storage operations the inventory domain needs from its data source
#[async_trait]
pub trait ProductPort: DomainPort {
    /// Persists a new product
    async fn insert(&self, product: &Product) -> Result<(), PortError>;

    /// Fetches a product by id
    async fn get(&self, id: ProductId) -> Result<Product, PortError>;

    /// Lists all products
    async fn list(&self) -> Result<Vec<Product>, PortError>;

    /// Overwrites an existing product
    async fn update(&self, product: &Product) -> Result<(), PortError>;

    /// Deletes a product; past invoices keep their line snapshots
    async fn delete(&self, id: ProductId) -> Result<(), PortError>;
}
