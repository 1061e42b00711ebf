//! Product repository implementation

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, Money, PortError, ProductId};
use domain_inventory::{Product, ProductPort};

use crate::error::storage_error;

/// PostgreSQL-backed product storage
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    code: String,
    name: String,
    description: String,
    price: Decimal,
    quantity: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Product {
        Product {
            id: ProductId::from_uuid(row.product_id),
            code: row.code,
            name: row.name,
            description: row.description,
            price: Money::new(row.price),
            quantity: row.quantity,
        }
    }
}

#[async_trait]
impl ProductPort for PostgresProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO products (product_id, code, name, description, price, quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.code)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.amount())
        .bind(product.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("insert product", e))?;

        Ok(())
    }

    async fn get(&self, id: ProductId) -> Result<Product, PortError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT * FROM products WHERE product_id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("get product", e))?;

        match row {
            Some(row) => Ok(row.into()),
            None => Err(PortError::not_found("Product", id)),
        }
    }

    async fn list(&self) -> Result<Vec<Product>, PortError> {
        let rows: Vec<ProductRow> = sqlx::query_as("SELECT * FROM products ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list products", e))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn update(&self, product: &Product) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                code = $2, name = $3, description = $4, price = $5, quantity = $6
            WHERE product_id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.code)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.amount())
        .bind(product.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update product", e))?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Product", product.id));
        }
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete product", e))?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Product", id));
        }
        Ok(())
    }
}

impl DomainPort for PostgresProductRepository {
    fn adapter_name(&self) -> &'static str {
        "postgres-products"
    }
}
