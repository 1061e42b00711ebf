//! Product DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use core_kernel::Money;
use domain_inventory::Product;

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// External product code; the original client field is `productID`
    #[serde(rename = "productID")]
    #[validate(length(min = 1, message = "productID is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: String,
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl CreateProductRequest {
    pub fn into_product(self) -> Product {
        Product::new(
            self.code,
            self.name,
            self.description,
            Money::new(self.price),
            self.quantity.unwrap_or(0),
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(rename = "productID")]
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
}

impl UpdateProductRequest {
    /// Applies the present fields onto an existing product
    pub fn apply_to(self, product: &mut Product) {
        if let Some(code) = self.code {
            product.code = code;
        }
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = Money::new(price);
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    #[serde(rename = "productID")]
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: *product.id.as_uuid(),
            code: product.code,
            name: product.name,
            description: product.description,
            price: product.price.amount(),
            quantity: product.quantity,
        }
    }
}
