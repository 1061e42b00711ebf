//! Product aggregate

use core_kernel::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A stocked product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// External product code (human-entered, not unique-enforced)
    pub code: String,
    /// Display name
    pub name: String,
    /// Description (snapshotted onto invoice lines)
    pub description: String,
    /// Unit price; invoices snapshot this at creation time
    pub price: Money,
    /// Stock level; may go negative when sales outrun receipts
    pub quantity: i64,
}

impl Product {
    /// Creates a new product
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            id: ProductId::new(),
            code: code.into(),
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// Adds received stock (purchase invoice line)
    pub fn receive(&mut self, quantity: i64) {
        self.quantity += quantity;
    }

    /// Removes issued stock (sales invoice line); no floor is enforced
    pub fn issue(&mut self, quantity: i64) {
        self.quantity -= quantity;
    }
}
