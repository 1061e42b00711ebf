//! Invoice types
//!
//! Invoices are append-only: once persisted they are never updated or
//! deleted, and their lines carry price/name/description snapshots taken at
//! creation time so later product edits cannot rewrite history.

use chrono::{DateTime, Utc};
use core_kernel::{InvoiceId, Money, PartyId, ProductId};
use domain_inventory::Product;
use domain_party::PartyKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BillingError;

/// Direction of the trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    /// We sell to a customer; stock is issued
    Sales,
    /// We buy from a vendor; stock is received
    Purchase,
}

impl InvoiceType {
    /// The counterparty kind this invoice type trades with
    pub fn party_kind(&self) -> PartyKind {
        match self {
            InvoiceType::Sales => PartyKind::Customer,
            InvoiceType::Purchase => PartyKind::Vendor,
        }
    }

    /// Lowercase tag used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::Sales => "sales",
            InvoiceType::Purchase => "purchase",
        }
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(InvoiceType::Sales),
            "purchase" => Ok(InvoiceType::Purchase),
            other => Err(BillingError::UnknownInvoiceType(other.to_string())),
        }
    }
}

/// One invoice line with its product snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// The product this line refers to (may since have been deleted)
    pub product_id: ProductId,
    /// Product name at creation time
    pub product_name: String,
    /// Product description at creation time
    pub description: String,
    /// Units invoiced
    pub quantity: i64,
    /// Unit price at creation time
    pub unit_price: Money,
}

impl InvoiceLine {
    /// Snapshots a product onto a line
    pub fn snapshot(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            description: product.description.clone(),
            quantity,
            unit_price: product.price,
        }
    }

    /// `unit_price * quantity`
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// A persisted sales or purchase invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Sales or purchase
    pub invoice_type: InvoiceType,
    /// The counterparty; its kind follows from `invoice_type`
    pub party_id: PartyId,
    /// Counterparty name snapshot (survives party deletion)
    pub party_name: String,
    /// Ordered line items with price snapshots
    pub lines: Vec<InvoiceLine>,
    /// Invoice total as submitted by the caller
    pub total_amount: Money,
    /// Amount paid at creation time
    pub paid_amount: Money,
    /// `paid_amount >= total_amount` at creation; never recomputed
    pub paid: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a new invoice; `paid` is derived from the two amounts
    pub fn new(
        invoice_type: InvoiceType,
        party_id: PartyId,
        party_name: impl Into<String>,
        lines: Vec<InvoiceLine>,
        total_amount: Money,
        paid_amount: Money,
    ) -> Self {
        Self {
            id: InvoiceId::new(),
            invoice_type,
            party_id,
            party_name: party_name.into(),
            lines,
            total_amount,
            paid_amount,
            paid: paid_amount >= total_amount,
            created_at: Utc::now(),
        }
    }

    /// The counterparty kind implied by the invoice type
    pub fn party_kind(&self) -> PartyKind {
        self.invoice_type.party_kind()
    }

    /// Unpaid remainder of this invoice
    pub fn outstanding(&self) -> Money {
        self.total_amount - self.paid_amount
    }
}
