//! Invoice and payment DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{Money, PartyId, ProductId};
use domain_billing::{
    CreateInvoiceRequest as CreateInvoiceCommand, Invoice, InvoiceLine, InvoiceLineRequest,
    Payment,
};
use domain_party::PartyKind;

use crate::error::ApiError;

/// Body of `POST /api/invoices`
///
/// All fields are optional at the serde level so an incomplete body gets
/// the original "Missing required fields" answer instead of a generic
/// deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[serde(rename = "type")]
    pub invoice_type: Option<String>,
    pub customer_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub products: Option<Vec<InvoiceLineDto>>,
    pub total_amount: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineDto {
    pub product_id: Uuid,
    pub quantity: i64,
}

impl CreateInvoiceRequest {
    /// Converts the wire request into the domain command
    pub fn into_command(self) -> Result<CreateInvoiceCommand, ApiError> {
        let missing = self.invoice_type.is_none()
            || self.products.is_none()
            || self.total_amount.is_none()
            || self.paid_amount.is_none()
            || (self.customer_id.is_none() && self.vendor_id.is_none());
        if missing {
            return Err(ApiError::BadRequest("Missing required fields".to_string()));
        }

        // Checked for presence above.
        let invoice_type = self
            .invoice_type
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(ApiError::from_create_flow)?;
        let products = self
            .products
            .unwrap_or_default()
            .into_iter()
            .map(|line| InvoiceLineRequest {
                product_id: ProductId::from_uuid(line.product_id),
                quantity: line.quantity,
            })
            .collect();

        Ok(CreateInvoiceCommand {
            invoice_type,
            customer_id: self.customer_id.map(PartyId::from_uuid),
            vendor_id: self.vendor_id.map(PartyId::from_uuid),
            products,
            total_amount: Money::new(self.total_amount.unwrap_or_default()),
            paid_amount: Money::new(self.paid_amount.unwrap_or_default()),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineResponse {
    pub product_id: Uuid,
    pub product_name: String,
    pub description: String,
    pub quantity: i64,
    pub price: Decimal,
}

impl From<InvoiceLine> for InvoiceLineResponse {
    fn from(line: InvoiceLine) -> Self {
        Self {
            product_id: *line.product_id.as_uuid(),
            product_name: line.product_name,
            description: line.description,
            quantity: line.quantity,
            price: line.unit_price.amount(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub invoice_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    pub products: Vec<InvoiceLineResponse>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        let party_id = *invoice.party_id.as_uuid();
        let (customer_id, customer_name, vendor_id, vendor_name) = match invoice.party_kind() {
            PartyKind::Customer => (Some(party_id), Some(invoice.party_name.clone()), None, None),
            PartyKind::Vendor => (None, None, Some(party_id), Some(invoice.party_name.clone())),
        };

        Self {
            id: *invoice.id.as_uuid(),
            invoice_type: invoice.invoice_type.as_str().to_string(),
            customer_id,
            customer_name,
            vendor_id,
            vendor_name,
            products: invoice.lines.into_iter().map(Into::into).collect(),
            total_amount: invoice.total_amount.amount(),
            paid_amount: invoice.paid_amount.amount(),
            paid: invoice.paid,
            created_at: invoice.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<Uuid>,
    pub payment_slip_id: i64,
    pub paid_amount: Decimal,
    pub date: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        let party_id = *payment.party_id.as_uuid();
        let (customer_id, vendor_id) = match payment.party_kind {
            PartyKind::Customer => (Some(party_id), None),
            PartyKind::Vendor => (None, Some(party_id)),
        };

        Self {
            id: *payment.id.as_uuid(),
            customer_id,
            vendor_id,
            payment_slip_id: payment.slip_id.value(),
            paid_amount: payment.paid_amount.amount(),
            date: payment.date,
        }
    }
}

/// Body of a successful payment: `{message, payment}`
#[derive(Debug, Serialize)]
pub struct PaymentResultResponse {
    pub message: String,
    pub payment: PaymentResponse,
}
