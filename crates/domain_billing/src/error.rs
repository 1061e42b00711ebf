//! Billing domain errors

use core_kernel::{InvoiceId, PartyId, PaymentId, PortError, ProductId};
use domain_party::PartyKind;
use thiserror::Error;

/// Errors that can occur in the billing domain
///
/// Display strings for the not-found variants are the user-facing messages
/// surfaced by the HTTP layer; ids stay on the variants for logging.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The referenced counterparty does not exist (or is the wrong kind)
    #[error("{} not found", .kind.label())]
    PartyNotFound { kind: PartyKind, id: PartyId },

    /// A referenced product does not exist
    #[error("Product with ID {0} not found")]
    ProductNotFound(ProductId),

    /// The requested invoice does not exist
    #[error("Invoice not found")]
    InvoiceNotFound(InvoiceId),

    /// The requested payment does not exist
    #[error("Payment not found")]
    PaymentNotFound(PaymentId),

    /// The request is malformed or missing required fields
    #[error("{0}")]
    Validation(String),

    /// Unknown invoice type tag
    #[error("Unknown invoice type: {0}")]
    UnknownInvoiceType(String),

    /// The storage layer failed
    #[error(transparent)]
    Storage(#[from] PortError),
}

impl BillingError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }

    /// Returns true if this error means a referenced entity was absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BillingError::PartyNotFound { .. }
                | BillingError::ProductNotFound(_)
                | BillingError::InvoiceNotFound(_)
                | BillingError::PaymentNotFound(_)
        )
    }
}
