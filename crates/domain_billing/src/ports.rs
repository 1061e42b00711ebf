//! Billing storage port

use async_trait::async_trait;
use core_kernel::{DomainPort, InvoiceId, PaymentId, PortError};

use crate::invoice::{Invoice, InvoiceType};
use crate::payment::{Payment, PaymentSlipId};

/// Storage operations for invoices, payments, and the slip counter
///
/// Invoices and payments are append-only: the port exposes no update or
/// delete for them.
#[async_trait]
pub trait BillingPort: DomainPort {
    /// Persists a new invoice with its lines
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), PortError>;

    /// Fetches an invoice by id
    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError>;

    /// Lists invoices, newest first, optionally filtered by type
    async fn list_invoices(&self, invoice_type: Option<InvoiceType>)
        -> Result<Vec<Invoice>, PortError>;

    /// Allocates the next payment slip number
    ///
    /// Must be an atomic fetch-and-add: two concurrent calls may never
    /// observe the same number. The counter is shared by customer and
    /// vendor payments and starts at [`PaymentSlipId::FIRST`].
    async fn allocate_slip_id(&self) -> Result<PaymentSlipId, PortError>;

    /// Persists a new payment record
    ///
    /// Returns [`PortError::Conflict`] if the slip number is already taken;
    /// the unique constraint is the backstop behind the allocator.
    async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError>;

    /// Fetches a payment by id
    async fn get_payment(&self, id: PaymentId) -> Result<Payment, PortError>;

    /// Lists all payment records, oldest first
    async fn list_payments(&self) -> Result<Vec<Payment>, PortError>;
}
