//! In-memory invoice and payment store

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use core_kernel::{DomainPort, InvoiceId, PaymentId, PortError};
use domain_billing::{BillingPort, Invoice, InvoiceType, Payment, PaymentSlipId};

/// In-memory invoice/payment storage for tests and local development
///
/// The slip counter is an [`AtomicI64`] fetch-and-add, matching the atomic
/// single-statement allocation of the PostgreSQL adapter. The uniqueness
/// check in [`insert_payment`](BillingPort::insert_payment) mirrors the
/// database's unique constraint backstop.
#[derive(Debug)]
pub struct InMemoryBillingStore {
    invoices: RwLock<Vec<Invoice>>,
    payments: RwLock<Vec<Payment>>,
    last_slip_id: AtomicI64,
}

impl InMemoryBillingStore {
    pub fn new() -> Self {
        Self {
            invoices: RwLock::new(Vec::new()),
            payments: RwLock::new(Vec::new()),
            last_slip_id: AtomicI64::new(PaymentSlipId::FIRST.value() - 1),
        }
    }
}

impl Default for InMemoryBillingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillingPort for InMemoryBillingStore {
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
        let mut invoices = self.invoices.write().await;
        if invoices.iter().any(|i| i.id == invoice.id) {
            return Err(PortError::conflict(format!(
                "invoice {} already exists",
                invoice.id
            )));
        }
        invoices.push(invoice.clone());
        Ok(())
    }

    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        self.invoices
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Invoice", id))
    }

    async fn list_invoices(
        &self,
        invoice_type: Option<InvoiceType>,
    ) -> Result<Vec<Invoice>, PortError> {
        Ok(self
            .invoices
            .read()
            .await
            .iter()
            .filter(|i| invoice_type.is_none_or(|t| i.invoice_type == t))
            .cloned()
            .rev()
            .collect())
    }

    async fn allocate_slip_id(&self) -> Result<PaymentSlipId, PortError> {
        let slip = self.last_slip_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PaymentSlipId::new(slip))
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError> {
        let mut payments = self.payments.write().await;
        if payments.iter().any(|p| p.slip_id == payment.slip_id) {
            return Err(PortError::conflict(format!(
                "payment slip {} already exists",
                payment.slip_id
            )));
        }
        payments.push(payment.clone());
        Ok(())
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Payment, PortError> {
        self.payments
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Payment", id))
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, PortError> {
        let mut payments: Vec<Payment> = self.payments.read().await.clone();
        payments.sort_by_key(|p| p.slip_id);
        Ok(payments)
    }
}

impl DomainPort for InMemoryBillingStore {
    fn adapter_name(&self) -> &'static str {
        "memory-billing"
    }
}
