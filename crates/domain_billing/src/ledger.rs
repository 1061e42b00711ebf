//! Invoice and payment processors
//!
//! The two application services that own every write to the ledger. Both
//! follow the same discipline:
//!
//! 1. take the per-entity locks for everything the operation writes,
//! 2. read and validate all referenced entities (no mutation happens until
//!    every reference has resolved),
//! 3. compute the updated states in memory,
//! 4. persist, compensating already-written updates if a later write fails.
//!
//! The compensation step restores the pre-operation snapshots held from
//! step 2, so a storage failure cannot leave stock moved without the
//! matching invoice, or a balance moved without the matching payment.

use std::collections::HashMap;
use std::sync::Arc;

use core_kernel::{Money, PartyId, ProductId};
use domain_inventory::{Product, ProductPort};
use domain_party::{Party, PartyKind, PartyPort};
use tracing::{error, info, warn};

use crate::error::BillingError;
use crate::invoice::{Invoice, InvoiceLine, InvoiceType};
use crate::locks::{EntityLockRegistry, LockKey};
use crate::payment::Payment;
use crate::ports::BillingPort;

/// How many times a payment insert is retried when the slip number loses
/// the race against a writer outside this process.
const SLIP_RETRY_LIMIT: u32 = 3;

/// One requested invoice line; the product is resolved by the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLineRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// A validated-on-entry invoice creation request
///
/// Exactly one of `customer_id` / `vendor_id` must be set, and it must
/// match the invoice type (sales trade with customers, purchases with
/// vendors).
#[derive(Debug, Clone)]
pub struct CreateInvoiceRequest {
    pub invoice_type: InvoiceType,
    pub customer_id: Option<PartyId>,
    pub vendor_id: Option<PartyId>,
    pub products: Vec<InvoiceLineRequest>,
    pub total_amount: Money,
    pub paid_amount: Money,
}

impl CreateInvoiceRequest {
    /// Resolves the single counterparty reference or explains what is wrong
    pub fn counterparty_id(&self) -> Result<PartyId, BillingError> {
        match (self.customer_id, self.vendor_id, self.invoice_type) {
            (Some(_), Some(_), _) => Err(BillingError::validation(
                "an invoice references either a customer or a vendor, not both",
            )),
            (None, None, _) => Err(BillingError::validation(
                "an invoice must reference a customer or a vendor",
            )),
            (Some(id), None, InvoiceType::Sales) => Ok(id),
            (None, Some(id), InvoiceType::Purchase) => Ok(id),
            (Some(_), None, InvoiceType::Purchase) => Err(BillingError::validation(
                "a purchase invoice must reference a vendor, not a customer",
            )),
            (None, Some(_), InvoiceType::Sales) => Err(BillingError::validation(
                "a sales invoice must reference a customer, not a vendor",
            )),
        }
    }
}

/// Creates invoices: snapshots prices, moves stock, updates the
/// counterparty balance
pub struct InvoiceProcessor {
    parties: Arc<dyn PartyPort>,
    products: Arc<dyn ProductPort>,
    billing: Arc<dyn BillingPort>,
    locks: Arc<EntityLockRegistry>,
}

impl InvoiceProcessor {
    pub fn new(
        parties: Arc<dyn PartyPort>,
        products: Arc<dyn ProductPort>,
        billing: Arc<dyn BillingPort>,
        locks: Arc<EntityLockRegistry>,
    ) -> Self {
        Self {
            parties,
            products,
            billing,
            locks,
        }
    }

    /// Runs the whole invoice transaction and returns the persisted invoice
    pub async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<Invoice, BillingError> {
        let party_id = request.counterparty_id()?;
        let kind = request.invoice_type.party_kind();

        if request.products.is_empty() {
            return Err(BillingError::validation(
                "an invoice requires at least one product line",
            ));
        }

        // Serialize against every other operation touching this party or
        // any of these products.
        let mut keys = vec![LockKey::Party(party_id)];
        keys.extend(
            request
                .products
                .iter()
                .map(|line| LockKey::Product(line.product_id)),
        );
        let _guards = self.locks.acquire_many(keys).await;

        // Resolve everything before mutating anything.
        let party = self.resolve_party(kind, party_id).await?;

        let mut stock = HashMap::new();
        let mut lines = Vec::with_capacity(request.products.len());
        for line in &request.products {
            if !stock.contains_key(&line.product_id) {
                let product = match self.products.get(line.product_id).await {
                    Ok(product) => product,
                    Err(e) if e.is_not_found() => {
                        return Err(BillingError::ProductNotFound(line.product_id));
                    }
                    Err(e) => return Err(e.into()),
                };
                stock.insert(line.product_id, product);
            }
            let product = &stock[&line.product_id];
            lines.push(InvoiceLine::snapshot(product, line.quantity));
        }

        let invoice = Invoice::new(
            request.invoice_type,
            party.id,
            party.name.clone(),
            lines,
            request.total_amount,
            request.paid_amount,
        );

        // Compute the updated states in memory.
        let mut updated_party = party.clone();
        updated_party.record_invoice(request.total_amount, request.paid_amount);

        let original_products: Vec<Product> = stock.values().cloned().collect();
        for line in &request.products {
            if let Some(product) = stock.get_mut(&line.product_id) {
                match request.invoice_type {
                    InvoiceType::Sales => product.issue(line.quantity),
                    InvoiceType::Purchase => product.receive(line.quantity),
                }
            }
        }

        // Persist: products, then the party, then the invoice itself. A
        // failure at any point rolls the earlier writes back to their
        // snapshots.
        let mut written: Vec<&Product> = Vec::new();
        for product in stock.values() {
            if let Err(e) = self.products.update(product).await {
                self.restore_products(&original_products, &written).await;
                return Err(e.into());
            }
            written.push(product);
        }

        if let Err(e) = self.parties.update(&updated_party).await {
            self.restore_products(&original_products, &written).await;
            return Err(e.into());
        }

        if let Err(e) = self.billing.insert_invoice(&invoice).await {
            if let Err(c) = self.parties.update(&party).await {
                error!(party_id = %party.id, error = %c, "compensation failed; party balance left inconsistent");
            }
            self.restore_products(&original_products, &written).await;
            return Err(e.into());
        }

        info!(
            invoice_id = %invoice.id,
            invoice_type = %invoice.invoice_type,
            party_id = %party.id,
            total_amount = %invoice.total_amount,
            paid_amount = %invoice.paid_amount,
            lines = invoice.lines.len(),
            "invoice recorded"
        );

        Ok(invoice)
    }

    async fn resolve_party(&self, kind: PartyKind, id: PartyId) -> Result<Party, BillingError> {
        let party = match self.parties.get(id).await {
            Ok(party) => party,
            Err(e) if e.is_not_found() => return Err(BillingError::PartyNotFound { kind, id }),
            Err(e) => return Err(e.into()),
        };
        // A customer id on a purchase invoice resolves to the wrong kind;
        // report it the same way as an absent party.
        if party.kind != kind {
            return Err(BillingError::PartyNotFound { kind, id });
        }
        Ok(party)
    }

    async fn restore_products(&self, originals: &[Product], written: &[&Product]) {
        for original in originals {
            if written.iter().any(|w| w.id == original.id) {
                if let Err(e) = self.products.update(original).await {
                    error!(product_id = %original.id, error = %e, "compensation failed; stock level left inconsistent");
                }
            }
        }
    }
}

/// The updated counterparty and the payment record produced by a payment
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub party: Party,
    pub payment: Payment,
}

/// Applies standalone payments to a counterparty's outstanding balance
pub struct PaymentProcessor {
    parties: Arc<dyn PartyPort>,
    billing: Arc<dyn BillingPort>,
    locks: Arc<EntityLockRegistry>,
}

impl PaymentProcessor {
    pub fn new(
        parties: Arc<dyn PartyPort>,
        billing: Arc<dyn BillingPort>,
        locks: Arc<EntityLockRegistry>,
    ) -> Self {
        Self {
            parties,
            billing,
            locks,
        }
    }

    /// Applies `amount` to the party's balance and records the payment
    /// under a fresh slip number
    pub async fn pay(
        &self,
        kind: PartyKind,
        party_id: PartyId,
        amount: Money,
    ) -> Result<PaymentReceipt, BillingError> {
        if !amount.is_positive() {
            return Err(BillingError::validation(
                "payment amount must be a positive number",
            ));
        }

        let _guard = self.locks.acquire(LockKey::Party(party_id)).await;

        let party = self.resolve_party(kind, party_id).await?;

        let mut updated_party = party.clone();
        updated_party.record_payment(amount);
        self.parties.update(&updated_party).await?;

        let mut attempts = 0;
        let payment = loop {
            let slip_id = self.billing.allocate_slip_id().await?;
            let payment = Payment::new(kind, party_id, slip_id, amount);

            match self.billing.insert_payment(&payment).await {
                Ok(()) => break payment,
                Err(e) if e.is_conflict() && attempts < SLIP_RETRY_LIMIT => {
                    attempts += 1;
                    warn!(slip_id = %slip_id, attempt = attempts, "slip number collision, reallocating");
                }
                Err(e) => {
                    if let Err(c) = self.parties.update(&party).await {
                        error!(party_id = %party.id, error = %c, "compensation failed; party balance left inconsistent");
                    }
                    return Err(e.into());
                }
            }
        };

        info!(
            payment_id = %payment.id,
            slip_id = %payment.slip_id,
            party_id = %party_id,
            amount = %amount,
            remaining = %updated_party.remaining,
            status = %updated_party.status,
            "payment recorded"
        );

        Ok(PaymentReceipt {
            party: updated_party,
            payment,
        })
    }

    async fn resolve_party(&self, kind: PartyKind, id: PartyId) -> Result<Party, BillingError> {
        let party = match self.parties.get(id).await {
            Ok(party) => party,
            Err(e) if e.is_not_found() => return Err(BillingError::PartyNotFound { kind, id }),
            Err(e) => return Err(e.into()),
        };
        if party.kind != kind {
            return Err(BillingError::PartyNotFound { kind, id });
        }
        Ok(party)
    }
}
