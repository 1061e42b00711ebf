//! Billing Domain - Invoices and Payments
//!
//! This crate holds the ledger-consistency core of the ERP: the rules that
//! keep a counterparty's `total_payable` / `total_paid` / `remaining` /
//! `status` fields, the product stock levels, and the append-only invoice
//! and payment records mutually consistent.
//!
//! # Processing model
//!
//! Two application services do all the writing:
//!
//! - [`InvoiceProcessor`] validates an invoice request, snapshots product
//!   prices onto immutable lines, persists the invoice, applies the balance
//!   delta to the counterparty, and moves stock.
//! - [`PaymentProcessor`] applies a standalone payment and records it under
//!   a freshly allocated payment slip number.
//!
//! Both serialize their work through a per-entity lock registry
//! ([`EntityLockRegistry`]) so concurrent requests touching the same
//! counterparty or product cannot interleave their read-modify-write
//! sequences. Storage failures mid-sequence trigger compensating writes
//! that restore the pre-operation snapshots.
//!
//! # Slip numbers
//!
//! Payment slips are numbered from a single counter shared by customer and
//! vendor payments, starting at 101. Allocation is an atomic fetch-and-add
//! on the storage adapter ([`BillingPort::allocate_slip_id`]); the unique
//! constraint on the slip column stays in place as a backstop.

pub mod error;
pub mod invoice;
pub mod ledger;
pub mod locks;
pub mod payment;
pub mod ports;

pub use error::BillingError;
pub use invoice::{Invoice, InvoiceLine, InvoiceType};
pub use ledger::{
    CreateInvoiceRequest, InvoiceLineRequest, InvoiceProcessor, PaymentProcessor, PaymentReceipt,
};
pub use locks::{EntityLockRegistry, LockKey};
pub use payment::{Payment, PaymentSlipId};
pub use ports::BillingPort;
