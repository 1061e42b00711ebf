//! Billing repository implementation
//!
//! Invoices, invoice lines, payments, and the payment slip counter. The
//! invoice insert is the one multi-row write in the system and runs in a
//! database transaction; slip allocation is a single atomic statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, InvoiceId, Money, PartyId, PaymentId, PortError, ProductId};
use domain_billing::{BillingPort, Invoice, InvoiceLine, InvoiceType, Payment, PaymentSlipId};

use crate::error::storage_error;

/// PostgreSQL-backed invoice and payment storage
#[derive(Debug, Clone)]
pub struct PostgresBillingRepository {
    pool: PgPool,
}

impl PostgresBillingRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lines_for(&self, invoice_id: Uuid) -> Result<Vec<InvoiceLine>, PortError> {
        let rows: Vec<InvoiceLineRow> = sqlx::query_as(
            "SELECT * FROM invoice_lines WHERE invoice_id = $1 ORDER BY line_no",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("get invoice lines", e))?;

        Ok(rows.into_iter().map(InvoiceLine::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct InvoiceRow {
    invoice_id: Uuid,
    invoice_type: String,
    party_id: Uuid,
    party_name: String,
    total_amount: Decimal,
    paid_amount: Decimal,
    paid: bool,
    created_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_invoice(self, lines: Vec<InvoiceLine>) -> Result<Invoice, PortError> {
        let invoice_type: InvoiceType = self
            .invoice_type
            .parse()
            .map_err(|e| PortError::internal(format!("corrupt invoice row: {e}")))?;

        Ok(Invoice {
            id: InvoiceId::from_uuid(self.invoice_id),
            invoice_type,
            party_id: PartyId::from_uuid(self.party_id),
            party_name: self.party_name,
            lines,
            total_amount: Money::new(self.total_amount),
            paid_amount: Money::new(self.paid_amount),
            paid: self.paid,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct InvoiceLineRow {
    product_id: Uuid,
    product_name: String,
    description: String,
    quantity: i64,
    unit_price: Decimal,
}

impl From<InvoiceLineRow> for InvoiceLine {
    fn from(row: InvoiceLineRow) -> InvoiceLine {
        InvoiceLine {
            product_id: ProductId::from_uuid(row.product_id),
            product_name: row.product_name,
            description: row.description,
            quantity: row.quantity,
            unit_price: Money::new(row.unit_price),
        }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: Uuid,
    party_id: Uuid,
    party_kind: String,
    payment_slip_id: i64,
    paid_amount: Decimal,
    paid_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = PortError;

    fn try_from(row: PaymentRow) -> Result<Payment, PortError> {
        let party_kind = row
            .party_kind
            .parse()
            .map_err(|e| PortError::internal(format!("corrupt payment row: {e}")))?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.payment_id),
            party_id: PartyId::from_uuid(row.party_id),
            party_kind,
            slip_id: PaymentSlipId::new(row.payment_slip_id),
            paid_amount: Money::new(row.paid_amount),
            date: row.paid_at,
        })
    }
}

#[async_trait]
impl BillingPort for PostgresBillingRepository {
    async fn insert_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin invoice transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                invoice_id, invoice_type, party_id, party_name,
                total_amount, paid_amount, paid, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(invoice.invoice_type.as_str())
        .bind(invoice.party_id.as_uuid())
        .bind(&invoice.party_name)
        .bind(invoice.total_amount.amount())
        .bind(invoice.paid_amount.amount())
        .bind(invoice.paid)
        .bind(invoice.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("insert invoice", e))?;

        for (line_no, line) in invoice.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_lines (
                    invoice_id, line_no, product_id, product_name,
                    description, quantity, unit_price
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(invoice.id.as_uuid())
            .bind(line_no as i32)
            .bind(line.product_id.as_uuid())
            .bind(&line.product_name)
            .bind(&line.description)
            .bind(line.quantity)
            .bind(line.unit_price.amount())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("insert invoice line", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("commit invoice transaction", e))?;

        Ok(())
    }

    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        let row: Option<InvoiceRow> =
            sqlx::query_as("SELECT * FROM invoices WHERE invoice_id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("get invoice", e))?;

        match row {
            Some(row) => {
                let lines = self.lines_for(row.invoice_id).await?;
                row.into_invoice(lines)
            }
            None => Err(PortError::not_found("Invoice", id)),
        }
    }

    async fn list_invoices(
        &self,
        invoice_type: Option<InvoiceType>,
    ) -> Result<Vec<Invoice>, PortError> {
        let rows: Vec<InvoiceRow> = match invoice_type {
            Some(t) => {
                sqlx::query_as(
                    "SELECT * FROM invoices WHERE invoice_type = $1 ORDER BY created_at DESC",
                )
                .bind(t.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as("SELECT * FROM invoices ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| storage_error("list invoices", e))?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let lines = self.lines_for(row.invoice_id).await?;
            invoices.push(row.into_invoice(lines)?);
        }
        Ok(invoices)
    }

    async fn allocate_slip_id(&self) -> Result<PaymentSlipId, PortError> {
        // Single-statement fetch-and-add: concurrent callers each get a
        // distinct value, with no read-then-write window.
        let (slip,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO payment_slip_counter (singleton, last_slip_id)
            VALUES (TRUE, $1)
            ON CONFLICT (singleton)
            DO UPDATE SET last_slip_id = payment_slip_counter.last_slip_id + 1
            RETURNING last_slip_id
            "#,
        )
        .bind(PaymentSlipId::FIRST.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("allocate slip id", e))?;

        Ok(PaymentSlipId::new(slip))
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id, party_id, party_kind, payment_slip_id,
                paid_amount, paid_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.party_id.as_uuid())
        .bind(payment.party_kind.as_str())
        .bind(payment.slip_id.value())
        .bind(payment.paid_amount.amount())
        .bind(payment.date)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("insert payment", e))?;

        Ok(())
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Payment, PortError> {
        let row: Option<PaymentRow> =
            sqlx::query_as("SELECT * FROM payments WHERE payment_id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("get payment", e))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(PortError::not_found("Payment", id)),
        }
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, PortError> {
        let rows: Vec<PaymentRow> =
            sqlx::query_as("SELECT * FROM payments ORDER BY payment_slip_id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| storage_error("list payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }
}

impl DomainPort for PostgresBillingRepository {
    fn adapter_name(&self) -> &'static str {
        "postgres-billing"
    }
}
