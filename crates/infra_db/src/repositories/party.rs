//! Party repository implementation

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, Money, PartyId, PortError};
use domain_party::{Party, PartyKind, PartyPort};

use crate::error::storage_error;

/// PostgreSQL-backed party storage
#[derive(Debug, Clone)]
pub struct PostgresPartyRepository {
    pool: PgPool,
}

impl PostgresPartyRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PartyRow {
    party_id: Uuid,
    kind: String,
    name: String,
    mobile_no: String,
    company: String,
    cash_type: String,
    account_balance: Decimal,
    khatta: Decimal,
    total_payable: Decimal,
    total_paid: Decimal,
    remaining: Decimal,
    status: String,
}

impl TryFrom<PartyRow> for Party {
    type Error = PortError;

    fn try_from(row: PartyRow) -> Result<Party, PortError> {
        let kind: PartyKind = row
            .kind
            .parse()
            .map_err(|e| PortError::internal(format!("corrupt party row: {e}")))?;
        let status = row
            .status
            .parse()
            .map_err(|e| PortError::internal(format!("corrupt party row: {e}")))?;

        Ok(Party {
            id: PartyId::from_uuid(row.party_id),
            kind,
            name: row.name,
            mobile_no: row.mobile_no,
            company: row.company,
            cash_type: row.cash_type,
            account_balance: Money::new(row.account_balance),
            khatta: Money::new(row.khatta),
            total_payable: Money::new(row.total_payable),
            total_paid: Money::new(row.total_paid),
            remaining: Money::new(row.remaining),
            status,
        })
    }
}

#[async_trait]
impl PartyPort for PostgresPartyRepository {
    async fn insert(&self, party: &Party) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO parties (
                party_id, kind, name, mobile_no, company, cash_type,
                account_balance, khatta, total_payable, total_paid,
                remaining, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(party.id.as_uuid())
        .bind(party.kind.as_str())
        .bind(&party.name)
        .bind(&party.mobile_no)
        .bind(&party.company)
        .bind(&party.cash_type)
        .bind(party.account_balance.amount())
        .bind(party.khatta.amount())
        .bind(party.total_payable.amount())
        .bind(party.total_paid.amount())
        .bind(party.remaining.amount())
        .bind(party.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("insert party", e))?;

        Ok(())
    }

    async fn get(&self, id: PartyId) -> Result<Party, PortError> {
        let row: Option<PartyRow> =
            sqlx::query_as("SELECT * FROM parties WHERE party_id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("get party", e))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(PortError::not_found("Party", id)),
        }
    }

    async fn list(&self, kind: PartyKind) -> Result<Vec<Party>, PortError> {
        let rows: Vec<PartyRow> =
            sqlx::query_as("SELECT * FROM parties WHERE kind = $1 ORDER BY name")
                .bind(kind.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| storage_error("list parties", e))?;

        rows.into_iter().map(Party::try_from).collect()
    }

    async fn update(&self, party: &Party) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE parties SET
                name = $2, mobile_no = $3, company = $4, cash_type = $5,
                account_balance = $6, khatta = $7, total_payable = $8,
                total_paid = $9, remaining = $10, status = $11
            WHERE party_id = $1
            "#,
        )
        .bind(party.id.as_uuid())
        .bind(&party.name)
        .bind(&party.mobile_no)
        .bind(&party.company)
        .bind(&party.cash_type)
        .bind(party.account_balance.amount())
        .bind(party.khatta.amount())
        .bind(party.total_payable.amount())
        .bind(party.total_paid.amount())
        .bind(party.remaining.amount())
        .bind(party.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update party", e))?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Party", party.id));
        }
        Ok(())
    }

    async fn delete(&self, id: PartyId) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM parties WHERE party_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete party", e))?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Party", id));
        }
        Ok(())
    }
}

impl DomainPort for PostgresPartyRepository {
    fn adapter_name(&self) -> &'static str {
        "postgres-parties"
    }
}
