//! Payment records and slip numbers

use chrono::{DateTime, Utc};
use core_kernel::{Money, PartyId, PaymentId};
use domain_party::PartyKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential human-facing slip number for a payment record
///
/// Distinct from the payment's storage identity. Slip numbers are globally
/// unique and monotonically increasing across customer and vendor payments;
/// the first ever allocated is 101. Gaps are possible when a payment fails
/// after allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentSlipId(i64);

impl PaymentSlipId {
    /// The first slip number ever handed out
    pub const FIRST: PaymentSlipId = PaymentSlipId(101);

    /// Wraps a raw slip number
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw slip number
    pub fn value(&self) -> i64 {
        self.0
    }

    /// The slip number following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PaymentSlipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An append-only record of a payment against a counterparty's balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// The paying/paid counterparty
    pub party_id: PartyId,
    /// Whether the counterparty is a customer or a vendor
    pub party_kind: PartyKind,
    /// Sequential slip number
    pub slip_id: PaymentSlipId,
    /// Amount applied to the balance
    pub paid_amount: Money,
    /// When the payment was taken
    pub date: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment record dated now
    pub fn new(
        party_kind: PartyKind,
        party_id: PartyId,
        slip_id: PaymentSlipId,
        paid_amount: Money,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            party_id,
            party_kind,
            slip_id,
            paid_amount,
            date: Utc::now(),
        }
    }
}
