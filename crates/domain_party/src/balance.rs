//! Balance updater
//!
//! The single place where a counterparty's payable/paid/remaining/status
//! fields are recomputed. Both the invoice flow and the payment flow apply
//! their changes as a [`BalanceDelta`] through [`apply_delta`], so the two
//! code paths cannot drift apart.
//!
//! The functions here are pure: no I/O, no side effects. Callers persist the
//! resulting [`BalanceState`] themselves, exactly once per logical event.

use core_kernel::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PartyError;

/// Settlement status derived from the remaining balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerStatus {
    /// The counterparty owes nothing (`remaining <= 0`)
    #[serde(rename = "PAID")]
    Paid,
    /// There is an outstanding balance (`remaining > 0`)
    #[serde(rename = "PAYABLE")]
    Payable,
}

impl LedgerStatus {
    /// Derives the status from a remaining balance
    pub fn from_remaining(remaining: Money) -> Self {
        if remaining.is_positive() {
            LedgerStatus::Payable
        } else {
            LedgerStatus::Paid
        }
    }

    /// Returns the wire representation (`"PAID"` / `"PAYABLE"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerStatus::Paid => "PAID",
            LedgerStatus::Payable => "PAYABLE",
        }
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerStatus {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAID" => Ok(LedgerStatus::Paid),
            "PAYABLE" => Ok(LedgerStatus::Payable),
            other => Err(PartyError::UnknownStatus(other.to_string())),
        }
    }
}

/// A change to apply to a counterparty's running totals
///
/// An invoice contributes to both sides (`amount_owed` = invoice total,
/// `amount_paid` = amount paid up front); a standalone payment only to the
/// paid side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceDelta {
    /// Amount newly owed by the counterparty
    pub amount_owed: Money,
    /// Amount newly paid by the counterparty
    pub amount_paid: Money,
}

impl BalanceDelta {
    /// Delta for an invoice: the full total becomes owed, the up-front
    /// payment becomes paid
    pub fn invoice(total_amount: Money, paid_amount: Money) -> Self {
        Self {
            amount_owed: total_amount,
            amount_paid: paid_amount,
        }
    }

    /// Delta for a standalone payment against the outstanding balance
    pub fn payment(amount: Money) -> Self {
        Self {
            amount_owed: Money::zero(),
            amount_paid: amount,
        }
    }
}

/// The recomputed ledger fields after applying a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceState {
    pub total_payable: Money,
    pub total_paid: Money,
    pub remaining: Money,
    pub status: LedgerStatus,
}

/// Applies a delta to the current totals
///
/// Returns the new totals with `remaining` and `status` recomputed:
///
/// - `total_payable' = total_payable + amount_owed`
/// - `total_paid' = total_paid + amount_paid`
/// - `remaining' = total_payable' - total_paid'`
/// - `status' = PAYABLE` iff `remaining' > 0`
pub fn apply_delta(total_payable: Money, total_paid: Money, delta: &BalanceDelta) -> BalanceState {
    let total_payable = total_payable + delta.amount_owed;
    let total_paid = total_paid + delta.amount_paid;
    let remaining = total_payable - total_paid;

    BalanceState {
        total_payable,
        total_paid,
        remaining,
        status: LedgerStatus::from_remaining(remaining),
    }
}

/// Khatta carried forward after an invoice
///
/// The khatta holds the shortfall of the most recent invoice only: a
/// partially paid invoice overwrites it with the unpaid remainder, a fully
/// paid invoice resets it to zero. It does not accumulate across invoices.
pub fn khatta_after_invoice(total_amount: Money, paid_amount: Money) -> Money {
    let shortfall = total_amount - paid_amount;
    if shortfall.is_positive() {
        shortfall
    } else {
        Money::zero()
    }
}
