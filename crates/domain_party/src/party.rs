//! The counterparty aggregate
//!
//! Customers and vendors share one representation; [`PartyKind`]
//! distinguishes which side of the trade they sit on.

use core_kernel::{Money, PartyId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::balance::{apply_delta, khatta_after_invoice, BalanceDelta, LedgerStatus};
use crate::error::PartyError;

/// Which side of the trade a party sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// Buys from us (sales invoices)
    Customer,
    /// Sells to us (purchase invoices)
    Vendor,
}

impl PartyKind {
    /// Capitalized label for user-facing messages ("Customer not found")
    pub fn label(&self) -> &'static str {
        match self {
            PartyKind::Customer => "Customer",
            PartyKind::Vendor => "Vendor",
        }
    }

    /// Lowercase tag used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyKind::Customer => "customer",
            PartyKind::Vendor => "vendor",
        }
    }
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyKind {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(PartyKind::Customer),
            "vendor" => Ok(PartyKind::Vendor),
            other => Err(PartyError::UnknownKind(other.to_string())),
        }
    }
}

/// A customer or vendor with its running ledger balances
///
/// Descriptive fields (`name`, `mobile_no`, `company`, `cash_type`) are set
/// at creation and only edited explicitly. The ledger fields are mutated
/// exclusively through [`record_invoice`](Party::record_invoice) and
/// [`record_payment`](Party::record_payment), which keep `remaining` and
/// `status` consistent with the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Unique identifier
    pub id: PartyId,
    /// Customer or vendor
    pub kind: PartyKind,
    /// Display name (also snapshotted onto invoices)
    pub name: String,
    /// Contact number
    pub mobile_no: String,
    /// Company name
    pub company: String,
    /// Cash handling type (free-form, e.g. "cash", "credit")
    pub cash_type: String,
    /// Signed starting/account balance; decremented by invoice payments
    pub account_balance: Money,
    /// Outstanding carry of the most recent invoice (overwritten, not
    /// accumulated)
    pub khatta: Money,
    /// Cumulative amount owed across all invoices
    pub total_payable: Money,
    /// Cumulative amount paid
    pub total_paid: Money,
    /// `total_payable - total_paid`
    pub remaining: Money,
    /// Derived settlement status
    pub status: LedgerStatus,
}

impl Party {
    /// Creates a new party with zeroed ledger balances
    pub fn new(
        kind: PartyKind,
        name: impl Into<String>,
        mobile_no: impl Into<String>,
        company: impl Into<String>,
        cash_type: impl Into<String>,
    ) -> Self {
        Self {
            id: PartyId::new(),
            kind,
            name: name.into(),
            mobile_no: mobile_no.into(),
            company: company.into(),
            cash_type: cash_type.into(),
            account_balance: Money::zero(),
            khatta: Money::zero(),
            total_payable: Money::zero(),
            total_paid: Money::zero(),
            remaining: Money::zero(),
            status: LedgerStatus::Paid,
        }
    }

    /// Sets the starting account balance
    pub fn with_account_balance(mut self, balance: Money) -> Self {
        self.account_balance = balance;
        self
    }

    /// Applies a balance delta, recomputing `remaining` and `status`
    pub fn apply_delta(&mut self, delta: &BalanceDelta) {
        let state = apply_delta(self.total_payable, self.total_paid, delta);
        self.total_payable = state.total_payable;
        self.total_paid = state.total_paid;
        self.remaining = state.remaining;
        self.status = state.status;
    }

    /// Records an invoice against this party
    ///
    /// Adds the invoice total to the payable side and the up-front payment
    /// to the paid side, overwrites the khatta with this invoice's
    /// shortfall, and decrements the account balance by the amount paid.
    pub fn record_invoice(&mut self, total_amount: Money, paid_amount: Money) {
        self.apply_delta(&BalanceDelta::invoice(total_amount, paid_amount));
        self.khatta = khatta_after_invoice(total_amount, paid_amount);
        self.account_balance -= paid_amount;
    }

    /// Records a standalone payment against the outstanding balance
    pub fn record_payment(&mut self, amount: Money) {
        self.apply_delta(&BalanceDelta::payment(amount));
    }
}
