//! Customer/vendor DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_party::{Party, PartyKind};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub account_balance: Option<Decimal>,
    #[validate(length(min = 1, message = "mobileNo is required"))]
    pub mobile_no: String,
    #[validate(length(min = 1, message = "company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "cashType is required"))]
    pub cash_type: String,
}

impl CreatePartyRequest {
    /// Builds the domain party of the given kind
    pub fn into_party(self, kind: PartyKind) -> Party {
        let party = Party::new(kind, self.name, self.mobile_no, self.company, self.cash_type);
        match self.account_balance {
            Some(balance) => party.with_account_balance(Money::new(balance)),
            None => party,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RenamePartyRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

/// Body of `POST /:id/pay`
///
/// `amount` accepts both JSON numbers and numeric strings; anything that
/// does not coerce to a positive number is rejected.
#[derive(Debug, Deserialize)]
pub struct PayRequest {
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResponse {
    pub id: Uuid,
    pub name: String,
    pub mobile_no: String,
    pub company: String,
    pub cash_type: String,
    pub account_balance: Decimal,
    pub khatta: Decimal,
    pub total_payable: Decimal,
    pub total_paid: Decimal,
    pub remaining: Decimal,
    pub status: String,
}

impl From<Party> for PartyResponse {
    fn from(party: Party) -> Self {
        Self {
            id: *party.id.as_uuid(),
            name: party.name,
            mobile_no: party.mobile_no,
            company: party.company,
            cash_type: party.cash_type,
            account_balance: party.account_balance.amount(),
            khatta: party.khatta.amount(),
            total_payable: party.total_payable.amount(),
            total_paid: party.total_paid.amount(),
            remaining: party.remaining.amount(),
            status: party.status.as_str().to_string(),
        }
    }
}

/// Body of the delete confirmation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
