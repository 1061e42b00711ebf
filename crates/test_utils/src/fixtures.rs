//! Pre-built test fixtures
//!
//! Ready-to-use entities with predictable ledger values, plus randomized
//! contact details so tests never depend on them by accident.

use core_kernel::Money;
use domain_inventory::Product;
use domain_party::{Party, PartyKind};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rust_decimal_macros::dec;

/// Fixtures for Money values used across the ledger scenarios
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A whole-unit amount
    pub fn units(units: i64) -> Money {
        Money::from_units(units)
    }

    /// The canonical invoice total in the happy-path scenario
    pub fn hundred() -> Money {
        Money::new(dec!(100))
    }

    /// The canonical partial payment
    pub fn forty() -> Money {
        Money::new(dec!(40))
    }

    /// The canonical settling payment
    pub fn sixty() -> Money {
        Money::new(dec!(60))
    }
}

/// Fixtures for counterparties
pub struct PartyFixtures;

impl PartyFixtures {
    /// A fresh customer with zeroed balances and random contact details
    pub fn customer() -> Party {
        Party::new(
            PartyKind::Customer,
            Name().fake::<String>(),
            PhoneNumber().fake::<String>(),
            CompanyName().fake::<String>(),
            "cash",
        )
    }

    /// A fresh vendor with zeroed balances and random contact details
    pub fn vendor() -> Party {
        Party::new(
            PartyKind::Vendor,
            Name().fake::<String>(),
            PhoneNumber().fake::<String>(),
            CompanyName().fake::<String>(),
            "credit",
        )
    }
}

/// Fixtures for products
pub struct ProductFixtures;

impl ProductFixtures {
    /// The canonical scenario product: price 50, ten in stock
    pub fn widget() -> Product {
        Product::new("WID-001", "Widget", "A standard widget", Money::new(dec!(50)), 10)
    }

    /// A second product for multi-line invoices: price 20, five in stock
    pub fn gadget() -> Product {
        Product::new("GAD-002", "Gadget", "A standard gadget", Money::new(dec!(20)), 5)
    }
}
