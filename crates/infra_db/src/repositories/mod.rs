//! PostgreSQL repository implementations of the domain ports

pub mod billing;
pub mod inventory;
pub mod party;

pub use billing::PostgresBillingRepository;
pub use inventory::PostgresProductRepository;
pub use party::PostgresPartyRepository;
