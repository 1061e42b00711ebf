//! Storage adapters for the tradebook ERP
//!
//! Two families of adapters implement the domain ports:
//!
//! - [`repositories`]: PostgreSQL via SQLx, the production backing store.
//!   Schema lives under `migrations/`.
//! - [`memory`]: in-memory stores for tests and local development. Same
//!   semantics, including the unique-slip backstop and the atomic slip
//!   counter.
//!
//! Per-entity write serialization is handled above this layer by the
//! billing processors; adapters only need each individual operation to be
//! atomic. The one cross-row operation, inserting an invoice with its
//! lines, runs in a database transaction.

pub mod error;
pub mod memory;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use memory::{InMemoryBillingStore, InMemoryPartyStore, InMemoryProductStore};
pub use pool::{create_pool, run_migrations};
pub use repositories::{
    PostgresBillingRepository, PostgresPartyRepository, PostgresProductRepository,
};
