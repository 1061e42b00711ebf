//! Test Utilities Crate
//!
//! Shared fixtures and builders for the tradebook test suite.
//!
//! - `fixtures`: pre-built entities with predictable ledger values
//! - `builders`: builder patterns for tests that only care about a few fields

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
