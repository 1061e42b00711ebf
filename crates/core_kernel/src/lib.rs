//! Core Kernel - Foundational types and utilities for the tradebook ERP
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money with precise decimal arithmetic
//! - Strongly-typed entity identifiers
//! - Port infrastructure for swappable storage adapters

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::Money;
pub use identifiers::{PartyId, ProductId, InvoiceId, PaymentId};
pub use ports::{DomainPort, PortError};
