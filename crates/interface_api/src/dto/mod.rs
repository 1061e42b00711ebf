//! Request/response data transfer objects
//!
//! The wire format is camelCase JSON (`totalPayable`, `paidAmount`,
//! `paymentSlipId`, ...), matching what the SPA client already speaks.

pub mod billing;
pub mod inventory;
pub mod party;
