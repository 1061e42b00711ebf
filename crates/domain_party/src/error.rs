//! Party domain errors

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyError {
    /// Unknown party kind tag in stored data
    #[error("Unknown party kind: {0}")]
    UnknownKind(String),

    /// Unknown ledger status tag in stored data
    #[error("Unknown ledger status: {0}")]
    UnknownStatus(String),
}
