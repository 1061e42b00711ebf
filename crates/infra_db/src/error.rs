//! Database error types and SQLx-to-port error mapping

use core_kernel::PortError;
use thiserror::Error;

/// Errors raised while setting up the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx-level failure
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Maps an SQLx error onto the port error taxonomy
///
/// Unique-constraint violations become [`PortError::Conflict`] so callers
/// (the slip-number backstop in particular) can tell them apart from plain
/// storage failures.
pub(crate) fn storage_error(context: &str, err: sqlx::Error) -> PortError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PortError::conflict(format!("{context}: unique constraint violated"))
        }
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            PortError::connection_with_source(context.to_string(), Box::new(err))
        }
        _ => PortError::internal_with_source(context.to_string(), Box::new(err)),
    }
}
