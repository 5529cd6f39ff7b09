//! Ledger errors

use thiserror::Error;

/// Ledger errors
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] wishcard_db::DbError),
}
