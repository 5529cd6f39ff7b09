//! Card pipeline errors

use thiserror::Error;

/// Validation failure naming the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid `{field}`: {message}")]
pub struct ValidationError {
    /// The request field that failed validation
    pub field: &'static str,
    /// Human-readable description of the failure
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Card pipeline errors
#[derive(Error, Debug)]
pub enum CardError {
    /// Malformed or missing required input; recoverable by resubmitting
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entitlement denial: the user's monthly quota is exhausted
    #[error("monthly card limit reached ({limit})")]
    QuotaExceeded {
        /// The numeric quota so the caller can present an upgrade prompt
        limit: i64,
    },

    /// Provider-side throttling, distinct from the local quota gate
    #[error("provider rate limited: {0}")]
    RateLimited(String),

    /// Provider returned no usable result or failed outright
    #[error("generation failed: {0}")]
    Generation(String),

    /// Missing deployment configuration; fatal until an operator fixes it
    #[error("missing configuration: {0}")]
    Configuration(&'static str),

    /// Ledger error
    #[error("ledger error: {0}")]
    Ledger(#[from] wishcard_ledger::LedgerError),
}
