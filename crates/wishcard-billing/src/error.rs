//! Billing errors

use thiserror::Error;

/// Billing errors
#[derive(Error, Debug)]
pub enum BillingError {
    /// Tier has no purchasable price (unknown label, or the free tier)
    #[error("invalid tier")]
    InvalidTier,

    /// Payment provider error
    #[error("provider error: {0}")]
    ProviderError(String),

    /// Webhook verification or processing error
    #[error("webhook error: {0}")]
    WebhookError(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}
