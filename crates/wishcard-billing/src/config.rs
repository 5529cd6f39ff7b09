//! Payments configuration

/// Stripe configuration for checkout and webhook verification
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    /// Stripe secret key
    pub stripe_secret_key: String,
    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,
    /// Where the buyer lands after a completed checkout
    pub success_url: String,
    /// Where the buyer lands after abandoning checkout
    pub cancel_url: String,
}

impl PaymentsConfig {
    /// Create a new payments config with default return URLs
    pub fn new(
        stripe_secret_key: impl Into<String>,
        stripe_webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            stripe_secret_key: stripe_secret_key.into(),
            stripe_webhook_secret: stripe_webhook_secret.into(),
            success_url: "https://wishcard.app/?upgraded=true".to_string(),
            cancel_url: "https://wishcard.app/pricing".to_string(),
        }
    }

    /// Override the checkout return URLs
    pub fn with_urls(mut self, success_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        self.success_url = success_url.into();
        self.cancel_url = cancel_url.into();
        self
    }
}
