//! Configuration for the Card API service.

use std::time::Duration;

use wishcard_billing::PaymentsConfig;

/// Card API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// fal.ai API key; generation fails with a configuration error when absent
    pub fal_key: Option<String>,
    /// Stripe configuration; checkout and webhooks are disabled when absent
    pub payments: Option<PaymentsConfig>,
    /// Directory generated artifacts are written to and served from
    pub media_dir: String,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Provider credential; optional so the rest of the API still serves
        let fal_key = std::env::var("FAL_KEY").ok().filter(|k| !k.is_empty());

        // Stripe configuration; both halves required to enable payments
        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY").ok();
        let stripe_webhook_secret = std::env::var("STRIPE_WEBHOOK_SECRET").ok();
        let payments = match (stripe_secret_key, stripe_webhook_secret) {
            (Some(secret), Some(webhook)) => {
                let success_url = std::env::var("CHECKOUT_SUCCESS_URL")
                    .unwrap_or_else(|_| "https://wishcard.app/?upgraded=true".to_string());
                let cancel_url = std::env::var("CHECKOUT_CANCEL_URL")
                    .unwrap_or_else(|_| "https://wishcard.app/pricing".to_string());
                Some(PaymentsConfig::new(secret, webhook).with_urls(success_url, cancel_url))
            }
            _ => None,
        };

        let media_dir =
            std::env::var("MEDIA_DIR").unwrap_or_else(|_| "public/generated".to_string());

        // Request timeout; sized above the 60s provider budget
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "75".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        // Metrics
        let metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Self {
            http_port,
            database_url,
            fal_key,
            payments,
            media_dir,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
