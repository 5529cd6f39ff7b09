//! Stripe payment provider implementation
//!
//! Checkout sessions are built with inline GBP price data derived from the
//! tier table, so no price objects need to exist in the Stripe dashboard.
//! The user key rides along as `client_reference_id` and in the session
//! metadata together with the target tier; the completion webhook hands both
//! back for the ledger update.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use wishcard_types::Tier;

use crate::config::PaymentsConfig;
use crate::error::BillingError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// A created checkout session the API redirects the buyer to
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    /// Session ID
    pub session_id: String,
    /// Hosted checkout URL
    pub url: String,
}

/// Stripe payment provider
#[derive(Clone)]
pub struct StripeProvider {
    client: Client,
    config: PaymentsConfig,
}

impl StripeProvider {
    /// Create a new Stripe provider
    pub fn new(config: PaymentsConfig) -> Self {
        let client = Client::new();
        Self { client, config }
    }

    /// Webhook signing secret for this deployment
    pub fn webhook_secret(&self) -> &str {
        &self.config.stripe_webhook_secret
    }

    /// Make authenticated request to Stripe
    async fn stripe_request<T: for<'de> Deserialize<'de>>(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<T, BillingError> {
        let url = format!("{STRIPE_API_BASE}{endpoint}");

        let mut request = self
            .client
            .request(method, &url)
            .basic_auth(&self.config.stripe_secret_key, Option::<&str>::None);

        if let Some(form_data) = form {
            request = request.form(form_data);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Stripe API request failed");
            BillingError::ProviderError(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Stripe API error");
            return Err(BillingError::ProviderError(format!(
                "Stripe API error: {status}"
            )));
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = %e, "Failed to parse Stripe response");
            BillingError::Internal(e.to_string())
        })
    }

    /// Create a checkout session upgrading the user to the given tier
    #[instrument(skip(self))]
    pub async fn create_checkout_session(
        &self,
        user_key: &str,
        tier: Tier,
    ) -> Result<CheckoutSession, BillingError> {
        debug!(user = %user_key, tier = %tier, "Creating checkout session");

        let price_pence = tier.price_pence();
        if price_pence == 0 {
            return Err(BillingError::InvalidTier);
        }

        let amount = price_pence.to_string();
        let product_name = format!("WishCard {}", tier.name());
        let tier_label = tier.to_string();

        let form = [
            ("mode", "subscription"),
            ("client_reference_id", user_key),
            ("success_url", self.config.success_url.as_str()),
            ("cancel_url", self.config.cancel_url.as_str()),
            ("line_items[0][quantity]", "1"),
            ("line_items[0][price_data][currency]", "gbp"),
            ("line_items[0][price_data][unit_amount]", amount.as_str()),
            ("line_items[0][price_data][recurring][interval]", "month"),
            (
                "line_items[0][price_data][product_data][name]",
                product_name.as_str(),
            ),
            ("metadata[user_key]", user_key),
            ("metadata[tier]", tier_label.as_str()),
        ];

        let session: StripeCheckoutSession = self
            .stripe_request(reqwest::Method::POST, "/checkout/sessions", Some(&form))
            .await?;

        Ok(CheckoutSession {
            session_id: session.id,
            url: session.url.unwrap_or_default(),
        })
    }
}

/// Stripe checkout session response
#[derive(Debug, Clone, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    url: Option<String>,
}
