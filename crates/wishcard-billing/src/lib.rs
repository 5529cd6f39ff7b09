//! WishCard Billing - Stripe checkout and webhooks
//!
//! Subscription upgrades flow through Stripe Checkout: the API redirects the
//! buyer to a hosted session carrying the user key and target tier, and the
//! completion webhook reports both back so the ledger can be re-tiered.
//!
//! # Example
//!
//! ```rust,ignore
//! use wishcard_billing::{PaymentsConfig, StripeProvider};
//! use wishcard_types::Tier;
//!
//! let provider = StripeProvider::new(PaymentsConfig::new("sk_test_...", "whsec_..."));
//! let session = provider.create_checkout_session("user@example.com", Tier::Plus).await?;
//! // redirect the buyer to session.url
//! ```

pub mod config;
pub mod error;
pub mod stripe;
pub mod webhook;

pub use config::PaymentsConfig;
pub use error::BillingError;
pub use stripe::{CheckoutSession, StripeProvider};
pub use webhook::{CheckoutSessionData, WebhookEvent, WebhookEventType, WebhookHandler};
