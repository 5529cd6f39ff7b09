//! Stripe webhook handling
//!
//! Only checkout completion matters to the ledger; everything else is
//! acknowledged and dropped.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, error, instrument, warn};

use wishcard_types::Tier;

use crate::error::BillingError;

/// Webhook event types we handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventType {
    /// Checkout session completed
    CheckoutSessionCompleted,
    /// Unknown event type, acknowledged and ignored
    Unknown(String),
}

impl From<&str> for WebhookEventType {
    fn from(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Parsed webhook event
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Event ID
    pub id: String,
    /// Event type
    pub event_type: WebhookEventType,
    /// Checkout data, present for completion events
    pub checkout: Option<CheckoutSessionData>,
    /// When the event was created (Unix timestamp)
    pub created: i64,
}

/// Checkout session completed data
#[derive(Debug, Clone)]
pub struct CheckoutSessionData {
    /// Session ID
    pub session_id: String,
    /// The user key carried through checkout, if present
    pub user_key: Option<String>,
    /// The purchased tier, if the metadata label parsed
    pub tier: Option<Tier>,
}

/// Webhook handler for verifying and parsing Stripe events
#[derive(Clone)]
pub struct WebhookHandler {
    webhook_secret: String,
}

impl WebhookHandler {
    /// Create a new webhook handler
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
        }
    }

    /// Verify and parse a webhook payload
    #[instrument(skip(self, payload, signature))]
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, BillingError> {
        self.verify_signature(payload, signature)?;

        let raw_event: RawStripeEvent = serde_json::from_slice(payload)
            .map_err(|e| BillingError::WebhookError(e.to_string()))?;

        debug!(event_id = %raw_event.id, event_type = %raw_event.event_type, "Parsed webhook event");

        let event_type = WebhookEventType::from(raw_event.event_type.as_str());
        let checkout = match &event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                Some(Self::parse_checkout(raw_event.data.object)?)
            }
            WebhookEventType::Unknown(_) => None,
        };

        Ok(WebhookEvent {
            id: raw_event.id,
            event_type,
            checkout,
            created: raw_event.created,
        })
    }

    /// Verify Stripe webhook signature
    fn verify_signature(&self, payload: &[u8], signature: &str) -> Result<(), BillingError> {
        // Parse signature header: t=timestamp,v1=signature
        let mut timestamp: Option<&str> = None;
        let mut sig_v1: Option<&str> = None;

        for part in signature.split(',') {
            if let Some((key, value)) = part.split_once('=') {
                match key {
                    "t" => timestamp = Some(value),
                    "v1" => sig_v1 = Some(value),
                    _ => {}
                }
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            warn!("Missing timestamp in webhook signature");
            BillingError::WebhookError("Missing timestamp".to_string())
        })?;

        let sig_v1 = sig_v1.ok_or_else(|| {
            warn!("Missing v1 signature in webhook signature");
            BillingError::WebhookError("Missing signature".to_string())
        })?;

        let signed_payload = format!(
            "{}.{}",
            timestamp,
            std::str::from_utf8(payload)
                .map_err(|_| BillingError::WebhookError("Invalid payload encoding".to_string()))?
        );

        let mut mac = Hmac::<Sha256>::new_from_slice(self.webhook_secret.as_bytes())
            .map_err(|_| BillingError::Internal("HMAC error".to_string()))?;
        mac.update(signed_payload.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        if !constant_time_eq(sig_v1.as_bytes(), expected.as_bytes()) {
            error!("Webhook signature verification failed");
            return Err(BillingError::WebhookError(
                "Signature verification failed".to_string(),
            ));
        }

        // Timestamp freshness (within 5 minutes)
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| BillingError::WebhookError("Invalid timestamp format".to_string()))?;
        let now = Utc::now().timestamp();
        if (now - ts).abs() > 300 {
            warn!(timestamp = ts, now = now, "Webhook timestamp too old");
            return Err(BillingError::WebhookError("Timestamp too old".to_string()));
        }

        Ok(())
    }

    /// Extract user key and tier from a completed checkout session
    ///
    /// The user key is preferred from `client_reference_id` with the metadata
    /// copy as a fallback. An unparseable tier label degrades to `None`
    /// rather than failing the event.
    fn parse_checkout(object: serde_json::Value) -> Result<CheckoutSessionData, BillingError> {
        let session: RawCheckoutSession = serde_json::from_value(object)
            .map_err(|e| BillingError::WebhookError(e.to_string()))?;

        let user_key = session
            .client_reference_id
            .or(session.metadata.user_key);
        let tier = session
            .metadata
            .tier
            .as_deref()
            .and_then(|t| t.parse().ok());

        Ok(CheckoutSessionData {
            session_id: session.id,
            user_key,
            tier,
        })
    }
}

/// Constant-time comparison
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}

// Raw Stripe event for parsing

#[derive(Debug, Deserialize)]
struct RawStripeEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: RawEventData,
    created: i64,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawCheckoutSession {
    id: String,
    client_reference_id: Option<String>,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    user_key: Option<String>,
    tier: Option<String>,
}
