//! Stripe webhook handler

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use wishcard_billing::WebhookEventType;
use wishcard_types::UserKey;

use crate::state::AppState;

/// POST /webhooks/stripe
///
/// Verifies the signature and applies tier changes from completed checkouts.
/// Unknown event types are acknowledged so Stripe stops retrying them.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let Some(webhooks) = state.webhooks.as_ref() else {
        tracing::warn!("Webhook received but payments are not configured");
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    let Some(sig_header) = headers.get("stripe-signature") else {
        tracing::warn!("Missing Stripe-Signature header");
        return StatusCode::BAD_REQUEST;
    };

    let Ok(signature) = sig_header.to_str() else {
        tracing::warn!("Invalid Stripe-Signature header encoding");
        return StatusCode::BAD_REQUEST;
    };

    let event = match webhooks.verify_and_parse(&body, signature) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = %e, "Webhook verification failed");
            metrics::counter!("webhooks_processed_total", "status" => "rejected").increment(1);
            return StatusCode::BAD_REQUEST;
        }
    };

    if !matches!(event.event_type, WebhookEventType::CheckoutSessionCompleted) {
        metrics::counter!("webhooks_processed_total", "status" => "ignored").increment(1);
        return StatusCode::OK;
    }

    let Some(checkout) = event.checkout else {
        return StatusCode::OK;
    };

    let (Some(raw_key), Some(tier)) = (checkout.user_key, checkout.tier) else {
        tracing::warn!(session = %checkout.session_id, "Checkout completed without user key or tier");
        metrics::counter!("webhooks_processed_total", "status" => "incomplete").increment(1);
        return StatusCode::OK;
    };

    let Ok(user) = UserKey::parse(&raw_key) else {
        tracing::warn!(session = %checkout.session_id, "Checkout completed with malformed user key");
        return StatusCode::OK;
    };

    match state.ledger.set_tier(&user, tier).await {
        Ok(record) => {
            tracing::info!(user = %user, tier = %tier, limit = record.cards_limit, "Tier upgraded");
            metrics::counter!("webhooks_processed_total", "status" => "success").increment(1);
            StatusCode::OK
        }
        Err(e) => {
            // Non-2xx so Stripe redelivers and the upgrade is not lost
            tracing::error!(user = %user, error = %e, "Tier update failed");
            metrics::counter!("webhooks_processed_total", "status" => "error").increment(1);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
