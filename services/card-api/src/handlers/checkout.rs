//! Stripe checkout handler

use axum::extract::{Query, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::instrument;

use wishcard_types::Tier;

use crate::error::{ApiError, ApiResult};
use crate::extractors::CallerKey;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutQuery {
    pub tier: String,
}

/// GET /api/v1/payments/checkout?tier=
///
/// Validates the tier before any Stripe call, then redirects the buyer to the
/// hosted checkout session.
#[instrument(skip(state), fields(user = %caller.0, tier = %query.tier))]
pub async fn create_checkout(
    State(state): State<AppState>,
    caller: CallerKey,
    Query(query): Query<CheckoutQuery>,
) -> ApiResult<Redirect> {
    let payments = state
        .payments
        .as_ref()
        .ok_or(ApiError::Configuration("STRIPE_SECRET_KEY"))?;

    let tier: Tier = query
        .tier
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid tier".into()))?;
    if tier == Tier::Free {
        return Err(ApiError::BadRequest("Invalid tier".into()));
    }

    let session = payments
        .create_checkout_session(caller.0.as_str(), tier)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Checkout session creation failed");
            ApiError::Internal(e.to_string())
        })?;

    metrics::counter!("checkouts_created_total", "tier" => tier.to_string()).increment(1);
    tracing::info!(session = %session.session_id, "Redirecting to checkout");

    Ok(Redirect::to(&session.url))
}
