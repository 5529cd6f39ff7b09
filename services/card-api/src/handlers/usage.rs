//! Usage summary handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use crate::error::ApiResult;
use crate::extractors::CallerKey;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub tier: String,
    pub cards_used: i64,
    pub cards_limit: i64,
    pub cards_remaining: i64,
    /// Whether this tier's output carries the watermark
    pub watermark: bool,
}

/// GET /api/v1/usage
///
/// First sight of a user creates their free-tier record.
#[instrument(skip(state), fields(user = %caller.0))]
pub async fn get_usage(
    State(state): State<AppState>,
    caller: CallerKey,
) -> ApiResult<Json<UsageResponse>> {
    let record = state.ledger.sync_user(&caller.0).await?;

    Ok(Json(UsageResponse {
        tier: record.tier.to_string(),
        cards_used: record.cards_used,
        cards_limit: record.cards_limit,
        cards_remaining: record.cards_remaining(),
        watermark: record.tier.watermark(),
    }))
}
