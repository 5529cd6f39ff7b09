//! Card generation handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::time::Instant;
use tracing::instrument;

use wishcard_card_core::validate_request;

use crate::error::ApiResult;
use crate::extractors::CallerKey;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCardResponse {
    /// Locally served path when persistence succeeded, remote URL otherwise
    pub image_url: String,
    /// Provider-hosted URL, always present
    pub remote_image_url: String,
    /// Echo of the requested occasion
    pub occasion: String,
}

/// POST /api/v1/cards/generate
///
/// The body is taken as raw JSON so validation can name the offending field
/// instead of surfacing a serde parse error.
#[instrument(skip(state, payload), fields(user = %caller.0))]
pub async fn generate_card(
    State(state): State<AppState>,
    caller: CallerKey,
    Json(payload): Json<serde_json::Value>,
) -> ApiResult<Json<GenerateCardResponse>> {
    let start = Instant::now();

    let request = validate_request(&payload).map_err(wishcard_card_core::CardError::from)?;
    let occasion = request.occasion.clone();

    let result = state.cards.generate(&caller.0, request).await;

    let outcome = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!("cards_generated_total", "result" => outcome).increment(1);
    metrics::histogram!("card_generation_duration_seconds")
        .record(start.elapsed().as_secs_f64());

    let artifact = result?;

    Ok(Json(GenerateCardResponse {
        image_url: artifact.serving_url().to_string(),
        remote_image_url: artifact.remote_url,
        occasion,
    }))
}
