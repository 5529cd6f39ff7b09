//! Saved-card gallery handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use wishcard_db::{CreateGalleryItem, GalleryRow};
use wishcard_types::GalleryItem;

use crate::error::{ApiError, ApiResult};
use crate::extractors::CallerKey;
use crate::state::AppState;

const MAX_URL_LEN: usize = 2048;

#[derive(Debug, Deserialize)]
pub struct SaveCardRequest {
    pub url: String,
    pub occasion: String,
    pub prompt: String,
}

fn item_from_row(row: GalleryRow) -> GalleryItem {
    GalleryItem {
        id: row.id,
        url: row.url,
        occasion: row.occasion,
        prompt: row.prompt,
        created_at: row.created_at,
    }
}

/// POST /api/v1/gallery
#[instrument(skip(state, req), fields(user = %caller.0))]
pub async fn save_card(
    State(state): State<AppState>,
    caller: CallerKey,
    Json(req): Json<SaveCardRequest>,
) -> ApiResult<(StatusCode, Json<GalleryItem>)> {
    if req.url.is_empty() || req.url.len() > MAX_URL_LEN {
        return Err(ApiError::BadRequest("Invalid url".into()));
    }
    if req.occasion.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid occasion".into()));
    }

    let row = state
        .gallery
        .insert(CreateGalleryItem {
            id: Uuid::new_v4(),
            user_key: caller.0.as_str().to_string(),
            url: req.url,
            occasion: req.occasion,
            prompt: req.prompt,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(item_from_row(row))))
}

/// GET /api/v1/gallery
#[instrument(skip(state), fields(user = %caller.0))]
pub async fn list_cards(
    State(state): State<AppState>,
    caller: CallerKey,
) -> ApiResult<Json<Vec<GalleryItem>>> {
    let rows = state.gallery.list_for_user(caller.0.as_str()).await?;
    Ok(Json(rows.into_iter().map(item_from_row).collect()))
}

/// DELETE /api/v1/gallery/{id}
///
/// Ownership is enforced in the query; deleting someone else's card is
/// indistinguishable from deleting a card that never existed.
#[instrument(skip(state), fields(user = %caller.0, id = %id))]
pub async fn delete_card(
    State(state): State<AppState>,
    caller: CallerKey,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = state.gallery.delete(caller.0.as_str(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
