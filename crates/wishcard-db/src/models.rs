//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Usage ledger row, one per user keyed by the stable user key
#[derive(Debug, Clone, FromRow)]
pub struct LedgerRow {
    pub user_key: String,
    pub tier: String,
    pub cards_used: i64,
    /// Quota snapshot taken when the tier was assigned
    pub cards_limit: i64,
    /// Reserved for monthly rollover; recorded but not yet acted on
    pub last_reset: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gallery row from the database
#[derive(Debug, Clone, FromRow)]
pub struct GalleryRow {
    pub id: Uuid,
    pub user_key: String,
    pub url: String,
    pub occasion: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}
