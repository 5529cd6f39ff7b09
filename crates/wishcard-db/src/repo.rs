//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// Usage ledger repository trait
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Find a ledger entry by user key
    async fn find(&self, user_key: &str) -> DbResult<Option<LedgerRow>>;

    /// Create a new ledger entry with zero usage
    async fn create(&self, entry: CreateLedgerEntry) -> DbResult<LedgerRow>;

    /// Write an absolute usage count (the caller computes current + 1)
    async fn update_usage(&self, user_key: &str, cards_used: i64) -> DbResult<()>;

    /// Update the tier label and its quota snapshot, leaving usage untouched
    async fn update_tier(&self, user_key: &str, tier: &str, cards_limit: i64) -> DbResult<()>;
}

/// Create ledger entry input
#[derive(Debug, Clone)]
pub struct CreateLedgerEntry {
    pub user_key: String,
    pub tier: String,
    pub cards_limit: i64,
}

/// Gallery repository trait
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Persist a saved card
    async fn insert(&self, item: CreateGalleryItem) -> DbResult<GalleryRow>;

    /// List a user's saved cards, newest first
    async fn list_for_user(&self, user_key: &str) -> DbResult<Vec<GalleryRow>>;

    /// Delete a saved card owned by the given user, returning rows affected
    async fn delete(&self, user_key: &str, id: Uuid) -> DbResult<u64>;
}

/// Create gallery item input
#[derive(Debug, Clone)]
pub struct CreateGalleryItem {
    pub id: Uuid,
    pub user_key: String,
    pub url: String,
    pub occasion: String,
    pub prompt: String,
}
