//! Mock repositories for testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wishcard_db::{CreateLedgerEntry, DbError, DbResult, LedgerRepository, LedgerRow};

/// In-memory ledger repository for testing
#[derive(Default, Clone)]
pub struct MockLedgerRepository {
    rows: Arc<DashMap<String, LedgerRow>>,
    /// When set, usage writes fail to exercise the log-and-continue path
    fail_usage_writes: Arc<AtomicBool>,
}

impl MockLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_usage_writes(&self, fail: bool) {
        self.fail_usage_writes.store(fail, Ordering::SeqCst);
    }

    /// Read the persisted count directly, bypassing the ledger cache
    pub fn persisted_usage(&self, user_key: &str) -> Option<i64> {
        self.rows.get(user_key).map(|row| row.cards_used)
    }

    pub fn persisted_tier(&self, user_key: &str) -> Option<String> {
        self.rows.get(user_key).map(|row| row.tier.clone())
    }
}

#[async_trait]
impl LedgerRepository for MockLedgerRepository {
    async fn find(&self, user_key: &str) -> DbResult<Option<LedgerRow>> {
        Ok(self.rows.get(user_key).map(|row| row.clone()))
    }

    async fn create(&self, entry: CreateLedgerEntry) -> DbResult<LedgerRow> {
        let now = Utc::now();
        let row = LedgerRow {
            user_key: entry.user_key.clone(),
            tier: entry.tier,
            cards_used: 0,
            cards_limit: entry.cards_limit,
            last_reset: now,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(entry.user_key, row.clone());
        Ok(row)
    }

    async fn update_usage(&self, user_key: &str, cards_used: i64) -> DbResult<()> {
        if self.fail_usage_writes.load(Ordering::SeqCst) {
            return Err(DbError::NotFound);
        }
        let mut row = self.rows.get_mut(user_key).ok_or(DbError::NotFound)?;
        row.cards_used = cards_used;
        row.updated_at = Utc::now();
        Ok(())
    }

    async fn update_tier(&self, user_key: &str, tier: &str, cards_limit: i64) -> DbResult<()> {
        let mut row = self.rows.get_mut(user_key).ok_or(DbError::NotFound)?;
        row.tier = tier.to_string();
        row.cards_limit = cards_limit;
        row.updated_at = Utc::now();
        Ok(())
    }
}
