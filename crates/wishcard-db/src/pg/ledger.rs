//! PostgreSQL ledger repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::LedgerRow;
use crate::repo::{CreateLedgerEntry, LedgerRepository};

/// PostgreSQL usage ledger repository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    /// Create a new ledger repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for PgLedgerRepository {
    async fn find(&self, user_key: &str) -> DbResult<Option<LedgerRow>> {
        let row = sqlx::query_as::<_, LedgerRow>(
            r#"
            SELECT user_key, tier, cards_used, cards_limit, last_reset, created_at, updated_at
            FROM ledger
            WHERE user_key = $1
            "#,
        )
        .bind(user_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, entry: CreateLedgerEntry) -> DbResult<LedgerRow> {
        let row = sqlx::query_as::<_, LedgerRow>(
            r#"
            INSERT INTO ledger (user_key, tier, cards_used, cards_limit, last_reset)
            VALUES ($1, $2, 0, $3, NOW())
            RETURNING user_key, tier, cards_used, cards_limit, last_reset, created_at, updated_at
            "#,
        )
        .bind(&entry.user_key)
        .bind(&entry.tier)
        .bind(entry.cards_limit)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_usage(&self, user_key: &str, cards_used: i64) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE ledger
            SET cards_used = $2, updated_at = NOW()
            WHERE user_key = $1
            "#,
        )
        .bind(user_key)
        .bind(cards_used)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_tier(&self, user_key: &str, tier: &str, cards_limit: i64) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE ledger
            SET tier = $2, cards_limit = $3, updated_at = NOW()
            WHERE user_key = $1
            "#,
        )
        .bind(user_key)
        .bind(tier)
        .bind(cards_limit)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
