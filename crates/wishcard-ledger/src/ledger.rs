//! Usage ledger with optimistic local updates

use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use wishcard_db::{CreateLedgerEntry, LedgerRepository, LedgerRow};
use wishcard_types::{Tier, UserKey};

use crate::LedgerError;

/// A user's usage record as seen by the rest of the system
///
/// The cached copy may run ahead of the persisted row between an optimistic
/// increment and its reconciliation; the next full resync converges them.
#[derive(Debug, Clone)]
pub struct UsageRecord {
    pub user_key: String,
    pub tier: Tier,
    pub cards_used: i64,
    pub cards_limit: i64,
    pub last_reset: DateTime<Utc>,
}

impl UsageRecord {
    fn from_row(row: LedgerRow) -> Self {
        // Unknown tier labels degrade to the lowest tier rather than failing
        let tier: Tier = row.tier.parse().unwrap_or(Tier::Free);
        Self {
            user_key: row.user_key,
            tier,
            cards_used: row.cards_used,
            cards_limit: row.cards_limit,
            last_reset: row.last_reset,
        }
    }

    /// Cards left this month, never negative
    pub fn cards_remaining(&self) -> i64 {
        (self.cards_limit - self.cards_used).max(0)
    }
}

/// Usage ledger backed by a persistent store and a local optimistic cache
pub struct UsageLedger {
    repo: Arc<dyn LedgerRepository>,
    /// Local view per user key, updated before the store write lands
    records: Cache<String, UsageRecord>,
}

impl UsageLedger {
    /// Create a new ledger
    pub fn new(repo: Arc<dyn LedgerRepository>) -> Self {
        Self {
            repo,
            records: Cache::builder()
                .time_to_live(Duration::from_secs(60))
                .max_capacity(10_000)
                .build(),
        }
    }

    /// Return the user's record, creating one at the lowest tier on first sight
    ///
    /// Serves the locally cached (possibly optimistic) record when present.
    pub async fn sync_user(&self, user: &UserKey) -> Result<UsageRecord, LedgerError> {
        let key = user.as_str().to_string();

        if let Some(record) = self.records.get(&key).await {
            return Ok(record);
        }

        let record = match self.repo.find(user.as_str()).await? {
            Some(row) => UsageRecord::from_row(row),
            None => {
                let row = self
                    .repo
                    .create(CreateLedgerEntry {
                        user_key: key.clone(),
                        tier: Tier::Free.to_string(),
                        cards_limit: Tier::Free.quota(),
                    })
                    .await?;
                UsageRecord::from_row(row)
            }
        };
        // TODO: roll cards_used over to zero when last_reset crosses a month
        // boundary, once the rollover policy (calendar vs. anniversary) is
        // decided.

        self.records.insert(key, record.clone()).await;
        Ok(record)
    }

    /// Count one generated card against the user
    ///
    /// The local record is incremented first so the caller observes the new
    /// count immediately; the persistent write then re-reads the stored count
    /// and writes `current + 1`. There is no transactional guard: two
    /// concurrent increments for the same user can race and under-count. A
    /// failed store write is logged and never surfaced.
    pub async fn record_usage(&self, user: &UserKey) -> Result<UsageRecord, LedgerError> {
        let mut record = self.sync_user(user).await?;
        record.cards_used += 1;
        self.records
            .insert(user.as_str().to_string(), record.clone())
            .await;

        match self.repo.find(user.as_str()).await {
            Ok(Some(row)) => {
                if let Err(e) = self
                    .repo
                    .update_usage(user.as_str(), row.cards_used + 1)
                    .await
                {
                    warn!(user = %user, error = %e, "usage write failed; local count will drift until resync");
                }
            }
            Ok(None) => {
                warn!(user = %user, "ledger row missing during usage write");
            }
            Err(e) => {
                warn!(user = %user, error = %e, "usage re-read failed; local count will drift until resync");
            }
        }

        Ok(record)
    }

    /// Assign a new tier, refreshing the quota snapshot and preserving usage
    ///
    /// Upgrades keep usage-to-date; there is no proration. Idempotent.
    pub async fn set_tier(&self, user: &UserKey, tier: Tier) -> Result<UsageRecord, LedgerError> {
        let mut record = self.sync_user(user).await?;

        self.repo
            .update_tier(user.as_str(), &tier.to_string(), tier.quota())
            .await?;

        record.tier = tier;
        record.cards_limit = tier.quota();
        self.records
            .insert(user.as_str().to_string(), record.clone())
            .await;

        Ok(record)
    }

    /// Drop the local view so the next read goes back to the store
    pub async fn invalidate(&self, user: &UserKey) {
        self.records.invalidate(&user.as_str().to_string()).await;
    }
}

impl std::fmt::Debug for UsageLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageLedger").finish()
    }
}
