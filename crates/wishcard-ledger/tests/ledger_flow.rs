//! Usage ledger behavior tests

mod common;

use std::sync::Arc;

use common::mock_repos::MockLedgerRepository;
use wishcard_ledger::UsageLedger;
use wishcard_types::{Tier, UserKey};

fn user(key: &str) -> UserKey {
    UserKey::parse(key).unwrap()
}

#[tokio::test]
async fn test_sync_creates_free_record_once() {
    let repo = MockLedgerRepository::new();
    let ledger = UsageLedger::new(Arc::new(repo.clone()));
    let ada = user("ada@example.com");

    let record = ledger.sync_user(&ada).await.unwrap();
    assert_eq!(record.tier, Tier::Free);
    assert_eq!(record.cards_used, 0);
    assert_eq!(record.cards_limit, Tier::Free.quota());

    // Second sync returns the same record without creating another row
    let again = ledger.sync_user(&ada).await.unwrap();
    assert_eq!(again.cards_used, 0);
    assert_eq!(repo.persisted_usage("ada@example.com"), Some(0));
}

#[tokio::test]
async fn test_record_usage_increments_locally_and_persists() {
    let repo = MockLedgerRepository::new();
    let ledger = UsageLedger::new(Arc::new(repo.clone()));
    let ada = user("ada@example.com");

    let record = ledger.record_usage(&ada).await.unwrap();
    assert_eq!(record.cards_used, 1);
    assert_eq!(repo.persisted_usage("ada@example.com"), Some(1));

    let record = ledger.record_usage(&ada).await.unwrap();
    assert_eq!(record.cards_used, 2);
    assert_eq!(repo.persisted_usage("ada@example.com"), Some(2));
}

#[tokio::test]
async fn test_failed_usage_write_is_not_fatal() {
    let repo = MockLedgerRepository::new();
    let ledger = UsageLedger::new(Arc::new(repo.clone()));
    let ada = user("ada@example.com");

    ledger.sync_user(&ada).await.unwrap();
    repo.set_fail_usage_writes(true);

    // The optimistic count still advances even though the store write fails
    let record = ledger.record_usage(&ada).await.unwrap();
    assert_eq!(record.cards_used, 1);
    assert_eq!(repo.persisted_usage("ada@example.com"), Some(0));

    // After the drift, a fresh resync converges back to the persisted value
    repo.set_fail_usage_writes(false);
    ledger.invalidate(&ada).await;
    let record = ledger.sync_user(&ada).await.unwrap();
    assert_eq!(record.cards_used, 0);
}

#[tokio::test]
async fn test_set_tier_preserves_usage_and_is_idempotent() {
    let repo = MockLedgerRepository::new();
    let ledger = UsageLedger::new(Arc::new(repo.clone()));
    let ada = user("ada@example.com");

    ledger.record_usage(&ada).await.unwrap();
    ledger.record_usage(&ada).await.unwrap();

    let record = ledger.set_tier(&ada, Tier::Plus).await.unwrap();
    assert_eq!(record.tier, Tier::Plus);
    assert_eq!(record.cards_used, 2);
    assert_eq!(record.cards_limit, Tier::Plus.quota());

    // Applying the same tier again changes nothing
    let record = ledger.set_tier(&ada, Tier::Plus).await.unwrap();
    assert_eq!(record.cards_used, 2);
    assert_eq!(record.cards_limit, Tier::Plus.quota());
    assert_eq!(repo.persisted_tier("ada@example.com"), Some("plus".to_string()));
    assert_eq!(repo.persisted_usage("ada@example.com"), Some(2));
}

#[tokio::test]
async fn test_cards_remaining_never_negative() {
    let repo = MockLedgerRepository::new();
    let ledger = UsageLedger::new(Arc::new(repo.clone()));
    let ada = user("ada@example.com");

    let mut record = ledger.sync_user(&ada).await.unwrap();
    record.cards_used = record.cards_limit + 3;
    assert_eq!(record.cards_remaining(), 0);
}
