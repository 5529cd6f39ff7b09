//! End-to-end pipeline tests against in-memory doubles

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};

use wishcard_card_core::{
    ArtifactStore, CardError, CardService, GenerationBackend, ImageGenerator, PromptTaxonomy,
};
use wishcard_db::{CreateLedgerEntry, DbResult, LedgerRepository, LedgerRow};
use wishcard_ledger::UsageLedger;
use wishcard_types::{CardRequest, Tier, UserKey};

struct MemoryLedgerRepository {
    rows: DashMap<String, LedgerRow>,
}

impl MemoryLedgerRepository {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }

    fn with_user(self, user_key: &str, tier: Tier, cards_used: i64) -> Self {
        let now = Utc::now();
        self.rows.insert(
            user_key.to_string(),
            LedgerRow {
                user_key: user_key.to_string(),
                tier: tier.to_string(),
                cards_used,
                cards_limit: tier.quota(),
                last_reset: now,
                created_at: now,
                updated_at: now,
            },
        );
        self
    }

    fn persisted_usage(&self, user_key: &str) -> i64 {
        self.rows.get(user_key).map(|r| r.cards_used).unwrap_or(0)
    }
}

#[async_trait]
impl LedgerRepository for MemoryLedgerRepository {
    async fn find(&self, user_key: &str) -> DbResult<Option<LedgerRow>> {
        Ok(self.rows.get(user_key).map(|r| r.clone()))
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
        if let Some(mut row) = self.rows.get_mut(user_key) {
            row.cards_used = cards_used;
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_tier(&self, user_key: &str, tier: &str, cards_limit: i64) -> DbResult<()> {
        if let Some(mut row) = self.rows.get_mut(user_key) {
            row.tier = tier.to_string();
            row.cards_limit = cards_limit;
            row.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// Generator double that records the prompt and backend it was handed
struct RecordingGenerator {
    calls: Mutex<Vec<(String, GenerationBackend)>>,
    url: String,
}

impl RecordingGenerator {
    fn new(url: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            url: url.to_string(),
        }
    }

    fn last_prompt(&self) -> String {
        self.calls.lock().unwrap().last().unwrap().0.clone()
    }

    fn last_backend(&self) -> GenerationBackend {
        self.calls.lock().unwrap().last().unwrap().1
    }
}

#[async_trait]
impl ImageGenerator for RecordingGenerator {
    async fn generate(
        &self,
        prompt: &str,
        backend: GenerationBackend,
    ) -> Result<String, CardError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), backend));
        Ok(self.url.clone())
    }
}

/// Store double with a fixed persistence outcome
struct FixedStore {
    local: Option<String>,
}

#[async_trait]
impl ArtifactStore for FixedStore {
    async fn persist(&self, _remote_url: &str, _occasion: &str) -> Option<String> {
        self.local.clone()
    }
}

fn request(occasion: &str) -> CardRequest {
    CardRequest {
        occasion: occasion.to_string(),
        message: "Congratulations!".to_string(),
        recipient: Some("The Smiths".to_string()),
        sender: None,
        style: Default::default(),
        font: Default::default(),
        color: Default::default(),
        position: Default::default(),
        effects: Vec::new(),
        add_watermark: false,
    }
}

fn service(
    repo: Arc<MemoryLedgerRepository>,
    generator: Option<Arc<dyn ImageGenerator>>,
    local: Option<String>,
) -> CardService {
    let ledger = Arc::new(UsageLedger::new(repo));
    CardService::new(
        PromptTaxonomy::builtin(),
        generator,
        Arc::new(FixedStore { local }),
        ledger,
    )
}

#[tokio::test]
async fn test_paid_user_generates_and_usage_is_recorded() {
    let repo = Arc::new(MemoryLedgerRepository::new().with_user("agent-7", Tier::Pro, 3));
    let generator = Arc::new(RecordingGenerator::new("https://cdn.fal.ai/sold.png"));
    let svc = service(
        Arc::clone(&repo),
        Some(generator.clone() as Arc<dyn ImageGenerator>),
        Some("/generated/wishcard-just-sold-1.png".to_string()),
    );
    let user = UserKey::parse("agent-7").unwrap();

    let artifact = svc.generate(&user, request("just sold")).await.unwrap();

    assert_eq!(artifact.remote_url, "https://cdn.fal.ai/sold.png");
    assert_eq!(
        artifact.serving_url(),
        "/generated/wishcard-just-sold-1.png"
    );
    assert_eq!(artifact.occasion, "just sold");
    assert_eq!(generator.last_backend(), GenerationBackend::Quality);
    assert_eq!(repo.persisted_usage("agent-7"), 4);
}

#[tokio::test]
async fn test_failed_persistence_falls_back_to_remote_url() {
    let repo = Arc::new(MemoryLedgerRepository::new().with_user("agent-7", Tier::Plus, 0));
    let generator = Arc::new(RecordingGenerator::new("https://cdn.fal.ai/b.png"));
    let svc = service(
        Arc::clone(&repo),
        Some(generator as Arc<dyn ImageGenerator>),
        None,
    );
    let user = UserKey::parse("agent-7").unwrap();

    let artifact = svc.generate(&user, request("birthday")).await.unwrap();

    assert!(artifact.local_url.is_none());
    assert_eq!(artifact.serving_url(), "https://cdn.fal.ai/b.png");
    // Delivery still counts against the quota
    assert_eq!(repo.persisted_usage("agent-7"), 1);
}

#[tokio::test]
async fn test_exhausted_quota_denied_before_provider_call() {
    let repo = Arc::new(MemoryLedgerRepository::new().with_user("agent-7", Tier::Starter, 25));
    let generator = Arc::new(RecordingGenerator::new("https://cdn.fal.ai/x.png"));
    let svc = service(
        Arc::clone(&repo),
        Some(generator.clone() as Arc<dyn ImageGenerator>),
        None,
    );
    let user = UserKey::parse("agent-7").unwrap();

    match svc.generate(&user, request("birthday")).await {
        Err(CardError::QuotaExceeded { limit }) => assert_eq!(limit, 25),
        other => panic!("expected QuotaExceeded, got {other:?}"),
    }
    assert!(generator.calls.lock().unwrap().is_empty());
    assert_eq!(repo.persisted_usage("agent-7"), 25);
}

#[tokio::test]
async fn test_missing_provider_is_a_configuration_error() {
    let repo = Arc::new(MemoryLedgerRepository::new());
    let svc = service(repo, None, None);
    let user = UserKey::parse("agent-7").unwrap();

    match svc.generate(&user, request("birthday")).await {
        Err(CardError::Configuration(key)) => assert_eq!(key, "FAL_KEY"),
        other => panic!("expected Configuration, got {other:?}"),
    }
}

#[tokio::test]
async fn test_first_seen_user_starts_free_with_watermarked_prompt() {
    let repo = Arc::new(MemoryLedgerRepository::new());
    let generator = Arc::new(RecordingGenerator::new("https://cdn.fal.ai/free.png"));
    let svc = service(
        Arc::clone(&repo),
        Some(generator.clone() as Arc<dyn ImageGenerator>),
        None,
    );
    let user = UserKey::parse("fresh-user").unwrap();

    svc.generate(&user, request("thank you")).await.unwrap();

    assert_eq!(generator.last_backend(), GenerationBackend::Fast);
    assert!(generator.last_prompt().contains("WishCard"));
    assert_eq!(repo.persisted_usage("fresh-user"), 1);
}
