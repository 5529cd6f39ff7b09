//! Card generation pipeline
//!
//! Orchestrates a validated request end to end: entitlement check, prompt
//! synthesis, provider call, artifact persistence, usage accounting.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use wishcard_ledger::UsageLedger;
use wishcard_types::{CardRequest, GeneratedArtifact, UserKey};

use crate::artifact::ArtifactStore;
use crate::entitlement::entitle;
use crate::error::CardError;
use crate::prompt::build_prompt;
use crate::provider::ImageGenerator;
use crate::taxonomy::PromptTaxonomy;

/// Card generation service
///
/// The generator is optional so a deployment without provider credentials
/// still boots and serves the rest of the API; generation itself then fails
/// with a configuration error.
pub struct CardService {
    taxonomy: PromptTaxonomy,
    generator: Option<Arc<dyn ImageGenerator>>,
    store: Arc<dyn ArtifactStore>,
    ledger: Arc<UsageLedger>,
}

impl CardService {
    /// Create a new service
    pub fn new(
        taxonomy: PromptTaxonomy,
        generator: Option<Arc<dyn ImageGenerator>>,
        store: Arc<dyn ArtifactStore>,
        ledger: Arc<UsageLedger>,
    ) -> Self {
        Self {
            taxonomy,
            generator,
            store,
            ledger,
        }
    }

    /// Shared handle to the usage ledger
    pub fn ledger(&self) -> Arc<UsageLedger> {
        Arc::clone(&self.ledger)
    }

    /// Whether a provider is configured
    pub fn generation_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Generate one card for the user
    ///
    /// Usage accounting is best-effort: once the provider has produced an
    /// image the user gets it, even if the usage write fails.
    #[instrument(skip(self, request), fields(user = %user, occasion = %request.occasion))]
    pub async fn generate(
        &self,
        user: &UserKey,
        mut request: CardRequest,
    ) -> Result<GeneratedArtifact, CardError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(CardError::Configuration("FAL_KEY"))?;

        let record = self.ledger.sync_user(user).await?;
        let entitlement = entitle(record.tier, record.cards_used, request.add_watermark)?;
        request.add_watermark = entitlement.watermark;

        let prompt = build_prompt(&self.taxonomy, &request);
        let remote_url = generator.generate(&prompt, entitlement.backend).await?;
        let local_url = self.store.persist(&remote_url, &request.occasion).await;

        if let Err(e) = self.ledger.record_usage(user).await {
            warn!(user = %user, error = %e, "card delivered but usage was not recorded");
        }

        info!(
            tier = %record.tier,
            backend = ?entitlement.backend,
            local = local_url.is_some(),
            "card generated"
        );

        Ok(GeneratedArtifact {
            remote_url,
            local_url,
            occasion: request.occasion,
            prompt,
        })
    }
}

impl std::fmt::Debug for CardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardService")
            .field("generation_available", &self.generator.is_some())
            .finish()
    }
}
