//! Application state for the Card API service.

use std::sync::Arc;

use wishcard_billing::{StripeProvider, WebhookHandler};
use wishcard_card_core::CardService;
use wishcard_db::{DbPool, GalleryRepository};
use wishcard_ledger::UsageLedger;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Card generation pipeline
    pub cards: Arc<CardService>,
    /// Usage ledger (shared with the card service)
    pub ledger: Arc<UsageLedger>,
    /// Saved-card gallery
    pub gallery: Arc<dyn GalleryRepository>,
    /// Stripe checkout, when payments are configured
    pub payments: Option<Arc<StripeProvider>>,
    /// Stripe webhook verification, when payments are configured
    pub webhooks: Option<Arc<WebhookHandler>>,
    /// Database pool (readiness probe)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
