//! Image generation provider abstraction

use async_trait::async_trait;

use crate::entitlement::GenerationBackend;
use crate::error::CardError;

/// Image generation provider trait
///
/// Abstracts the hosted image model so the pipeline can be exercised against
/// test doubles and the provider can be swapped.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate a single image for the prompt on the selected backend and
    /// return the provider-hosted asset URL.
    async fn generate(&self, prompt: &str, backend: GenerationBackend)
        -> Result<String, CardError>;
}
