//! fal.ai image generation client

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::entitlement::GenerationBackend;
use crate::error::CardError;
use crate::provider::ImageGenerator;

const FAL_API_BASE: &str = "https://fal.run";

/// Per-call budget sized to the slowest backend's expected latency
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// fal.ai client for the Flux model family
#[derive(Clone)]
pub struct FalClient {
    client: Client,
    api_key: String,
}

impl FalClient {
    /// Create a new client
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

/// Fixed request parameters: one square high-resolution image, safety
/// filtering at a level permissive enough for artistic greeting-card content
#[derive(Debug, Serialize)]
struct FluxRequest<'a> {
    prompt: &'a str,
    image_size: &'static str,
    num_images: u32,
    enable_safety_checker: bool,
    safety_tolerance: &'static str,
}

impl<'a> FluxRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            image_size: "square_hd",
            num_images: 1,
            enable_safety_checker: true,
            safety_tolerance: "2",
        }
    }
}

/// The provider wraps output either in an outer `data` object or at the top
/// level; both shapes are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FluxEnvelope {
    Wrapped { data: FluxOutput },
    Bare(FluxOutput),
}

impl FluxEnvelope {
    fn into_output(self) -> FluxOutput {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(output) => output,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FluxOutput {
    #[serde(default)]
    images: Vec<FluxImage>,
}

#[derive(Debug, Deserialize)]
struct FluxImage {
    url: String,
}

/// Translate raw provider failure text into the error taxonomy
///
/// Provider-reported throttling is distinct from the entitlement layer's own
/// quota denial.
fn classify_provider_error(message: &str) -> CardError {
    let lower = message.to_lowercase();
    if lower.contains("rate limit") || lower.contains("quota") {
        CardError::RateLimited(message.to_string())
    } else {
        CardError::Generation(message.to_string())
    }
}

#[async_trait]
impl ImageGenerator for FalClient {
    #[instrument(skip(self, prompt), fields(model = backend.model_id()))]
    async fn generate(
        &self,
        prompt: &str,
        backend: GenerationBackend,
    ) -> Result<String, CardError> {
        let url = format!("{FAL_API_BASE}/{}", backend.model_id());
        debug!(prompt_len = prompt.len(), "requesting card image");

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Key {}", self.api_key))
            .timeout(GENERATION_TIMEOUT)
            .json(&FluxRequest::new(prompt))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "provider request failed");
                classify_provider_error(&e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "provider returned an error");
            return Err(classify_provider_error(&body));
        }

        let envelope: FluxEnvelope = response
            .json()
            .await
            .map_err(|e| CardError::Generation(format!("unreadable provider response: {e}")))?;

        let image = envelope
            .into_output()
            .images
            .into_iter()
            .next()
            .ok_or_else(|| CardError::Generation("no image returned from provider".to_string()))?;

        Ok(image.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accepts_wrapped_shape() {
        let raw = r#"{"data":{"images":[{"url":"https://cdn.fal.ai/a.png","content_type":"image/png"}]}}"#;
        let envelope: FluxEnvelope = serde_json::from_str(raw).unwrap();
        let output = envelope.into_output();
        assert_eq!(output.images[0].url, "https://cdn.fal.ai/a.png");
    }

    #[test]
    fn test_envelope_accepts_bare_shape() {
        let raw = r#"{"images":[{"url":"https://cdn.fal.ai/b.png"}],"seed":42}"#;
        let envelope: FluxEnvelope = serde_json::from_str(raw).unwrap();
        let output = envelope.into_output();
        assert_eq!(output.images[0].url, "https://cdn.fal.ai/b.png");
    }

    #[test]
    fn test_envelope_tolerates_missing_images() {
        let raw = r#"{"data":{"request_id":"abc"}}"#;
        let envelope: FluxEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.into_output().images.is_empty());
    }

    #[test]
    fn test_throttling_text_classifies_as_rate_limited() {
        assert!(matches!(
            classify_provider_error("Rate limit exceeded, retry later"),
            CardError::RateLimited(_)
        ));
        assert!(matches!(
            classify_provider_error("monthly quota reached"),
            CardError::RateLimited(_)
        ));
    }

    #[test]
    fn test_other_text_classifies_as_generation_error() {
        assert!(matches!(
            classify_provider_error("internal server error"),
            CardError::Generation(_)
        ));
    }
}
