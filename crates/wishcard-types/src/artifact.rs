//! Generated artifacts and gallery items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The result of one successful generation call
///
/// The remote URL is always present; the local URL only when persistence
/// succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Provider-hosted asset URL
    pub remote_url: String,
    /// Locally persisted serving path, if the copy was made
    pub local_url: Option<String>,
    /// Occasion label echoed from the request
    pub occasion: String,
    /// The synthesized prompt the image was generated from
    pub prompt: String,
}

impl GeneratedArtifact {
    /// URL to expose to the end user: the local copy when present, otherwise
    /// the remote provider URL.
    pub fn serving_url(&self) -> &str {
        self.local_url.as_deref().unwrap_or(&self.remote_url)
    }
}

/// A card a user explicitly saved into their gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: Uuid,
    pub url: String,
    pub occasion: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serving_url_prefers_local_copy() {
        let mut artifact = GeneratedArtifact {
            remote_url: "https://cdn.example.com/a.png".into(),
            local_url: Some("/generated/wishcard-birthday-1.png".into()),
            occasion: "birthday".into(),
            prompt: "p".into(),
        };
        assert_eq!(artifact.serving_url(), "/generated/wishcard-birthday-1.png");

        artifact.local_url = None;
        assert_eq!(artifact.serving_url(), "https://cdn.example.com/a.png");
    }
}
