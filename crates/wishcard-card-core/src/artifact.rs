//! Artifact persistence
//!
//! Downloads the provider-hosted asset and keeps a local copy under a
//! collision-resistant name. Persistence is strictly best-effort: any failure
//! degrades to `None` and the caller exposes the remote URL instead.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::fal::GENERATION_TIMEOUT;

/// Artifact persistence trait
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist the remote asset locally, returning a serving path, or `None`
    /// if the copy could not be made.
    async fn persist(&self, remote_url: &str, occasion: &str) -> Option<String>;
}

/// Stores artifacts on the local filesystem, served under `/generated/`
#[derive(Clone)]
pub struct LocalArtifactStore {
    client: Client,
    media_dir: PathBuf,
}

impl LocalArtifactStore {
    /// Create a store rooted at the given media directory
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            media_dir: media_dir.into(),
        }
    }

    async fn try_persist(&self, remote_url: &str, occasion: &str) -> Result<String, PersistError> {
        let response = self
            .client
            .get(remote_url)
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PersistError::Status(response.status()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let bytes = response.bytes().await?;

        let file_name = file_name_for(
            occasion,
            content_type.as_deref(),
            Utc::now().timestamp_millis(),
        );
        self.write_local(&file_name, &bytes).await
    }

    async fn write_local(&self, file_name: &str, bytes: &[u8]) -> Result<String, PersistError> {
        tokio::fs::create_dir_all(&self.media_dir).await?;
        tokio::fs::write(self.media_dir.join(file_name), bytes).await?;
        debug!(file = %file_name, size = bytes.len(), "artifact persisted");
        Ok(format!("/generated/{file_name}"))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn persist(&self, remote_url: &str, occasion: &str) -> Option<String> {
        match self.try_persist(remote_url, occasion).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "could not keep a local copy; falling back to the remote URL");
                None
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum PersistError {
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("download failed: status {0}")]
    Status(reqwest::StatusCode),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Derive the stored filename: dashed occasion plus a millisecond timestamp
/// for collision resistance, extension from the reported content type.
fn file_name_for(occasion: &str, content_type: Option<&str>, millis: i64) -> String {
    let slug = occasion.split_whitespace().collect::<Vec<_>>().join("-");
    let ext = extension_for(content_type);
    format!("wishcard-{slug}-{millis}.{ext}")
}

/// Map a content type onto the small fixed extension set, defaulting to jpg
fn extension_for(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some(ct) if ct.contains("png") => "png",
        Some(ct) if ct.contains("webp") => "webp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping_defaults_to_jpg() {
        assert_eq!(extension_for(Some("image/png")), "png");
        assert_eq!(extension_for(Some("image/webp")), "webp");
        assert_eq!(extension_for(Some("image/jpeg")), "jpg");
        assert_eq!(extension_for(Some("application/octet-stream")), "jpg");
        assert_eq!(extension_for(None), "jpg");
    }

    #[test]
    fn test_file_name_dashes_whitespace_and_embeds_timestamp() {
        let name = file_name_for("just  sold", Some("image/png"), 1_700_000_000_123);
        assert_eq!(name, "wishcard-just-sold-1700000000123.png");
    }

    #[tokio::test]
    async fn test_write_local_creates_dir_and_returns_serving_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path().join("generated"));

        let path = store
            .write_local("wishcard-birthday-1.png", b"pngbytes")
            .await
            .unwrap();
        assert_eq!(path, "/generated/wishcard-birthday-1.png");

        let written = std::fs::read(dir.path().join("generated/wishcard-birthday-1.png")).unwrap();
        assert_eq!(written, b"pngbytes");
    }
}
