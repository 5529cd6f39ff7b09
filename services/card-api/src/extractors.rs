//! Request extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use wishcard_types::UserKey;

use crate::error::ApiError;

/// Caller identity taken from the `x-wishcard-user` header
///
/// The gateway in front of this service authenticates the session and injects
/// the stable user key; a missing or malformed header is treated as an
/// unauthenticated request.
#[derive(Debug, Clone)]
pub struct CallerKey(pub UserKey);

pub const USER_HEADER: &str = "x-wishcard-user";

impl<S> FromRequestParts<S> for CallerKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let key = UserKey::parse(raw).map_err(|_| ApiError::Unauthorized)?;
        Ok(CallerKey(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(value: Option<&str>) -> Result<CallerKey, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(USER_HEADER, v);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        CallerKey::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_header_extracts_user_key() {
        let caller = extract(Some("user@example.com")).await.unwrap();
        assert_eq!(caller.0.as_str(), "user@example.com");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        assert!(matches!(extract(None).await, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_blank_header_is_unauthorized() {
        assert!(matches!(
            extract(Some("   ")).await,
            Err(ApiError::Unauthorized)
        ));
    }
}
