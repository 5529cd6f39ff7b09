//! Error types for the Card API service.
//!
//! The wire shape is the flat `{ error, code, message }` body the public API
//! documents: `error` is a short headline, `code` is machine-readable, and
//! `message` is safe to show to an end user.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use wishcard_card_core::CardError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub message: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request")]
    Validation(String),

    #[error("Monthly card limit reached")]
    QuotaExceeded { limit: i64 },

    #[error("Service temporarily busy")]
    RateLimited,

    #[error("Failed to generate card")]
    Generation,

    #[error("Service not configured")]
    Configuration(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Webhook error")]
    Webhook,

    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) | Self::Webhook => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::QuotaExceeded { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Generation | Self::Configuration(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            Self::RateLimited => "RATE_LIMIT",
            Self::Generation => "GENERATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest(_) | Self::Webhook => "BAD_REQUEST",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// End-user message, never leaking provider internals
    fn user_message(&self) -> String {
        match self {
            Self::Validation(detail) => {
                format!("Please check your card details and try again: {detail}")
            }
            Self::QuotaExceeded { limit } => format!(
                "You've used all {limit} cards in your plan this month. Upgrade to keep creating."
            ),
            Self::RateLimited => {
                "Our image generation service is experiencing high demand. Please try again in a moment."
                    .to_string()
            }
            Self::Generation => {
                "We're having trouble generating your card right now. Please try again.".to_string()
            }
            Self::Configuration(key) => format!("The {key} credential is not configured."),
            Self::Unauthorized => "Sign in to continue.".to_string(),
            Self::NotFound => "That card could not be found.".to_string(),
            Self::BadRequest(detail) => detail.clone(),
            Self::Webhook => "Webhook verification failed.".to_string(),
            Self::Internal(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<CardError> for ApiError {
    fn from(e: CardError) -> Self {
        match e {
            CardError::Validation(v) => Self::Validation(v.to_string()),
            CardError::QuotaExceeded { limit } => Self::QuotaExceeded { limit },
            CardError::RateLimited(_) => Self::RateLimited,
            CardError::Generation(_) => Self::Generation,
            CardError::Configuration(key) => Self::Configuration(key),
            CardError::Ledger(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<wishcard_db::DbError> for ApiError {
    fn from(e: wishcard_db::DbError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<wishcard_ledger::LedgerError> for ApiError {
    fn from(e: wishcard_ledger::LedgerError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors with their detail, which never reaches the wire
        if matches!(self, Self::Internal(_) | Self::Generation | Self::Configuration(_)) {
            tracing::error!(error = ?self, "Internal API error");
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: self.error_code().to_string(),
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use wishcard_card_core::ValidationError;

    #[test]
    fn test_card_error_mapping() {
        let cases = [
            (
                ApiError::from(CardError::Validation(ValidationError::new(
                    "message", "required",
                ))),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                ApiError::from(CardError::QuotaExceeded { limit: 25 }),
                StatusCode::PAYMENT_REQUIRED,
                "QUOTA_EXCEEDED",
            ),
            (
                ApiError::from(CardError::RateLimited("rate limit".into())),
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT",
            ),
            (
                ApiError::from(CardError::Generation("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "GENERATION_ERROR",
            ),
            (
                ApiError::from(CardError::Configuration("FAL_KEY")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn test_internal_detail_not_in_user_message() {
        let err = ApiError::Internal("connection refused to db-host:5432".into());
        assert!(!err.user_message().contains("db-host"));
    }

    #[test]
    fn test_quota_message_carries_limit() {
        let err = ApiError::QuotaExceeded { limit: 60 };
        assert!(err.user_message().contains("60"));
    }
}
