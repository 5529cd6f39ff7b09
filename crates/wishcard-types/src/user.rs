//! User identity types

use serde::{Deserialize, Serialize};

/// Stable user key resolved by the upstream identity layer
///
/// WishCard never authenticates users itself; the platform hands requests over
/// with identity already resolved to this opaque key (in practice an email
/// address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserKey(String);

impl UserKey {
    /// Maximum accepted key length
    pub const MAX_LEN: usize = 254;

    /// Parse and normalize a raw key
    pub fn parse(raw: &str) -> Result<Self, UserKeyParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserKeyParseError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(UserKeyParseError::TooLong);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(UserKeyParseError::InvalidCharacter);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing a user key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKeyParseError {
    Empty,
    TooLong,
    InvalidCharacter,
}

impl std::fmt::Display for UserKeyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "user key is empty"),
            Self::TooLong => write!(f, "user key is too long"),
            Self::InvalidCharacter => write!(f, "user key contains control characters"),
        }
    }
}

impl std::error::Error for UserKeyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let key = UserKey::parse("  ada@example.com ").unwrap();
        assert_eq!(key.as_str(), "ada@example.com");
    }

    #[test]
    fn test_parse_rejects_empty_and_control() {
        assert_eq!(UserKey::parse("   "), Err(UserKeyParseError::Empty));
        assert_eq!(
            UserKey::parse("ada\n@example.com"),
            Err(UserKeyParseError::InvalidCharacter)
        );
    }

    #[test]
    fn test_parse_rejects_overlong_key() {
        let raw = "a".repeat(UserKey::MAX_LEN + 1);
        assert_eq!(UserKey::parse(&raw), Err(UserKeyParseError::TooLong));
    }
}
