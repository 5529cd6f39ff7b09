//! Subscription tier types

use serde::{Deserialize, Serialize};

/// Subscription tier levels
///
/// Quota, watermarking, and price are pure functions of the tier label; only
/// the label itself is ever stored per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free tier - 4 cards total, watermarked output
    Free,
    /// Starter tier - £3.50/mo, 25 cards per month
    Starter,
    /// Plus tier - £6.99/mo, 60 cards per month
    Plus,
    /// Pro tier - £9.99/mo, 120 cards per month
    Pro,
}

impl Tier {
    /// Monthly card quota for this tier
    pub const fn quota(&self) -> i64 {
        match self {
            Self::Free => 4,
            Self::Starter => 25,
            Self::Plus => 60,
            Self::Pro => 120,
        }
    }

    /// Whether generated output must carry the WishCard watermark
    pub const fn watermark(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Monthly price in pence (GBP)
    pub const fn price_pence(&self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Starter => 350,
            Self::Plus => 699,
            Self::Pro => 999,
        }
    }

    /// Whether the tier is promoted as the popular choice
    pub const fn popular(&self) -> bool {
        matches!(self, Self::Plus)
    }

    /// Capitalized display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Starter => "Starter",
            Self::Plus => "Plus",
            Self::Pro => "Pro",
        }
    }

    /// Marketing feature list for this tier
    pub const fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Free => &["4 cards total (trial)", "Watermark on images", "Basic styles"],
            Self::Starter => &["25 cards per month", "No watermarks", "All styles"],
            Self::Plus => &[
                "60 cards per month",
                "No watermarks",
                "Priority generation",
                "All styles",
            ],
            Self::Pro => &[
                "120 cards per month",
                "No watermarks",
                "Fastest generation",
                "Priority support",
            ],
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Starter => write!(f, "starter"),
            Self::Plus => write!(f, "plus"),
            Self::Pro => write!(f, "pro"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "starter" => Ok(Self::Starter),
            "plus" => Ok(Self::Plus),
            "pro" => Ok(Self::Pro),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

/// Error parsing a tier string
#[derive(Debug, Clone)]
pub struct TierParseError(pub String);

impl std::fmt::Display for TierParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tier: {}", self.0)
    }
}

impl std::error::Error for TierParseError {}
