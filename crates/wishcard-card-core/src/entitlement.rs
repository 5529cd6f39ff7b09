//! Entitlement policy: quota gating and backend selection
//!
//! The generation client never sees tier labels; it consumes only the binary
//! watermark/quality split decided here.

use wishcard_types::Tier;

use crate::error::CardError;

/// Generation backend quality split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationBackend {
    /// Fast, lower-fidelity backend for watermarked output
    Fast,
    /// Higher-fidelity backend for paid output
    Quality,
}

impl GenerationBackend {
    /// Watermark-required output routes to the fast backend
    pub const fn for_watermark(watermark: bool) -> Self {
        if watermark {
            Self::Fast
        } else {
            Self::Quality
        }
    }

    /// Provider model identifier for this backend
    pub const fn model_id(&self) -> &'static str {
        match self {
            Self::Fast => "fal-ai/flux/schnell",
            Self::Quality => "fal-ai/flux-pro/v1.1",
        }
    }
}

/// The directives the rest of the pipeline consumes once generation is allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entitlement {
    /// Whether the output must carry the WishCard watermark
    pub watermark: bool,
    /// Which backend to generate on
    pub backend: GenerationBackend,
}

/// Gate a generation attempt on the monthly quota
///
/// Permitted iff `cards_used < quota(tier)`; denial carries the numeric limit.
pub fn check_quota(tier: Tier, cards_used: i64) -> Result<(), CardError> {
    let limit = tier.quota();
    if cards_used < limit {
        Ok(())
    } else {
        Err(CardError::QuotaExceeded { limit })
    }
}

/// Full entitlement decision for one generation attempt
///
/// Watermark-required tiers force the mark on regardless of what the request
/// asked for; a request may also opt in on any tier.
pub fn entitle(
    tier: Tier,
    cards_used: i64,
    requested_watermark: bool,
) -> Result<Entitlement, CardError> {
    check_quota(tier, cards_used)?;
    let watermark = requested_watermark || tier.watermark();
    Ok(Entitlement {
        watermark,
        backend: GenerationBackend::for_watermark(watermark),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_quota_boundary() {
        assert!(check_quota(Tier::Starter, 24).is_ok());
        match check_quota(Tier::Starter, 25) {
            Err(CardError::QuotaExceeded { limit }) => assert_eq!(limit, 25),
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_free_tier_forces_watermark_and_fast_backend() {
        let ent = entitle(Tier::Free, 0, false).unwrap();
        assert!(ent.watermark);
        assert_eq!(ent.backend, GenerationBackend::Fast);
    }

    #[test]
    fn test_paid_tier_uses_quality_backend() {
        let ent = entitle(Tier::Pro, 10, false).unwrap();
        assert!(!ent.watermark);
        assert_eq!(ent.backend, GenerationBackend::Quality);
    }

    #[test]
    fn test_opt_in_watermark_routes_fast_even_when_paid() {
        let ent = entitle(Tier::Plus, 0, true).unwrap();
        assert!(ent.watermark);
        assert_eq!(ent.backend, GenerationBackend::Fast);
    }

    #[test]
    fn test_exhausted_free_trial_denied() {
        match entitle(Tier::Free, 4, false) {
            Err(CardError::QuotaExceeded { limit }) => assert_eq!(limit, 4),
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
    }
}
