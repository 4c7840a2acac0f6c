//! Tier classification
//!
//! Tiers are assigned by walking an ordered rule list and taking the first
//! rule whose predicate holds. The flagged rule sits at the top so it
//! dominates every numeric signal.

use agentfin_types::{Tier, TrustSignals};
use serde::Serialize;
use tracing::debug;

/// A single classification rule
struct TierRule {
    tier: Tier,
    requirement: &'static str,
    qualifies: fn(&TrustSignals) -> bool,
}

/// Evaluated top to bottom, first match wins
static TIER_RULES: [TierRule; 6] = [
    TierRule {
        tier: Tier::Blocked,
        requirement: "agent is flagged",
        qualifies: |s| s.is_flagged,
    },
    TierRule {
        tier: Tier::Diamond,
        requirement: "trust_score >= 80 with hardware binding",
        qualifies: |s| s.trust_score.value() >= 80 && s.has_hardware_binding,
    },
    TierRule {
        tier: Tier::Gold,
        requirement: "trust_score >= 50 with at least 2 attestations",
        qualifies: |s| s.trust_score.value() >= 50 && s.attestation_count >= 2,
    },
    TierRule {
        tier: Tier::Silver,
        requirement: "trust_score >= 20 with at least 1 attestation",
        qualifies: |s| s.trust_score.value() >= 20 && s.attestation_count >= 1,
    },
    TierRule {
        tier: Tier::Bronze,
        requirement: "trust_score > 0",
        qualifies: |s| s.trust_score.value() > 0,
    },
    TierRule {
        tier: Tier::Unverified,
        requirement: "no qualifying signals",
        qualifies: |_| true,
    },
];

/// The tier an agent landed in and the rule that placed it there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierDecision {
    pub tier: Tier,
    pub requirement: &'static str,
}

/// Classify signals into a tier
pub fn classify(signals: &TrustSignals) -> Tier {
    classify_with_reason(signals).tier
}

/// Classify signals and report which rule matched
pub fn classify_with_reason(signals: &TrustSignals) -> TierDecision {
    let decision = TIER_RULES
        .iter()
        .find(|rule| (rule.qualifies)(signals))
        .map(|rule| TierDecision {
            tier: rule.tier,
            requirement: rule.requirement,
        })
        .unwrap_or(TierDecision {
            tier: Tier::Unverified,
            requirement: "no qualifying signals",
        });

    debug!(
        wallet = signals.wallet(),
        trust_score = signals.trust_score.value(),
        attestations = signals.attestation_count,
        tier = %decision.tier,
        "classified agent"
    );
    decision
}
