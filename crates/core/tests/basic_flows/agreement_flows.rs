//! Agreement builder flows.

use agentfin_core::{build_agreement, derive, InfraType, TrustSignals};
use agentfin_crypto::ContentHash;
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn agent() -> TrustSignals {
    TrustSignals::new("Agent111", "scout")
        .with_trust_score(55)
        .unwrap()
        .with_infra_type(InfraType::Tee)
        .with_attestations(2)
        .with_economic_stake(true)
}

#[test]
fn test_repeat_builds_share_terms_not_ids() {
    let signals = agent();
    let profile = derive(&signals);
    let mut rng = StdRng::seed_from_u64(42);

    let first = build_agreement(&signals, &profile, 10.0, "Counter222", now(), &mut rng).unwrap();
    let second = build_agreement(&signals, &profile, 10.0, "Counter222", now(), &mut rng).unwrap();

    assert_ne!(first.agreement_id, second.agreement_id);
    assert_ne!(first.terms_uri, second.terms_uri);
    assert_eq!(first.trust_adjustment.adjusted_escrow, second.trust_adjustment.adjusted_escrow);
    assert_eq!(first.terms_hash, second.terms_hash);
    assert_eq!(
        first.trust_adjustment.escrow_reduction_percent,
        second.trust_adjustment.escrow_reduction_percent
    );
}

#[test]
fn test_gold_tee_stake_escrow() {
    let signals = agent();
    let profile = derive(&signals);
    let mut rng = StdRng::seed_from_u64(42);
    let agreement = build_agreement(&signals, &profile, 200.0, "Counter222", now(), &mut rng).unwrap();

    // 25 / (1.2 * 1.15) rounds to 18
    assert_eq!(profile.escrow_percentage, 18);
    assert_eq!(agreement.trust_adjustment.escrow_reduction_percent, 82);
    assert!((agreement.escrow_amount - 36.0).abs() < 1e-9);
    assert_eq!(
        agreement.trust_adjustment.reason,
        "Gold tier: 18% escrow required (82% reduction from trust)"
    );
}

#[test]
fn test_terms_hash_is_sha256_of_terms_json() {
    let signals = agent();
    let profile = derive(&signals);
    let mut rng = StdRng::seed_from_u64(42);
    let agreement = build_agreement(&signals, &profile, 10.0, "Counter222", now(), &mut rng).unwrap();

    let json = serde_json::to_vec(&agreement.terms).unwrap();
    assert_eq!(agreement.terms_hash, ContentHash::digest(&json));
    let text = String::from_utf8(json).unwrap();
    assert!(text.starts_with(r#"{"service":"AI Agent Task Execution","escrowAmount":"#));
    assert!(text.contains(r#""infraRequirement":"TEE","trustThreshold":55,"sla":"#));
}

#[test]
fn test_unverified_agent_pays_full_escrow() {
    let signals = TrustSignals::new("Fresh111", "fresh");
    let profile = derive(&signals);
    let mut rng = StdRng::seed_from_u64(42);
    let agreement = build_agreement(&signals, &profile, 10.0, "Counter222", now(), &mut rng).unwrap();
    assert_eq!(agreement.escrow_amount, 10.0);
    assert_eq!(agreement.trust_adjustment.escrow_reduction_percent, 0);
}
