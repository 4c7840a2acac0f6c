//! Complex flow tests for the core crate.
//! These tests run the whole pipeline through the engine facade.

use agentfin_core::{
    derive, precise_gate, Clock, EngineConfig, EvaluationRequest, GateCriteria, InfraType, Tier,
    TrustEngine, TrustSignals,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn engine() -> TrustEngine<FixedClock> {
    TrustEngine::with_clock(EngineConfig::default(), FixedClock(now())).unwrap()
}

fn request(base_escrow: f64, sender_pre_balance: f64) -> EvaluationRequest {
    EvaluationRequest {
        criteria: GateCriteria::new()
            .with_min_trust_score(20)
            .with_required_infra([InfraType::Cloud, InfraType::Tee])
            .with_min_attestations(1)
            .with_max_age_days(30.0),
        base_escrow,
        counterparty: "Counter222".into(),
        vault: "Vault333".into(),
        sender_pre_balance,
    }
}

#[test]
fn test_diamond_agent_end_to_end() {
    let agent = TrustSignals::new("Diamond111", "oracle")
        .with_trust_score(90)
        .unwrap()
        .with_infra_type(InfraType::Tee)
        .with_attestations(5)
        .with_economic_stake(true)
        .with_hardware_binding(true)
        .with_last_verified(now() - Duration::days(1))
        .with_registered_at(now() - Duration::days(200))
        .with_nonce(3);
    let mut rng = StdRng::seed_from_u64(11);

    let evaluation = engine().evaluate(&agent, &request(100.0, 50.0), &mut rng).unwrap();

    assert_eq!(evaluation.decision.tier, Tier::Diamond);
    assert_eq!(evaluation.profile.flash_loan_limit, 1_380.0);
    assert_eq!(evaluation.profile.escrow_percentage, 7);
    assert!(evaluation.gate.passed);
    assert!((evaluation.agreement.escrow_amount - 7.0).abs() < 1e-9);
    assert_eq!(evaluation.agreement.trust_adjustment.escrow_reduction_percent, 93);
    assert!(evaluation.safety.passed);
    assert!(evaluation.safety.warnings.is_empty());
    assert!(evaluation.approved());
}

#[test]
fn test_new_agent_end_to_end() {
    let agent = TrustSignals::new("Fresh111", "fresh");
    let mut rng = StdRng::seed_from_u64(11);

    let evaluation = engine().evaluate(&agent, &request(9.0, 100.0), &mut rng).unwrap();

    assert_eq!(evaluation.decision.tier, Tier::Unverified);
    assert!(!evaluation.gate.passed);
    // full escrow, but still within the untrusted outflow bound
    assert_eq!(evaluation.agreement.escrow_amount, 9.0);
    assert!(evaluation.safety.passed);
    assert_eq!(evaluation.safety.warnings.len(), 1);
    assert!(!evaluation.approved());
}

#[test]
fn test_low_balance_blocks_transfer() {
    let agent = TrustSignals::new("Silver111", "scout")
        .with_trust_score(30)
        .unwrap()
        .with_infra_type(InfraType::Cloud)
        .with_attestations(1)
        .with_last_verified(now());
    let mut rng = StdRng::seed_from_u64(11);

    let evaluation = engine().evaluate(&agent, &request(10.0, 5.0), &mut rng).unwrap();

    assert!(evaluation.gate.passed);
    assert_eq!(evaluation.agreement.escrow_amount, 5.0);
    assert!(!evaluation.safety.passed);
    assert_eq!(evaluation.safety.blocking_warnings().count(), 1);
}

#[test]
fn test_evaluation_from_json() {
    let agent: TrustSignals = serde_json::from_str(
        r#"{
            "wallet": "Json111",
            "name": "parsed",
            "trustScore": 55,
            "infraType": "TEE",
            "attestationCount": 2,
            "hasEconomicStake": true,
            "lastVerified": 1772366400
        }"#,
    )
    .unwrap();
    let request: EvaluationRequest = serde_json::from_str(
        r#"{
            "criteria": {"minTrustScore": 50, "requiredInfra": ["TEE"]},
            "baseEscrow": 10,
            "counterparty": "Counter222",
            "vault": "Vault333",
            "senderPreBalance": 20
        }"#,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let evaluation = engine().evaluate(&agent, &request, &mut rng).unwrap();
    assert_eq!(evaluation.decision.tier, Tier::Gold);
    assert!(evaluation.approved());

    let json = serde_json::to_value(&evaluation).unwrap();
    assert_eq!(json["agreement"]["trustAdjustment"]["escrowReductionPercent"], 82);
    assert_eq!(json["agreement"]["termsHash"].as_str().unwrap().len(), 64);
}

#[test]
fn test_malformed_request_is_an_error() {
    let agent = TrustSignals::new("Fresh111", "fresh");
    let mut rng = StdRng::seed_from_u64(11);
    assert!(engine().evaluate(&agent, &request(-1.0, 100.0), &mut rng).is_err());
    assert!(engine().evaluate(&agent, &request(1.0, f64::INFINITY), &mut rng).is_err());
}

fn arb_signals() -> impl Strategy<Value = TrustSignals> {
    (
        0u8..=100,
        prop::sample::select(InfraType::ALL.to_vec()),
        0u32..8,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(score, infra, attestations, stake, hardware, flagged)| {
            TrustSignals::new("Prop111", "prop")
                .with_trust_score(score)
                .unwrap()
                .with_infra_type(infra)
                .with_attestations(attestations)
                .with_economic_stake(stake)
                .with_hardware_binding(hardware)
                .flagged(flagged)
        })
}

proptest! {
    #[test]
    fn flagged_agents_are_blocked(signals in arb_signals()) {
        prop_assert_eq!(derive(&signals.flagged(true)).tier, Tier::Blocked);
    }

    #[test]
    fn derivation_is_deterministic(signals in arb_signals()) {
        prop_assert_eq!(derive(&signals), derive(&signals));
    }

    #[test]
    fn escrow_and_collateral_floor(signals in arb_signals()) {
        let best = signals
            .with_infra_type(InfraType::Tee)
            .with_economic_stake(true);
        let profile = derive(&best);
        prop_assert!(profile.escrow_percentage >= 5);
        prop_assert!(profile.required_collateral >= 5);
    }

    #[test]
    fn diamond_needs_score_and_binding(score in 0u8..=100) {
        let agent = TrustSignals::new("Prop111", "prop")
            .with_trust_score(score)
            .unwrap()
            .with_attestations(10)
            .with_hardware_binding(true);
        prop_assert_eq!(derive(&agent).tier == Tier::Diamond, score >= 80);
    }

    #[test]
    fn empty_criteria_always_pass(signals in arb_signals()) {
        let result = precise_gate(&signals, &GateCriteria::new(), now()).unwrap();
        prop_assert!(result.passed);
        prop_assert!(result.checks.is_empty());
    }

    #[test]
    fn evaluation_never_raises_escrow(signals in arb_signals(), base in 0.0f64..1_000.0) {
        let mut rng = StdRng::seed_from_u64(5);
        let evaluation = engine()
            .evaluate(&signals, &request(base, 10_000.0), &mut rng)
            .unwrap();
        prop_assert!(evaluation.agreement.escrow_amount <= base);
    }
}
