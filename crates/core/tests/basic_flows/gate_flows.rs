//! Simple and precise gate flows.

use agentfin_core::{precise_gate, simple_gate, GateCriteria, InfraType, TrustScore, TrustSignals};
use agentfin_verify::Criterion;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn agent() -> TrustSignals {
    TrustSignals::new("Agent111", "scout")
        .with_trust_score(30)
        .unwrap()
        .with_infra_type(InfraType::Cloud)
        .with_attestations(1)
        .with_last_verified(now() - Duration::days(2))
}

#[test]
fn test_simple_gate_thresholds() {
    let score = TrustScore::new(30).unwrap();
    let passed: Vec<bool> = [10, 20, 30, 50, 80]
        .into_iter()
        .map(|threshold| simple_gate(score, threshold).passed)
        .collect();
    assert_eq!(passed, vec![true, true, true, false, false]);
}

#[test]
fn test_empty_criteria_always_pass() {
    let flagged = agent().flagged(true);
    let result = precise_gate(&flagged, &GateCriteria::new(), now()).unwrap();
    assert!(result.passed);
    assert!(result.checks.is_empty());
}

#[test]
fn test_precise_gate_audit_trail() {
    let criteria = GateCriteria::new()
        .with_min_trust_score(20)
        .with_required_infra([InfraType::Cloud, InfraType::Tee])
        .with_min_attestations(1)
        .with_max_age_days(30.0);
    let result = precise_gate(&agent(), &criteria, now()).unwrap();

    assert!(result.passed);
    assert_eq!(result.checks.len(), 4);
    assert!(result.checks.iter().all(|check| check.passed));
    assert_eq!(result.checks[1].detail, "Cloud ∈ [Cloud, TEE]");
    assert_eq!(result.checks[3].detail, "2.0 days <= 30");
}

#[test]
fn test_boolean_requirements_only_checked_when_set() {
    let result = precise_gate(&agent(), &GateCriteria::new().requiring_economic_stake(), now()).unwrap();
    assert!(!result.passed);
    assert_eq!(result.checks.len(), 1);
    assert_eq!(result.checks[0].criterion, Criterion::EconomicStake);
    assert_eq!(result.checks[0].detail, "false");

    let staked = agent().with_economic_stake(true);
    assert!(precise_gate(&staked, &GateCriteria::new().requiring_economic_stake(), now())
        .unwrap()
        .passed);
}

#[test]
fn test_future_verification_passes_age_check() {
    let ahead = agent().with_last_verified(now() + Duration::days(1));
    let result = precise_gate(&ahead, &GateCriteria::new().with_max_age_days(0.0), now()).unwrap();
    assert!(result.passed);
}

#[test]
fn test_criteria_from_json() {
    let criteria: GateCriteria =
        serde_json::from_str(r#"{"minTrustScore": 50, "requireHardwareBinding": true}"#).unwrap();
    let result = precise_gate(&agent(), &criteria, now()).unwrap();
    let failed: Vec<Criterion> = result.failures().map(|check| check.criterion).collect();
    assert_eq!(failed, vec![Criterion::TrustScore, Criterion::HardwareBinding]);
}
