//! Tier classification and financial profile flows.

use agentfin_core::{
    derive, project_after_fulfillment, sensitivity_table, standard_scenarios, InfraType,
    SettlementPriority, Tier, TrustScore, TrustSignals,
};

fn cloud_agent(score: u8, attestations: u32) -> TrustSignals {
    TrustSignals::new("Agent111", "scout")
        .with_trust_score(score)
        .unwrap()
        .with_infra_type(InfraType::Cloud)
        .with_attestations(attestations)
}

#[test]
fn test_silver_cloud_profile() {
    let profile = derive(&cloud_agent(30, 1));

    assert_eq!(profile.tier, Tier::Silver);
    assert_eq!(profile.escrow_percentage, 50);
    assert_eq!(profile.flash_loan_limit, 10.0);
    assert_eq!(profile.credit_line, 5.0);
    assert_eq!(profile.max_agreement_value, 50.0);
    assert_eq!(profile.insurance_premium_rate, 1_000);
    assert_eq!(profile.settlement_priority, SettlementPriority::Standard);
}

#[test]
fn test_stake_improves_silver_terms() {
    let profile = derive(&cloud_agent(30, 1).with_economic_stake(true));

    // 50 / 1.15 rounds to 43, 10 * 1.15 stays at 11.5
    assert_eq!(profile.escrow_percentage, 43);
    assert_eq!(profile.flash_loan_limit, 11.5);
}

#[test]
fn test_diamond_boundary() {
    let bound = cloud_agent(79, 5).with_hardware_binding(true);
    assert_eq!(derive(&bound).tier, Tier::Gold);

    let bound = cloud_agent(80, 5).with_hardware_binding(true);
    assert_eq!(derive(&bound).tier, Tier::Diamond);
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(derive(&cloud_agent(0, 5)).tier, Tier::Unverified);
    assert_eq!(derive(&cloud_agent(1, 0)).tier, Tier::Bronze);
    assert_eq!(derive(&cloud_agent(19, 3)).tier, Tier::Bronze);
    assert_eq!(derive(&cloud_agent(20, 0)).tier, Tier::Bronze);
    assert_eq!(derive(&cloud_agent(20, 1)).tier, Tier::Silver);
    assert_eq!(derive(&cloud_agent(49, 2)).tier, Tier::Silver);
    assert_eq!(derive(&cloud_agent(50, 1)).tier, Tier::Silver);
    assert_eq!(derive(&cloud_agent(50, 2)).tier, Tier::Gold);
}

#[test]
fn test_flag_overrides_everything() {
    let agent = cloud_agent(100, 9)
        .with_infra_type(InfraType::Tee)
        .with_economic_stake(true)
        .with_hardware_binding(true)
        .flagged(true);
    let profile = derive(&agent);

    assert_eq!(profile.tier, Tier::Blocked);
    assert_eq!(profile.flash_loan_limit, 0.0);
    assert_eq!(profile.settlement_priority, SettlementPriority::Rejected);
}

#[test]
fn test_sensitivity_marks_current_agent() {
    let rows = sensitivity_table(&cloud_agent(30, 1), &standard_scenarios());

    assert_eq!(rows.len(), 5);
    let current: Vec<&str> = rows
        .iter()
        .filter(|row| row.is_current)
        .map(|row| row.scenario.as_str())
        .collect();
    assert_eq!(current, vec!["Silver (Cloud)"]);
    assert_eq!(rows[4].profile.tier, Tier::Diamond);
}

#[test]
fn test_profile_serializes_camel_case() {
    let json = serde_json::to_value(derive(&cloud_agent(30, 1))).unwrap();
    assert_eq!(json["escrowPercentage"], 50);
    assert_eq!(json["settlementPriority"], "standard");
    assert!(json.get("flashLoanLimit").is_some());
}

#[test]
fn test_fulfillment_projection() {
    let projection = project_after_fulfillment(&cloud_agent(30, 1));
    assert_eq!(projection.projected_score.value(), 45);
    assert_eq!(projection.projected.tier, Tier::Silver);

    let projection = project_after_fulfillment(&cloud_agent(95, 5).with_hardware_binding(true));
    assert_eq!(projection.projected_score, TrustScore::MAX);
    assert_eq!(projection.current.tier, Tier::Diamond);
    assert_eq!(projection.projected.tier, Tier::Diamond);
}
