use std::env;
use std::fs;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use agentfin_core::{EngineConfig, EvaluationRequest, TrustEngine};
use agentfin_trust::{sensitivity_table, standard_scenarios};
use agentfin_types::{InfraType, TrustSignals};
use agentfin_verify::{simple_gate, GateCriteria};

const SIMPLE_GATE_THRESHOLDS: [u8; 5] = [10, 20, 30, 50, 80];

fn sample_agent() -> Result<TrustSignals> {
    let now = Utc::now();
    Ok(TrustSignals::new("DemoAgent1111111111111111111111111111111111", "demo-agent")
        .with_trust_score(30)?
        .with_infra_type(InfraType::Cloud)
        .with_attestations(1)
        .with_last_verified(now - Duration::days(3))
        .with_registered_at(now - Duration::days(45))
        .with_nonce(1))
}

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .pretty()
        .init();

    info!("Starting agentfin demo...");

    // Usage: agentfin-demo [signals.json] [config.json]
    let args: Vec<String> = env::args().skip(1).collect();
    let signals = match args.first() {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing signals from {path}"))?
        }
        None => sample_agent()?,
    };
    let config = match args.get(1) {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let engine = TrustEngine::new(config)?;

    info!(
        "Agent {} ({}): score {}, infra {}, {} attestation(s)",
        signals.name(),
        signals.wallet(),
        signals.trust_score,
        signals.infra_type,
        signals.attestation_count
    );

    // 1. Financial profile
    let profile = engine.assess(&signals);
    info!("Tier: {}", profile.tier);
    info!("  Flash loan limit: {}", profile.flash_loan_limit);
    info!("  Escrow: {}%", profile.escrow_percentage);
    info!("  Credit line: {}", profile.credit_line);
    info!("  Insurance premium: {}%", profile.insurance_premium_percent());
    info!("  Max agreement value: {}", profile.max_agreement_value);
    info!("  Collateral: {}%", profile.required_collateral);
    info!("  Settlement: {}", profile.settlement_priority);

    // 2. Sensitivity across reference agents
    info!("Parameter sensitivity:");
    for row in sensitivity_table(&signals, &standard_scenarios()) {
        let marker = if row.is_current { " <- current" } else { "" };
        info!(
            "  {:<16} {:<10} flash {:>8} escrow {:>3}% credit {:>6}{}",
            row.scenario,
            row.profile.tier.to_string(),
            row.profile.flash_loan_limit,
            row.profile.escrow_percentage,
            row.profile.credit_line,
            marker
        );
    }

    // 3. Terms after one fulfilled agreement
    let projection = engine.project_fulfillment(&signals);
    let (current, next) = (&projection.current, &projection.projected);
    info!("After fulfillment:");
    info!("  {:<20} {:>12} {:>12}", "Metric", "Current", "Projected");
    info!("  {:<20} {:>12} {:>12}", "Trust score", projection.current_score.value(), projection.projected_score.value());
    info!("  {:<20} {:>12} {:>12}", "Tier", current.tier.to_string(), next.tier.to_string());
    info!("  {:<20} {:>11}% {:>11}%", "Escrow", current.escrow_percentage, next.escrow_percentage);
    info!("  {:<20} {:>12} {:>12}", "Flash loan limit", current.flash_loan_limit, next.flash_loan_limit);
    info!("  {:<20} {:>12} {:>12}", "Credit line", current.credit_line, next.credit_line);
    info!(
        "  {:<20} {:>8} bps {:>8} bps",
        "Insurance premium", current.insurance_premium_rate, next.insurance_premium_rate
    );

    // 4. Gates
    info!("Simple gates:");
    for threshold in SIMPLE_GATE_THRESHOLDS {
        let decision = simple_gate(signals.trust_score, threshold);
        info!("  [{}] {}", if decision.passed { "PASS" } else { "FAIL" }, decision.reason);
    }

    let request = EvaluationRequest {
        criteria: GateCriteria::new()
            .with_min_trust_score(20)
            .with_required_infra([InfraType::Cloud, InfraType::Tee])
            .with_min_attestations(1)
            .with_max_age_days(30.0),
        base_escrow: 10.0,
        counterparty: "DemoCounterparty11111111111111111111111111".to_string(),
        vault: "DemoVault1111111111111111111111111111111111".to_string(),
        sender_pre_balance: 100.0,
    };

    // 5. Full evaluation
    let mut rng = rand::thread_rng();
    let evaluation = engine.evaluate(&signals, &request, &mut rng)?;

    info!("Precise gate: {}", if evaluation.gate.passed { "PASS" } else { "FAIL" });
    for check in &evaluation.gate.checks {
        info!(
            "  [{}] {}: {}",
            if check.passed { "PASS" } else { "FAIL" },
            check.criterion,
            check.detail
        );
    }

    let agreement = &evaluation.agreement;
    info!("Agreement {}", agreement.agreement_id);
    info!("  {}", agreement.trust_adjustment.reason);
    info!(
        "  Escrow: {} -> {} {}",
        agreement.trust_adjustment.base_escrow, agreement.escrow_amount, agreement.escrow_asset
    );
    info!("  Terms hash: {}", agreement.terms_hash);
    info!("  Terms URI: {}", agreement.terms_uri);
    info!("  Expires: {}", agreement.expires_at);

    let safety = &evaluation.safety;
    info!(
        "Transfer simulation: {} (max outflow {})",
        if safety.passed { "PASS" } else { "FAIL" },
        safety.max_allowed_outflow
    );
    for check in &safety.delta_checks {
        info!(
            "  {:?} {}: delta {} within bounds: {}",
            check.role, check.account, check.delta, check.within_bounds
        );
    }
    for warning in &safety.warnings {
        if warning.is_blocking() {
            warn!("  {}", warning);
        } else {
            info!("  {}", warning);
        }
    }

    info!(
        "Demo completed: agent {}",
        if evaluation.approved() { "approved" } else { "not approved" }
    );
    Ok(())
}
